// (C) 2025 - Enzo Lombardi

//! Telnet-based backend implementation.
//!
//! This module provides [`TelnetBackend`], which implements the [`Backend`] trait
//! over a plain `std::net::TcpStream`. Unlike [`SshBackend`](super::SshBackend),
//! which bridges an async handler to the synchronous event loop through channels,
//! telnet needs no crypto/async handshake, so the backend owns the socket directly:
//! `poll_event` blocks on the socket itself (with the caller's timeout), decoding
//! IAC option negotiation and keyboard bytes as they arrive.

use std::collections::VecDeque;
use std::io::{self, Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use super::backend::{Backend, Capabilities};
use super::input_parser::InputParser;
use crate::core::event::Event;
use crate::telnet::options::{OptionNegotiator, TelnetEvent};

/// Telnet backend for turbo-vision applications.
///
/// One `TelnetBackend` is created per accepted connection and driven entirely on
/// the thread that accepted it (see `telnet::server::TelnetServer`).
pub struct TelnetBackend {
    stream: TcpStream,
    negotiator: OptionNegotiator,
    input_parser: InputParser,
    read_buf: [u8; 4096],
    event_queue: VecDeque<Event>,
    output_buffer: Vec<u8>,
    width: u16,
    height: u16,
    capabilities: Capabilities,
    initialized: bool,
}

impl TelnetBackend {
    /// Create a new telnet backend over an already-accepted TCP stream.
    ///
    /// `width`/`height` are the initial terminal size assumed before the client's
    /// NAWS subnegotiation (if any) arrives.
    pub fn new(stream: TcpStream, width: u16, height: u16) -> io::Result<Self> {
        stream.set_nodelay(true)?;
        Ok(Self {
            stream,
            negotiator: OptionNegotiator::new(),
            input_parser: InputParser::new(),
            read_buf: [0u8; 4096],
            event_queue: VecDeque::new(),
            output_buffer: Vec::with_capacity(8192),
            width,
            height,
            capabilities: Capabilities {
                mouse: false,
                colors_256: true,
                true_color: false,
                bracketed_paste: false,
                focus_events: false,
                kitty_keyboard: false,
            },
            initialized: false,
        })
    }

    /// Current negotiated size, updated by NAWS subnegotiations as they arrive.
    pub fn size_tuple(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn read_once(&mut self, timeout: Duration) -> io::Result<()> {
        self.stream.set_read_timeout(Some(timeout))?;
        match self.stream.read(&mut self.read_buf) {
            Ok(0) => Err(io::Error::new(io::ErrorKind::BrokenPipe, "telnet client disconnected")),
            Ok(n) => {
                let (cooked, telnet_events) = self.negotiator.feed(&self.read_buf[..n], &mut self.stream)?;
                for event in telnet_events {
                    match event {
                        TelnetEvent::Resize(w, h) => {
                            self.width = w;
                            self.height = h;
                            self.event_queue.push_back(Event::resize(w, h));
                        }
                        TelnetEvent::TerminalType(name) => {
                            log::debug!("telnet client terminal type: {name}");
                        }
                        TelnetEvent::EnvironVar(name, value) => {
                            log::debug!("telnet client env {name}={value}");
                        }
                    }
                }
                if !cooked.is_empty() {
                    self.event_queue.extend(self.input_parser.parse(&cooked));
                }
                Ok(())
            }
            Err(ref e) if e.kind() == io::ErrorKind::WouldBlock || e.kind() == io::ErrorKind::TimedOut => Ok(()),
            Err(e) => Err(e),
        }
    }
}

impl Backend for TelnetBackend {
    fn init(&mut self) -> io::Result<()> {
        if self.initialized {
            return Ok(());
        }
        self.negotiator.send_initial_negotiation(&mut self.stream)?;

        self.output_buffer.extend_from_slice(b"\x1b[?1049h");
        self.output_buffer.extend_from_slice(b"\x1b[?25l");
        self.output_buffer.extend_from_slice(b"\x1b[?7l");
        self.flush()?;

        self.initialized = true;
        Ok(())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        if !self.initialized {
            return Ok(());
        }
        self.output_buffer.extend_from_slice(b"\x1b[?25h");
        self.output_buffer.extend_from_slice(b"\x1b[?7h");
        self.output_buffer.extend_from_slice(b"\x1b[?1049l");
        self.output_buffer.extend_from_slice(b"\x1b[0m");
        self.flush()?;
        self.initialized = false;
        Ok(())
    }

    fn size(&self) -> io::Result<(u16, u16)> {
        Ok((self.width, self.height))
    }

    fn poll_event(&mut self, timeout: Duration) -> io::Result<Option<Event>> {
        if let Some(event) = self.event_queue.pop_front() {
            return Ok(Some(event));
        }
        self.read_once(timeout)?;
        Ok(self.event_queue.pop_front())
    }

    fn write_raw(&mut self, data: &[u8]) -> io::Result<()> {
        self.output_buffer.extend_from_slice(data);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.output_buffer.is_empty() {
            let data = std::mem::take(&mut self.output_buffer);
            self.stream.write_all(&data)?;
            self.stream.flush()?;
        }
        Ok(())
    }

    fn show_cursor(&mut self, x: u16, y: u16) -> io::Result<()> {
        write!(self.output_buffer, "\x1b[{};{}H\x1b[?25h", y + 1, x + 1)?;
        Ok(())
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        self.output_buffer.extend_from_slice(b"\x1b[?25l");
        Ok(())
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn suspend(&mut self) -> io::Result<()> {
        // Telnet sessions have no local shell to suspend into.
        Ok(())
    }

    fn resume(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn cell_aspect_ratio(&self) -> (i16, i16) {
        (2, 1)
    }

    fn bell(&mut self) -> io::Result<()> {
        self.output_buffer.push(0x07);
        self.flush()
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        self.output_buffer.extend_from_slice(b"\x1b[2J\x1b[H");
        self.flush()
    }
}
