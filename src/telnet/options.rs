// (C) 2025 - Enzo Lombardi

//! Telnet IAC option negotiation (RFC 854/855) and NAWS/TERMINAL-TYPE/NEW-ENVIRON parsing.
//!
//! This module strips telnet command sequences out of the raw byte stream a client
//! sends and turns them into [`TelnetEvent`]s (a resize, a negotiated capability, or
//! plain cooked bytes to hand upstream to the key-sequence decoder).

use std::io::{self, Write};

pub const IAC: u8 = 255;
pub const DONT: u8 = 254;
pub const DO: u8 = 253;
pub const WONT: u8 = 252;
pub const WILL: u8 = 251;
pub const SB: u8 = 250;
pub const SE: u8 = 240;
pub const NOP: u8 = 241;

pub const OPT_BINARY: u8 = 0;
pub const OPT_ECHO: u8 = 1;
pub const OPT_SUPPRESS_GA: u8 = 3;
pub const OPT_TERMINAL_TYPE: u8 = 24;
pub const OPT_NAWS: u8 = 31;
pub const OPT_NEW_ENVIRON: u8 = 39;

const ENV_VAR: u8 = 0;
const ENV_VALUE: u8 = 1;
/// TELQUAL_IS: subnegotiation reply marker shared by TERMINAL-TYPE and NEW-ENVIRON (RFC 1091/1572).
const TELQUAL_IS: u8 = 0;

/// Something the option layer decoded out of the wire stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TelnetEvent {
    /// Client announced (or we inferred) a new window size, in character cells.
    Resize(u16, u16),
    /// Client's TERMINAL-TYPE subnegotiation reply.
    TerminalType(String),
    /// A NEW-ENVIRON variable the client sent (LOGNAME, USER, LANG, ...).
    EnvironVar(String, String),
}

enum ParseState {
    Ground,
    Iac,
    Negotiate(u8),
    Sub,
    SubIac,
}

/// Strips telnet framing from a byte stream, replying to negotiation in place and
/// surfacing [`TelnetEvent`]s plus the cooked bytes meant for the application.
pub struct OptionNegotiator {
    state: ParseState,
    sub_buffer: Vec<u8>,
    binary_mode: bool,
    pending_cr: bool,
}

impl OptionNegotiator {
    pub fn new() -> Self {
        Self {
            state: ParseState::Ground,
            sub_buffer: Vec::new(),
            binary_mode: false,
            pending_cr: false,
        }
    }

    /// Whether BINARY has been negotiated in both directions (8-bit clean transfer).
    pub fn binary_mode(&self) -> bool {
        self.binary_mode
    }

    /// Writes the session-opening negotiation: we request BINARY, SUPPRESS-GO-AHEAD
    /// and that the client let us echo (ECHO off on the client's side), then ask for
    /// TERMINAL-TYPE, NAWS and NEW-ENVIRON.
    pub fn send_initial_negotiation(&self, out: &mut impl Write) -> io::Result<()> {
        write_cmd(out, WILL, OPT_BINARY)?;
        write_cmd(out, DO, OPT_BINARY)?;
        write_cmd(out, WILL, OPT_SUPPRESS_GA)?;
        write_cmd(out, DO, OPT_SUPPRESS_GA)?;
        write_cmd(out, WILL, OPT_ECHO)?;
        write_cmd(out, DO, OPT_TERMINAL_TYPE)?;
        write_cmd(out, DO, OPT_NAWS)?;
        write_cmd(out, DO, OPT_NEW_ENVIRON)?;
        out.flush()
    }

    /// Feeds raw bytes read off the socket. Returns the cooked application bytes
    /// (telnet commands stripped, CR NUL / bare LF normalized per mode) plus any
    /// [`TelnetEvent`]s decoded along the way. Negotiation replies are written
    /// directly to `out`.
    pub fn feed(&mut self, data: &[u8], out: &mut impl Write) -> io::Result<(Vec<u8>, Vec<TelnetEvent>)> {
        let mut cooked = Vec::with_capacity(data.len());
        let mut events = Vec::new();

        for &byte in data {
            match self.state {
                ParseState::Ground => {
                    if byte == IAC {
                        self.state = ParseState::Iac;
                        continue;
                    }
                    if self.pending_cr {
                        self.pending_cr = false;
                        // CR NUL (ASCII mode) or CR LF both collapse to a single CR upstream.
                        if byte == 0 || byte == b'\n' {
                            continue;
                        }
                    }
                    if byte == b'\r' && !self.binary_mode {
                        cooked.push(b'\r');
                        self.pending_cr = true;
                        continue;
                    }
                    cooked.push(byte);
                }
                ParseState::Iac => {
                    self.state = ParseState::Ground;
                    match byte {
                        IAC => cooked.push(IAC), // escaped 0xFF in BINARY mode
                        DO | DONT | WILL | WONT => self.state = ParseState::Negotiate(byte),
                        SB => {
                            self.sub_buffer.clear();
                            self.state = ParseState::Sub;
                        }
                        NOP | SE => {}
                        _ => {}
                    }
                }
                ParseState::Negotiate(verb) => {
                    self.state = ParseState::Ground;
                    self.handle_negotiation(verb, byte, out)?;
                }
                ParseState::Sub => {
                    if byte == IAC {
                        self.state = ParseState::SubIac;
                    } else {
                        self.sub_buffer.push(byte);
                    }
                }
                ParseState::SubIac => {
                    if byte == SE {
                        self.state = ParseState::Ground;
                        if let Some(event) = self.finish_subnegotiation() {
                            events.push(event);
                        }
                    } else if byte == IAC {
                        self.sub_buffer.push(IAC);
                        self.state = ParseState::Sub;
                    } else {
                        // Malformed: IAC not followed by SE inside a subnegotiation. Drop it and
                        // resynchronize on ground rather than unwind.
                        self.state = ParseState::Ground;
                    }
                }
            }
        }

        Ok((cooked, events))
    }

    fn handle_negotiation(&mut self, verb: u8, option: u8, out: &mut impl Write) -> io::Result<()> {
        match (verb, option) {
            (WILL, OPT_BINARY) | (DO, OPT_BINARY) => {
                self.binary_mode = true;
            }
            (WILL, OPT_NAWS) => {
                // Client confirmed NAWS; it will follow with a subnegotiation.
            }
            (WILL, OPT_ECHO) => {
                // Some clients try to echo for us; we already asked to own ECHO, refuse theirs.
                write_cmd(out, DONT, OPT_ECHO)?;
                out.flush()?;
            }
            (WONT, option) | (DONT, option) => {
                log::debug!("telnet peer refused option {option}");
            }
            _ => {}
        }
        Ok(())
    }

    fn finish_subnegotiation(&mut self) -> Option<TelnetEvent> {
        let buf = std::mem::take(&mut self.sub_buffer);
        if buf.is_empty() {
            return None;
        }
        match buf[0] {
            OPT_NAWS if buf.len() >= 5 => {
                let width = u16::from_be_bytes([buf[1], buf[2]]);
                let height = u16::from_be_bytes([buf[3], buf[4]]);
                Some(TelnetEvent::Resize(width, height))
            }
            OPT_TERMINAL_TYPE if buf.len() >= 2 && buf[1] == TELQUAL_IS => {
                let name = String::from_utf8_lossy(&buf[2..]).into_owned();
                Some(TelnetEvent::TerminalType(name))
            }
            OPT_NEW_ENVIRON if buf.len() >= 2 => parse_new_environ(&buf[1..]),
            _ => None,
        }
    }
}

impl Default for OptionNegotiator {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_new_environ(body: &[u8]) -> Option<TelnetEvent> {
    // IS (0) followed by VAR name IAC... VALUE value pairs; we only care about the first pair.
    let mut iter = body.iter().copied().skip(1).peekable();
    if iter.peek() != Some(&ENV_VAR) {
        return None;
    }
    iter.next();
    let mut name = Vec::new();
    for b in iter.by_ref() {
        if b == ENV_VALUE {
            break;
        }
        name.push(b);
    }
    let value: Vec<u8> = iter.collect();
    if name.is_empty() {
        return None;
    }
    Some(TelnetEvent::EnvironVar(
        String::from_utf8_lossy(&name).into_owned(),
        String::from_utf8_lossy(&value).into_owned(),
    ))
}

fn write_cmd(out: &mut impl Write, verb: u8, option: u8) -> io::Result<()> {
    out.write_all(&[IAC, verb, option])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_bytes_pass_through_in_binary_mode() {
        let mut neg = OptionNegotiator::new();
        neg.binary_mode = true;
        let mut out = Vec::new();
        let (cooked, events) = neg.feed(b"hello", &mut out).unwrap();
        assert_eq!(cooked, b"hello");
        assert!(events.is_empty());
    }

    #[test]
    fn escaped_iac_survives_binary_mode() {
        let mut neg = OptionNegotiator::new();
        neg.binary_mode = true;
        let mut out = Vec::new();
        let (cooked, _) = neg.feed(&[b'a', IAC, IAC, b'b'], &mut out).unwrap();
        assert_eq!(cooked, vec![b'a', IAC, b'b']);
    }

    #[test]
    fn bare_cr_becomes_cr_nul_in_ascii_mode() {
        let mut neg = OptionNegotiator::new();
        let mut out = Vec::new();
        let (cooked, _) = neg.feed(b"a\r\0b", &mut out).unwrap();
        assert_eq!(cooked, vec![b'a', b'\r', b'b']);
    }

    #[test]
    fn naws_subnegotiation_yields_resize_event() {
        let mut neg = OptionNegotiator::new();
        let mut out = Vec::new();
        let frame = [IAC, SB, OPT_NAWS, 0, 80, 0, 24, IAC, SE];
        let (cooked, events) = neg.feed(&frame, &mut out).unwrap();
        assert!(cooked.is_empty());
        assert_eq!(events, vec![TelnetEvent::Resize(80, 24)]);
    }

    #[test]
    fn will_binary_sets_binary_mode() {
        let mut neg = OptionNegotiator::new();
        let mut out = Vec::new();
        neg.feed(&[IAC, WILL, OPT_BINARY], &mut out).unwrap();
        assert!(neg.binary_mode());
    }

    #[test]
    fn negotiation_bytes_are_stripped_from_cooked_stream() {
        let mut neg = OptionNegotiator::new();
        let mut out = Vec::new();
        let frame = [b'x', IAC, WILL, OPT_ECHO, b'y'];
        let (cooked, _) = neg.feed(&frame, &mut out).unwrap();
        assert_eq!(cooked, vec![b'x', b'y']);
    }

    #[test]
    fn terminal_type_subnegotiation_yields_event() {
        let mut neg = OptionNegotiator::new();
        let mut out = Vec::new();
        let mut frame = vec![IAC, SB, OPT_TERMINAL_TYPE, TELQUAL_IS];
        frame.extend_from_slice(b"xterm-256color");
        frame.extend_from_slice(&[IAC, SE]);
        let (_, events) = neg.feed(&frame, &mut out).unwrap();
        assert_eq!(events, vec![TelnetEvent::TerminalType("xterm-256color".to_string())]);
    }

    #[test]
    fn new_environ_subnegotiation_yields_event() {
        let mut neg = OptionNegotiator::new();
        let mut out = Vec::new();
        let mut frame = vec![IAC, SB, OPT_NEW_ENVIRON, TELQUAL_IS, ENV_VAR];
        frame.extend_from_slice(b"USER");
        frame.push(ENV_VALUE);
        frame.extend_from_slice(b"alice");
        frame.extend_from_slice(&[IAC, SE]);
        let (_, events) = neg.feed(&frame, &mut out).unwrap();
        assert_eq!(
            events,
            vec![TelnetEvent::EnvironVar("USER".to_string(), "alice".to_string())]
        );
    }
}
