// (C) 2025 - Enzo Lombardi

//! Telnet server support for turbo-vision applications.
//!
//! This module provides infrastructure for serving turbo-vision TUI applications
//! over plain telnet connections. Unlike `ssh`, there is no crypto handshake, so
//! the server is a blocking `std::net::TcpListener` accept loop with one OS thread
//! per connection, each thread owning its own `TelnetBackend`/`Application` pair.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                      Telnet Server                               │
//! ├──────────────────────────────────────────────────────────────────┤
//! │                                                                  │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐          │
//! │  │  TcpStream  │    │  TcpStream  │    │  TcpStream  │   ...    │
//! │  │ (per conn)  │    │ (per conn)  │    │ (per conn)  │          │
//! │  └──────┬──────┘    └──────┬──────┘    └──────┬──────┘          │
//! │         │                  │                  │                  │
//! │         ▼                  ▼                  ▼                  │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐          │
//! │  │TelnetBackend│    │TelnetBackend│    │TelnetBackend│          │
//! │  │ (own thread)│    │ (own thread)│    │ (own thread)│          │
//! │  └──────┬──────┘    └──────┬──────┘    └──────┬──────┘          │
//! │         │                  │                  │                  │
//! │         ▼                  ▼                  ▼                  │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐          │
//! │  │   TUI App   │    │   TUI App   │    │   TUI App   │          │
//! │  │ (Terminal)  │    │ (Terminal)  │    │ (Terminal)  │          │
//! │  └─────────────┘    └─────────────┘    └─────────────┘          │
//! │                                                                  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use turbo_vision::telnet::{TelnetServer, TelnetServerConfig};
//! use turbo_vision::Terminal;
//!
//! fn main() {
//!     let config = TelnetServerConfig::new().bind_addr("0.0.0.0:2323");
//!
//!     let server = TelnetServer::new(config, |backend| {
//!         let terminal = Terminal::with_backend(backend).unwrap();
//!         // Run your app...
//!     });
//!
//!     server.run().unwrap();
//! }
//! ```

pub mod options;
mod server;

pub use server::{run_telnet_server, AppFactory, TelnetServer, TelnetServerConfig};
