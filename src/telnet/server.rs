// (C) 2025 - Enzo Lombardi

//! Telnet server for turbo-vision TUI applications.
//!
//! Mirrors the shape of [`crate::ssh::SshServer`] — one `Application`/backend pair
//! per connection — but blocking and synchronous: each accepted [`TcpStream`] gets
//! its own OS thread instead of an async task, since telnet needs no crypto
//! handshake to negotiate before the TUI can start.

use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

use crate::core::error::{Result, TurboVisionError};
use crate::terminal::{Backend, TelnetBackend};

/// Factory function type for creating TUI applications, invoked once per connection.
pub type AppFactory = Arc<dyn Fn(Box<dyn Backend>) + Send + Sync>;

/// Configuration for the telnet server.
pub struct TelnetServerConfig {
    /// Address to bind the listener to.
    pub bind_addr: String,
    /// Initial terminal size assumed before a NAWS subnegotiation arrives.
    pub initial_size: (u16, u16),
    /// Maximum number of concurrent connections; `None` means unbounded.
    pub max_connections: Option<usize>,
}

impl TelnetServerConfig {
    /// Create a new server configuration with default values.
    pub fn new() -> Self {
        Self {
            bind_addr: "0.0.0.0:2323".to_string(),
            initial_size: (80, 24),
            max_connections: None,
        }
    }

    /// Set the bind address.
    pub fn bind_addr(mut self, addr: impl Into<String>) -> Self {
        self.bind_addr = addr.into();
        self
    }

    /// Set the terminal size assumed before NAWS negotiates a real one.
    pub fn initial_size(mut self, width: u16, height: u16) -> Self {
        self.initial_size = (width, height);
        self
    }

    /// Set maximum concurrent connections.
    pub fn max_connections(mut self, max: usize) -> Self {
        self.max_connections = Some(max);
        self
    }
}

impl Default for TelnetServerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Telnet server that serves turbo-vision TUI applications.
///
/// Each connection gets its own `TelnetBackend` run on its own thread, in the
/// same shape `SshServer` uses for `russh` channels, just synchronous.
///
/// # Example
///
/// ```rust,ignore
/// use turbo_vision::telnet::{TelnetServer, TelnetServerConfig};
/// use turbo_vision::Terminal;
///
/// let config = TelnetServerConfig::new().bind_addr("0.0.0.0:2323");
/// let server = TelnetServer::new(config, |backend| {
///     let mut terminal = Terminal::with_backend(backend).unwrap();
///     // Run your TUI application...
/// });
/// server.run().unwrap();
/// ```
pub struct TelnetServer {
    config: TelnetServerConfig,
    app_factory: AppFactory,
}

impl TelnetServer {
    /// Create a new telnet server with an application factory.
    pub fn new<F>(config: TelnetServerConfig, factory: F) -> Self
    where
        F: Fn(Box<dyn Backend>) + Send + Sync + 'static,
    {
        Self {
            config,
            app_factory: Arc::new(factory),
        }
    }

    /// Run the telnet server, blocking the calling thread in an accept loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot bind to the configured address.
    pub fn run(self) -> Result<()> {
        let listener = TcpListener::bind(&self.config.bind_addr)
            .map_err(|e| TurboVisionError::telnet(format!("bind {} failed: {e}", self.config.bind_addr)))?;

        log::info!("Starting telnet server on {}", self.config.bind_addr);

        for incoming in listener.incoming() {
            let stream = match incoming {
                Ok(s) => s,
                Err(e) => {
                    log::warn!("telnet accept failed: {e}");
                    continue;
                }
            };

            let factory = Arc::clone(&self.app_factory);
            let (width, height) = self.config.initial_size;
            spawn_connection(stream, width, height, factory);
        }

        Ok(())
    }
}

fn spawn_connection(stream: TcpStream, width: u16, height: u16, factory: AppFactory) {
    let peer = stream.peer_addr().ok();
    thread::spawn(move || {
        log::info!("telnet connection from {peer:?}");
        match TelnetBackend::new(stream, width, height) {
            Ok(backend) => factory(Box::new(backend)),
            Err(e) => log::warn!("telnet backend setup failed for {peer:?}: {e}"),
        }
        log::info!("telnet connection closed for {peer:?}");
    });
}

/// Convenience function to run a simple telnet TUI server.
///
/// # Errors
///
/// Returns an error if the listener cannot bind to `addr`.
pub fn run_telnet_server<F>(addr: &str, app_factory: F) -> Result<()>
where
    F: Fn(Box<dyn Backend>) + Send + Sync + 'static,
{
    let config = TelnetServerConfig::new().bind_addr(addr);
    TelnetServer::new(config, app_factory).run()
}
