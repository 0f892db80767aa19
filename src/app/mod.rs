// (C) 2025 - Enzo Lombardi

//! Application module providing the main application structure and event loop.
//!
//! This module contains the [`Application`] type which serves as the central
//! coordinator for Turbo Vision applications. It manages:
//! - The terminal instance
//! - The desktop (root container for all windows)
//! - Optional menu bar and status line
//! - The main event loop
//! - Modal dialog execution
//!
//! # Architecture
//!
//! A Turbo Vision application follows this structure:
//!
//! ```text
//! Application
//! ├── Terminal (rendering backend)
//! ├── Desktop (window manager)
//! │   ├── Background
//! │   └── Windows/Dialogs
//! ├── MenuBar (optional)
//! └── StatusLine (optional)
//! ```
//!
//! # Examples
//!
//! `run()` drives the Consumer loop itself - waiting for events or the nearest due timer,
//! dispatching whatever arrives, then redrawing if anything is dirty - so most applications
//! just build their windows and hand control over:
//!
//! ```rust,no_run
//! use turbo_vision::app::Application;
//! use turbo_vision::core::error::Result;
//!
//! fn main() -> Result<()> {
//!     let mut app = Application::new()?;
//!
//!     // Add windows, set a menu bar/status line, etc.
//!
//!     app.run();
//!     app.terminal.shutdown()?;
//!     Ok(())
//! }
//! ```

pub mod application;
pub mod config;
pub mod event_queue;
pub mod logging;
pub mod timer;

pub use application::Application;
pub use config::Config;
pub use event_queue::EventQueue;
pub use timer::{InvokeLaterQueue, TimerWheel};
