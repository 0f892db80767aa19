// (C) 2025 - Enzo Lombardi
//! Logging setup.
//!
//! Wires the `log` facade to `simplelog`'s `CombinedLogger`: a terminal sink for warnings and
//! above (so running in a normal terminal doesn't clobber the TUI's own screen with info-level
//! noise) and a rotating-by-restart file sink for everything, so a session's full trace survives
//! after the alternate screen is torn down. Call once, before [`crate::app::Application::new`].

use crate::app::config::Config;
use crate::core::error::{Result, TurboVisionError};
use simplelog::{ColorChoice, CombinedLogger, Config as LogConfig, LevelFilter, TermLogger, TerminalMode, WriteLogger};
use std::fs::OpenOptions;
use std::path::Path;

/// Initializes the global logger. `log_path` receives everything at `Trace` and above; the
/// terminal sink only receives `Warn` and above, since `Info`/`Debug`/`Trace` output would
/// otherwise scribble over the alternate screen the TUI owns.
///
/// # Errors
///
/// Returns an error if the log file can't be opened, or if a logger is already installed
/// (`log::set_logger` may only be called once per process).
pub fn init(_config: &Config, log_path: impl AsRef<Path>) -> Result<()> {
    let log_path = log_path.as_ref();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(|e| TurboVisionError::file_operation(log_path, e))?;

    CombinedLogger::init(vec![
        TermLogger::new(LevelFilter::Warn, LogConfig::default(), TerminalMode::Mixed, ColorChoice::Auto),
        WriteLogger::new(LevelFilter::Trace, LogConfig::default(), file),
    ])
    .map_err(|e| TurboVisionError::config(format!("logger already initialized: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    // `CombinedLogger::init` installs a process-global logger and can only succeed once per
    // process, so it isn't exercised here - covered instead by the demo binaries that call
    // `logging::init` at startup.
    #[test]
    fn init_rejects_an_unwritable_log_path() {
        let config = Config::default();
        let result = init(&config, "/nonexistent-dir/definitely-missing/app.log");
        assert!(result.is_err());
    }
}
