//! CLI runner for common setup.
//!
//! Owns the logging guard so log output is flushed when the command ends.

use crate::error::CliError;
use std::path::Path;
use testtiles::logging::{default_log_file, init_logging, LoggingGuard};
use tracing::info;

/// Runner that manages CLI lifecycle.
pub struct CliRunner {
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
}

impl CliRunner {
    /// Initialize logging into `log_dir`.
    ///
    /// Logs are echoed to stdout only in verbose mode so the summary stays
    /// readable.
    pub fn new(log_dir: &Path, verbose: bool) -> Result<Self, CliError> {
        let logging_guard = init_logging(log_dir, default_log_file(), verbose, verbose)
            .map_err(CliError::LoggingInit)?;
        Ok(Self { logging_guard })
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("testtiles v{}", testtiles::VERSION);
        info!("testtiles CLI: {} command", command);
    }
}
