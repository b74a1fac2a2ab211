//! CLI error handling with user-friendly messages.

use std::io;
use std::process;
use thiserror::Error;
use testtiles::coord::MAX_ZOOM;
use testtiles::error::{ConfigError, GenerateError};

/// CLI-specific errors with user-friendly messages.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(#[source] io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid temporal start '{input}': {source}")]
    InvalidTimestamp {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Generation failed: {0}")]
    Generate(#[from] GenerateError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Config(ConfigError::InvalidZoom(_)) => {
                eprintln!();
                eprintln!("Zoom levels run from 0 to {}.", MAX_ZOOM);
                eprintln!("Each level z adds 4^z tiles; zoom 10 alone is over a million.");
            }
            CliError::Config(ConfigError::InvalidBounds { .. }) => {
                eprintln!();
                eprintln!("Bounds are given as minlon,minlat,maxlon,maxlat, e.g. -10,40,30,70");
            }
            CliError::InvalidTimestamp { .. } => {
                eprintln!();
                eprintln!("Expected format: YYYY-MM-DDTHH:MM:SS, e.g. 2020-01-01T00:00:00");
            }
            CliError::Generate(GenerateError::Io { path, .. }) => {
                eprintln!();
                eprintln!("Check that {} is writable.", path.display());
            }
            _ => {}
        }

        process::exit(1)
    }
}
