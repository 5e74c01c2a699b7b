//! Error types for diffstats.
//!
//! Uses thiserror for derive macros. Only fatal conditions are errors here:
//! malformed diff lines and unsupported dialects are recovered where they
//! occur and never surface as values of this type.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for diffstats operations.
#[derive(Error, Debug)]
pub enum DiffStatsError {
    /// User provided invalid arguments or input that does not exist.
    #[error("{0}")]
    UserError(String),

    /// A diff source could not be read. Fatal for the whole run.
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be loaded or failed validation.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A fan-out worker panicked or the worker pool could not start.
    #[error("Worker failed: {0}")]
    WorkerFailed(String),

    /// The result could not be rendered.
    #[error("Failed to render report: {0}")]
    RenderError(String),
}

impl DiffStatsError {
    /// Build an I/O error tagged with the path that failed.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DiffStatsError::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            DiffStatsError::UserError(_) => exit_codes::USER_ERROR,
            DiffStatsError::Io { .. } => exit_codes::IO_FAILURE,
            DiffStatsError::ConfigError(_) => exit_codes::CONFIG_ERROR,
            DiffStatsError::WorkerFailed(_) | DiffStatsError::RenderError(_) => {
                exit_codes::INTERNAL_FAILURE
            }
        }
    }
}

/// Result type alias for diffstats operations.
pub type Result<T> = std::result::Result<T, DiffStatsError>;
