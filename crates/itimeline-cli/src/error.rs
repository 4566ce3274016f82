//! CLI error types.

use std::io;

use thiserror::Error;

use itimeline_core::{RenderError, TracingError};

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// IO error (input file, stdin).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Payload or output serialization failed.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// JSON output failed.
    #[error("failed to write JSON output: {0}")]
    Json(#[from] serde_json::Error),

    /// Logging could not be initialized.
    #[error(transparent)]
    Tracing(#[from] TracingError),

    /// `check` found dropped options or lines.
    #[error("{count} problem(s) found")]
    Rejected { count: usize },
}

impl CliError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
