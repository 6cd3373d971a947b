//! Error types for sheetsite.
//!
//! Library crates use [`SheetsiteError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all sheetsite operations.
#[derive(Debug, thiserror::Error)]
pub enum SheetsiteError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP error while fetching a sheet or submitting feedback.
    #[error("network error: {0}")]
    Network(String),

    /// The fetched body could not be used as CSV content.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Input validation error (form fields, attachments, section names).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// The feedback endpoint answered but refused the submission.
    #[error("submission rejected: {0}")]
    Rejected(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SheetsiteError>;

impl SheetsiteError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
