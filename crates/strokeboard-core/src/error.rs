//! Error types for the editing surface.

use thiserror::Error;

/// Errors surfaced to the host by configuration and creation APIs.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Creation mode outside `path`, `rect`, `ellipse`, `circle`.
    #[error("Unsupported shape kind: {0}")]
    UnsupportedKind(String),
    #[error("Invalid view box: {0}")]
    InvalidViewBox(String),
    #[error("Invalid color: {0}")]
    InvalidColor(String),
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;
