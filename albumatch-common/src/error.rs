//! Common error types for albumatch

use thiserror::Error;

/// Common result type for albumatch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the albumatch crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
