//! Error types for `LifeRPG` core library.

use thiserror::Error;

/// Result type alias using `LifeRPG` Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for `LifeRPG` operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed tier, payload, count or date
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
