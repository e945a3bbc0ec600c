//! Common error types for salescast

use thiserror::Error;

/// Common result type for salescast operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the forecasting pipeline and its supporting layers
#[derive(Error, Debug)]
pub enum Error {
    /// Request input that cannot be interpreted (unparseable date,
    /// product family unknown to the trained encoders)
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Model artifact load or scoring failure
    #[error("Model scoring failed: {0}")]
    ModelScoring(String),

    /// History log write/read failure (wraps sqlx::Error)
    #[error("Persistence error: {0}")]
    Persistence(#[from] sqlx::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// User-visible message for a failed prediction request.
    ///
    /// Every pipeline failure collapses to one error-prefixed string; the
    /// caller re-renders the form with this message in place of a result.
    pub fn user_message(&self) -> String {
        format!("Error: {}", self)
    }
}
