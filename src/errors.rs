use thiserror::Error;

use crate::decoder::DecodeError;

/// Application-wide error type - single point of truth
#[derive(Error, Debug)]
pub enum AppError {
    /// File I/O operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration issues
    #[error("Configuration error: {0}")]
    Config(String),

    /// Hex input that does not parse
    #[error("Invalid hex input: {0}")]
    Hex(#[from] hex::FromHexError),

    /// Wire decoding failures that stop a whole message
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Command name not present in the decoder registry
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Data validation/parsing
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Output rendering
    #[error("Output error: {0}")]
    Output(String),
}

/// Application-wide result type - single point of truth
pub type AppResult<T> = Result<T, AppError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Output(format!("JSON error: {}", err))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}
