//! Error types for parley

use parley_providers::ProviderError;
use thiserror::Error;

/// The main error type for parley operations
#[derive(Error, Debug)]
pub enum Error {
    /// Required connection settings missing or malformed; fatal to
    /// session creation
    #[error("Configuration error: {0}")]
    Config(String),

    /// Empty or whitespace-only user input, rejected before any remote
    /// call or history mutation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Remote completion failure, converted at the session-manager
    /// boundary so one failed turn never terminates the session
    #[error("Provider error: {0}")]
    Provider(String),

    /// Session store errors (capacity bound)
    #[error("Session error: {0}")]
    Session(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// A specialized Result type for parley operations
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<ProviderError> for Error {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::Config(msg) => Error::Config(msg),
            other => Error::Provider(other.to_string()),
        }
    }
}
