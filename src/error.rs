//! Error types for booking state

use thiserror::Error;

/// Result type for state operations
pub type Result<T> = std::result::Result<T, StateError>;

/// Key-value store error
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem read/write failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Host storage backend reported a failure
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// State error types
#[derive(Debug, Error)]
pub enum StateError {
    /// Field name not declared on the form
    #[error("Unknown form field: {0}")]
    UnknownField(String),

    /// Field name declared twice when building a form
    #[error("Duplicate form field: {0}")]
    DuplicateField(String),

    /// Persistence failure
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for StateError {
    fn from(err: toml::de::Error) -> Self {
        StateError::Config(err.to_string())
    }
}

/// Failure reported by the data-fetch collaborator.
///
/// Carries the human-readable message the host's fetch layer produced.
#[derive(Debug, Clone, Error)]
#[error("Fetch error: {message}")]
pub struct FetchError {
    pub message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
