//! Error types for the note store adapter

use thiserror::Error;

/// Result type alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors surfaced by the note store adapter.
///
/// Store failures are logged and degrade to "nothing changed"; none of them
/// are fatal to the process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Transient transport failure
    #[error("Network error: {0}")]
    Network(String),

    /// The store rejected the request for this identity (401/403)
    #[error("Permission denied: {0}")]
    Permission(String),

    /// Anything else, including malformed documents at the schema boundary
    #[error("Store error: {0}")]
    Unknown(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(error: reqwest::Error) -> Self {
        Self::Network(error.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(error: serde_json::Error) -> Self {
        Self::Unknown(format!("malformed document: {error}"))
    }
}
