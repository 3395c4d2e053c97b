//! Error types for the event model.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while encoding or decoding whiteboard events.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Event could not be serialized or parsed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Peer identifier was not a valid UUID.
    #[error("Invalid peer ID: {0}")]
    InvalidPeerId(String),
}
