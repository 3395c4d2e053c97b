//! Error types for the whiteboard client.

use thiserror::Error;
use tokio_tungstenite::tungstenite;
use whiteboard_core::CoreError;
use whiteboard_renderer::RenderError;

/// Errors that can occur in client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// WebSocket transport failed.
    #[error("transport error: {0}")]
    Transport(Box<tungstenite::Error>),

    /// An event could not be encoded or decoded.
    #[error("protocol error: {0}")]
    Protocol(#[from] CoreError),

    /// The local surface failed.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// The server did not open with a welcome frame.
    #[error("handshake failed: {0}")]
    Handshake(String),

    /// The server closed the connection.
    #[error("connection closed")]
    Closed,
}

impl From<tungstenite::Error> for ClientError {
    fn from(e: tungstenite::Error) -> Self {
        Self::Transport(Box::new(e))
    }
}

/// Result type for client operations.
pub type ClientResult<T> = std::result::Result<T, ClientError>;
