//! Renderer error types.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Surface could not be allocated.
    #[error("Surface error: {0}")]
    Surface(String),

    /// Color string could not be parsed.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Snapshot encoding failed.
    #[error("Export failed: {0}")]
    Export(String),
}
