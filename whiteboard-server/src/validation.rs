//! Input validation for untrusted data.
//!
//! Every inbound frame passes through here before it is relayed. Failures
//! are dropped by the caller; nothing in this module closes a connection.

use thiserror::Error;
use whiteboard_core::DrawEvent;

/// Maximum WebSocket text frame accepted for relay.
pub const MAX_WS_MESSAGE_SIZE: usize = 65_536; // 64KB
/// Maximum length of a sample's color string.
pub const MAX_COLOR_LEN: usize = 64;

/// Validation error types.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// WebSocket message exceeds maximum size.
    #[error("message too large (max {MAX_WS_MESSAGE_SIZE} bytes)")]
    MessageTooLarge,
    /// A coordinate is NaN or infinite.
    #[error("coordinates must be finite")]
    NonFiniteCoordinate,
    /// Color string is empty.
    #[error("color must not be empty")]
    EmptyColor,
    /// Color string exceeds maximum length.
    #[error("color too long (max {MAX_COLOR_LEN} bytes)")]
    ColorTooLong,
}

impl ValidationError {
    /// Label used for the validation failure metric.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MessageTooLarge => "message_size",
            Self::NonFiniteCoordinate => "coordinate",
            Self::EmptyColor | Self::ColorTooLong => "color",
        }
    }
}

/// Validate WebSocket message size.
///
/// # Errors
///
/// Returns [`ValidationError::MessageTooLarge`] if the message exceeds 64KB.
pub fn validate_message_size(size: usize) -> Result<(), ValidationError> {
    if size > MAX_WS_MESSAGE_SIZE {
        return Err(ValidationError::MessageTooLarge);
    }
    Ok(())
}

/// Validate a color string. Its content stays opaque; only the length is checked.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyColor`] or [`ValidationError::ColorTooLong`].
pub fn validate_color(color: &str) -> Result<(), ValidationError> {
    if color.trim().is_empty() {
        return Err(ValidationError::EmptyColor);
    }
    if color.len() > MAX_COLOR_LEN {
        return Err(ValidationError::ColorTooLong);
    }
    Ok(())
}

/// Validate a decoded drawing event.
///
/// Coordinates are not bounds-checked: each client draws in its own pixel
/// space and the relay passes positions through as emitted.
///
/// # Errors
///
/// Returns the first validation failure found.
pub fn validate_event(event: &DrawEvent) -> Result<(), ValidationError> {
    match event {
        DrawEvent::Draw(sample) => {
            if !sample.position().is_finite() {
                return Err(ValidationError::NonFiniteCoordinate);
            }
            validate_color(&sample.color)
        }
        DrawEvent::Clear => Ok(()),
    }
}
