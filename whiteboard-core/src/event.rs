//! Drawing events exchanged between clients.
//!
//! Every event is a flat JSON record with a `type` discriminator:
//!
//! - `{"type": "draw", "x": 12, "y": 34, "color": "#ff0000", "erasing": false, "newPath": true}`
//! - `{"type": "clear"}`

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;

/// Pen color assumed when a sample arrives without one.
pub const DEFAULT_COLOR: &str = "#000000";

/// A position in the emitting client's canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate in pixels.
    pub x: f64,
    /// Y coordinate in pixels.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// One emitted drawing point.
///
/// Coordinates are not normalized against the receiver's canvas size; a
/// sample lands at the same pixel position on every surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeSample {
    /// X coordinate in pixels.
    pub x: f64,
    /// Y coordinate in pixels.
    pub y: f64,
    /// Opaque color string, parsed only by renderers.
    #[serde(default = "default_color")]
    pub color: String,
    /// Render as an erase stroke (background color, same width).
    #[serde(default)]
    pub erasing: bool,
    /// First sample of a stroke; consumers start a disconnected path.
    #[serde(
        rename = "newPath",
        default,
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub new_path: bool,
}

impl StrokeSample {
    /// Create a sample that continues the current stroke.
    #[must_use]
    pub fn new(point: Point, color: impl Into<String>, erasing: bool) -> Self {
        Self {
            x: point.x,
            y: point.y,
            color: color.into(),
            erasing,
            new_path: false,
        }
    }

    /// Create the head sample of a new stroke.
    #[must_use]
    pub fn starting_path(point: Point, color: impl Into<String>, erasing: bool) -> Self {
        Self {
            new_path: true,
            ..Self::new(point, color, erasing)
        }
    }

    /// The sample position.
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A drawing event: either a stroke sample or a full-canvas clear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DrawEvent {
    /// One point of a stroke.
    Draw(StrokeSample),
    /// Erase the entire surface.
    Clear,
}

impl DrawEvent {
    /// Encode the event as a JSON record.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn encode(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode an event from a JSON record.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a well-formed event.
    pub fn decode(text: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Short label for logs and metrics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Draw(_) => "draw",
            Self::Clear => "clear",
        }
    }
}

impl From<StrokeSample> for DrawEvent {
    fn from(sample: StrokeSample) -> Self {
        Self::Draw(sample)
    }
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}
