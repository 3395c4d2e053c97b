//! Local pen state.
//!
//! The pen belongs to one client and never crosses the wire; only the
//! samples it stamps do.

use serde::{Deserialize, Serialize};

use crate::event::{Point, StrokeSample, DEFAULT_COLOR};

/// Color emitted on samples drawn in erase mode.
pub const ERASE_COLOR: &str = "#ffffff";

/// Current color and erase toggle of the local pen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenState {
    /// Active pen color.
    pub color: String,
    /// Erase mode toggle.
    pub erasing: bool,
}

impl PenState {
    /// Create a black drawing pen.
    #[must_use]
    pub fn new() -> Self {
        Self {
            color: DEFAULT_COLOR.to_string(),
            erasing: false,
        }
    }

    /// Change the pen color. Erase mode is left untouched.
    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into();
    }

    /// Switch between drawing and erasing.
    pub fn set_erasing(&mut self, erasing: bool) {
        self.erasing = erasing;
    }

    /// Color that goes on the wire for the current mode.
    #[must_use]
    pub fn stroke_color(&self) -> &str {
        if self.erasing {
            ERASE_COLOR
        } else {
            &self.color
        }
    }

    /// Stamp a sample at `point` with the current pen settings.
    #[must_use]
    pub fn sample(&self, point: Point, new_path: bool) -> StrokeSample {
        if new_path {
            StrokeSample::starting_path(point, self.stroke_color(), self.erasing)
        } else {
            StrokeSample::new(point, self.stroke_color(), self.erasing)
        }
    }
}

impl Default for PenState {
    fn default() -> Self {
        Self::new()
    }
}
