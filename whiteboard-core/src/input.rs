//! Pointer input for drawing.
//!
//! Mouse, touch and hand-tracking sources all reduce to the same three
//! phases, which map onto begin/extend/end of a stroke.

use serde::{Deserialize, Serialize};

use crate::event::Point;

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    /// Pen touched down; starts a stroke.
    Down,
    /// Pen moved; extends the stroke if one is in progress.
    Move,
    /// Pen lifted; ends the stroke.
    Up,
}

/// A single pointer event in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Phase of this event.
    pub phase: PointerPhase,
    /// Position in canvas pixels.
    pub position: Point,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(phase: PointerPhase, position: Point) -> Self {
        Self { phase, position }
    }

    /// Pointer pressed at `(x, y)`.
    #[must_use]
    pub const fn down(x: f64, y: f64) -> Self {
        Self::new(PointerPhase::Down, Point::new(x, y))
    }

    /// Pointer moved to `(x, y)`.
    #[must_use]
    pub const fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerPhase::Move, Point::new(x, y))
    }

    /// Pointer released at `(x, y)`.
    #[must_use]
    pub const fn up(x: f64, y: f64) -> Self {
        Self::new(PointerPhase::Up, Point::new(x, y))
    }
}
