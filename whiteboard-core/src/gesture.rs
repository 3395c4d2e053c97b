//! Hand-tracking input adapter.
//!
//! A landmark model (external) reports fingertip positions once per video
//! frame. The pen is considered down while the index fingertip is closer to
//! the camera than the thumb tip, i.e. its depth value is smaller.

use serde::{Deserialize, Serialize};

use crate::event::Point;
use crate::input::{PointerEvent, PointerPhase};

/// Fingertip landmarks for one detected hand, as `[x, y, z]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandLandmarks {
    /// Index fingertip.
    pub index_tip: [f64; 3],
    /// Thumb tip.
    pub thumb_tip: [f64; 3],
}

impl HandLandmarks {
    /// Whether this pose means "pen down".
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.index_tip[2] < self.thumb_tip[2]
    }

    /// Canvas position of the index fingertip.
    #[must_use]
    pub fn pointer_position(&self) -> Point {
        Point::new(self.index_tip[0], self.index_tip[1])
    }
}

/// Turns a stream of per-frame hand detections into pointer events.
#[derive(Debug, Clone, Copy, Default)]
pub struct PinchTracker {
    drawing: bool,
    last: Point,
}

impl PinchTracker {
    /// Create a tracker with the pen up.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the tracked pen is currently down.
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Feed one frame. `None` means no hand was detected, which leaves the
    /// pen state unchanged and emits nothing.
    pub fn observe(&mut self, hand: Option<&HandLandmarks>) -> Option<PointerEvent> {
        let hand = hand?;
        let position = hand.pointer_position();

        let phase = match (self.drawing, hand.is_drawing()) {
            (false, true) => PointerPhase::Down,
            (true, true) => PointerPhase::Move,
            (true, false) => PointerPhase::Up,
            (false, false) => return None,
        };

        self.drawing = phase != PointerPhase::Up;
        // Lift at the last drawn point so the release never adds a segment.
        let at = if phase == PointerPhase::Up {
            self.last
        } else {
            position
        };
        self.last = position;
        tracing::trace!(?phase, x = at.x, y = at.y, "hand pose");
        Some(PointerEvent::new(phase, at))
    }
}
