//! Path cursor state.
//!
//! One [`RendererState`] tracks one pen: the local pointer, or a single
//! remote source. Keeping them separate is what stops two remote strokes
//! that interleave on the wire from being joined into one zig-zag line.

use whiteboard_core::Point;

/// Stroke progress for one pen.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RendererState {
    last_position: Option<Point>,
    painting: bool,
}

impl RendererState {
    /// Create an idle cursor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a stroke at `point`. Draws nothing on its own.
    pub fn begin(&mut self, point: Point) {
        self.painting = true;
        self.last_position = Some(point);
    }

    /// Advance the cursor to `point`.
    ///
    /// Returns the segment to draw, or `None` when no stroke is in progress.
    pub fn extend(&mut self, point: Point) -> Option<(Point, Point)> {
        if !self.painting {
            return None;
        }
        let from = self.last_position.replace(point)?;
        Some((from, point))
    }

    /// Finish the current stroke.
    pub fn end(&mut self) {
        self.painting = false;
        self.last_position = None;
    }

    /// Whether a stroke is in progress.
    #[must_use]
    pub fn is_painting(&self) -> bool {
        self.painting
    }

    /// The last rendered point, if a stroke is in progress.
    #[must_use]
    pub fn last_position(&self) -> Option<Point> {
        self.last_position
    }
}
