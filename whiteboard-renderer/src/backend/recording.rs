//! Backend that records drawing operations instead of rasterizing them.

use whiteboard_core::Point;

use super::{RasterBackend, StrokeStyle};
use crate::color::Rgba;

/// A recorded drawing operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RasterOp {
    /// A line segment.
    Segment {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Style it was drawn with.
        style: StrokeStyle,
    },
    /// A full clear.
    Clear(Rgba),
}

/// Records every operation in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    width: u32,
    height: u32,
    ops: Vec<RasterOp>,
}

impl RecordingBackend {
    /// Create an empty recording for a surface of the given size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    /// All operations so far.
    #[must_use]
    pub fn ops(&self) -> &[RasterOp] {
        &self.ops
    }

    /// Segments drawn since the most recent clear, as `(from, to)` pairs.
    #[must_use]
    pub fn visible_segments(&self) -> Vec<(Point, Point)> {
        let start = self
            .ops
            .iter()
            .rposition(|op| matches!(op, RasterOp::Clear(_)))
            .map_or(0, |i| i + 1);
        self.ops[start..]
            .iter()
            .filter_map(|op| match op {
                RasterOp::Segment { from, to, .. } => Some((*from, *to)),
                RasterOp::Clear(_) => None,
            })
            .collect()
    }
}

impl RasterBackend for RecordingBackend {
    fn draw_segment(&mut self, from: Point, to: Point, style: &StrokeStyle) {
        self.ops.push(RasterOp::Segment {
            from,
            to,
            style: *style,
        });
    }

    fn clear(&mut self, background: Rgba) {
        self.ops.push(RasterOp::Clear(background));
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
