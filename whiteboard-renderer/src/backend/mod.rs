//! Raster backends.

pub mod recording;
#[cfg(feature = "skia")]
pub mod skia;

use whiteboard_core::Point;

use crate::color::Rgba;

/// Line appearance for one segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    /// Stroke color.
    pub color: Rgba,
    /// Stroke width in pixels.
    pub width: f32,
}

/// Trait for surfaces the renderer can paint on.
///
/// Drawing is infallible from the renderer's point of view: a backend that
/// cannot draw a segment skips it.
pub trait RasterBackend {
    /// Draw a straight line from `from` to `to` with round caps.
    fn draw_segment(&mut self, from: Point, to: Point, style: &StrokeStyle);

    /// Wipe the entire surface to `background`.
    fn clear(&mut self, background: Rgba);

    /// Surface size in pixels.
    fn size(&self) -> (u32, u32);
}
