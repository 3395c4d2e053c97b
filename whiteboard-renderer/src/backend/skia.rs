//! CPU raster backend on a tiny-skia pixmap.

use tiny_skia::{
    Color, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PremultipliedColorU8, Stroke, Transform,
};
use whiteboard_core::Point;

use super::{RasterBackend, StrokeStyle};
use crate::color::Rgba;
use crate::error::{RenderError, RenderResult};

/// An RGBA pixmap the renderer paints into.
pub struct SkiaBackend {
    pixmap: Pixmap,
}

impl SkiaBackend {
    /// Allocate a surface filled with `background`.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or the pixmap is too large.
    pub fn new(width: u32, height: u32, background: Rgba) -> RenderResult<Self> {
        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
            RenderError::Surface(format!("cannot allocate {width}x{height} pixmap"))
        })?;
        pixmap.fill(to_skia(background));
        Ok(Self { pixmap })
    }

    /// Read one pixel, un-premultiplied.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            Rgba {
                r: c.red(),
                g: c.green(),
                b: c.blue(),
                a: c.alpha(),
            }
        })
    }

    /// Whether every pixel equals `background`.
    #[must_use]
    pub fn is_uniform(&self, background: Rgba) -> bool {
        let expected = premultiplied(background);
        self.pixmap.pixels().iter().all(|p| *p == expected)
    }

    /// Raw premultiplied RGBA bytes, row-major.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Encode the surface as PNG.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn encode_png(&self) -> RenderResult<Vec<u8>> {
        self.pixmap
            .encode_png()
            .map_err(|e| RenderError::Export(format!("PNG encoding failed: {e}")))
    }
}

impl RasterBackend for SkiaBackend {
    // tiny-skia paths are single precision.
    #[allow(clippy::cast_possible_truncation)]
    fn draw_segment(&mut self, from: Point, to: Point, style: &StrokeStyle) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x as f32, from.y as f32);
        pb.line_to(to.x as f32, to.y as f32);
        let Some(path) = pb.finish() else {
            tracing::trace!(?from, ?to, "degenerate segment skipped");
            return;
        };

        let mut paint = Paint::default();
        paint.set_color(to_skia(style.color));
        paint.anti_alias = true;

        let stroke = Stroke {
            width: style.width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };

        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    fn clear(&mut self, background: Rgba) {
        self.pixmap.fill(to_skia(background));
    }

    fn size(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }
}

fn to_skia(color: Rgba) -> Color {
    Color::from_rgba8(color.r, color.g, color.b, color.a)
}

fn premultiplied(color: Rgba) -> PremultipliedColorU8 {
    to_skia(color).premultiply().to_color_u8()
}
