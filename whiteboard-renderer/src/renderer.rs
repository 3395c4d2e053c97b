//! Stroke replay onto a raster backend.

use std::collections::HashMap;

use whiteboard_core::{DrawEvent, PeerId, PenState, Point, StrokeSample};

use crate::backend::{RasterBackend, StrokeStyle};
use crate::color::{parse_color, Rgba};
use crate::state::RendererState;

/// Fixed stroke width in pixels.
pub const STROKE_WIDTH: f32 = 5.0;

/// Configuration for a renderer.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Background color; erase strokes paint with it.
    pub background: Rgba,
    /// Stroke width in pixels.
    pub stroke_width: f32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background: Rgba::WHITE,
            stroke_width: STROKE_WIDTH,
        }
    }
}

/// Paints local and remote strokes onto one surface.
///
/// The local pen and every remote source get their own [`RendererState`],
/// so strokes from different sources never join up even when their samples
/// arrive interleaved.
pub struct Renderer<B> {
    backend: B,
    background: Rgba,
    stroke_width: f32,
    pen: PenState,
    local: RendererState,
    remote: HashMap<PeerId, RendererState>,
}

impl<B: RasterBackend> Renderer<B> {
    /// Wrap an existing backend.
    #[must_use]
    pub fn with_backend(backend: B, config: &RendererConfig) -> Self {
        Self {
            backend,
            background: config.background,
            stroke_width: config.stroke_width,
            pen: PenState::new(),
            local: RendererState::new(),
            remote: HashMap::new(),
        }
    }

    /// The local pen.
    #[must_use]
    pub fn pen(&self) -> &PenState {
        &self.pen
    }

    /// Mutable access to the local pen.
    pub fn pen_mut(&mut self) -> &mut PenState {
        &mut self.pen
    }

    /// Start a local stroke at `point`.
    pub fn begin_stroke(&mut self, point: Point) {
        self.local.begin(point);
    }

    /// Continue the local stroke to `point` using the pen's color and mode.
    ///
    /// Returns `false`, drawing nothing, when no local stroke is in progress.
    pub fn extend_stroke(&mut self, point: Point) -> bool {
        let Some((from, to)) = self.local.extend(point) else {
            return false;
        };
        if let Some(style) = self.style_for(&self.pen.color, self.pen.erasing) {
            self.backend.draw_segment(from, to, &style);
        }
        true
    }

    /// Finish the local stroke.
    pub fn end_stroke(&mut self) {
        self.local.end();
    }

    /// Wipe the surface and drop every stroke in progress, local and remote.
    pub fn clear_surface(&mut self) {
        self.backend.clear(self.background);
        self.local.end();
        self.remote.clear();
    }

    /// Replay an event published by `source`.
    pub fn apply_remote(&mut self, source: PeerId, event: &DrawEvent) {
        match event {
            DrawEvent::Draw(sample) => self.replay_sample(source, sample),
            DrawEvent::Clear => {
                tracing::debug!(%source, "remote clear");
                self.clear_surface();
            }
        }
    }

    /// Drop the path cursor of a departed source.
    pub fn forget_source(&mut self, source: &PeerId) {
        self.remote.remove(source);
    }

    /// The local path cursor.
    #[must_use]
    pub fn local_state(&self) -> &RendererState {
        &self.local
    }

    /// The path cursor for `source`, if it has drawn since the last clear.
    #[must_use]
    pub fn remote_state(&self, source: &PeerId) -> Option<&RendererState> {
        self.remote.get(source)
    }

    /// The underlying backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Surface dimensions in pixels.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        self.backend.size()
    }

    /// Background color of the surface.
    #[must_use]
    pub fn background(&self) -> Rgba {
        self.background
    }

    fn replay_sample(&mut self, source: PeerId, sample: &StrokeSample) {
        let cursor = self.remote.entry(source).or_default();
        if sample.new_path {
            cursor.begin(sample.position());
            return;
        }
        let Some((from, to)) = cursor.extend(sample.position()) else {
            tracing::trace!(%source, "sample outside a stroke ignored");
            return;
        };
        if let Some(style) = self.style_for(&sample.color, sample.erasing) {
            self.backend.draw_segment(from, to, &style);
        }
    }

    fn style_for(&self, color: &str, erasing: bool) -> Option<StrokeStyle> {
        let color = if erasing {
            self.background
        } else {
            match parse_color(color) {
                Ok(color) => color,
                Err(e) => {
                    tracing::debug!("segment skipped: {}", e);
                    return None;
                }
            }
        };
        Some(StrokeStyle {
            color,
            width: self.stroke_width,
        })
    }
}

#[cfg(feature = "skia")]
impl Renderer<crate::backend::skia::SkiaBackend> {
    /// Create a renderer on a fresh tiny-skia surface.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot be allocated.
    pub fn new(config: &RendererConfig) -> crate::RenderResult<Self> {
        let backend =
            crate::backend::skia::SkiaBackend::new(config.width, config.height, config.background)?;
        Ok(Self::with_backend(backend, config))
    }

    /// Whether nothing is visible on the surface.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.backend.is_uniform(self.background)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::recording::{RasterOp, RecordingBackend};
    use whiteboard_core::ERASE_COLOR;

    fn recording() -> Renderer<RecordingBackend> {
        Renderer::with_backend(RecordingBackend::new(100, 100), &RendererConfig::default())
    }

    fn draw(x: f64, y: f64, color: &str) -> DrawEvent {
        DrawEvent::Draw(StrokeSample::new(Point::new(x, y), color, false))
    }

    fn head(x: f64, y: f64, color: &str) -> DrawEvent {
        DrawEvent::Draw(StrokeSample::starting_path(Point::new(x, y), color, false))
    }

    #[test]
    fn test_size_matches_backend() {
        assert_eq!(recording().size(), (100, 100));
        let wide =
            Renderer::with_backend(RecordingBackend::new(800, 600), &RendererConfig::default());
        assert_eq!(wide.size(), (800, 600));
    }

    #[test]
    fn test_remote_coordinates_reach_backend_unrounded() {
        let mut renderer = recording();
        let source = PeerId::new();
        renderer.apply_remote(source, &head(123.456_789_012, 0.0, "#000"));
        renderer.apply_remote(source, &draw(16_777_217.0, 1.0, "#000"));
        assert_eq!(
            renderer.backend().visible_segments(),
            vec![(Point::new(123.456_789_012, 0.0), Point::new(16_777_217.0, 1.0))]
        );
    }

    #[test]
    fn test_extend_without_begin_draws_nothing() {
        let mut renderer = recording();
        assert!(!renderer.extend_stroke(Point::new(5.0, 5.0)));
        assert!(renderer.backend().ops().is_empty());
    }

    #[test]
    fn test_begin_alone_draws_nothing() {
        let mut renderer = recording();
        renderer.begin_stroke(Point::new(5.0, 5.0));
        assert!(renderer.backend().ops().is_empty());
        assert!(renderer.local_state().is_painting());
    }

    #[test]
    fn test_local_stroke_uses_pen() {
        let mut renderer = recording();
        renderer.pen_mut().set_color("#00ff00");
        renderer.begin_stroke(Point::new(0.0, 0.0));
        assert!(renderer.extend_stroke(Point::new(10.0, 0.0)));

        let [RasterOp::Segment { style, .. }] = renderer.backend().ops() else {
            panic!("expected one segment");
        };
        assert_eq!(style.color, Rgba::opaque(0, 255, 0));
        assert!((style.width - STROKE_WIDTH).abs() < f32::EPSILON);
    }

    #[test]
    fn test_local_erase_paints_background() {
        let mut renderer = recording();
        renderer.pen_mut().set_erasing(true);
        renderer.begin_stroke(Point::new(0.0, 0.0));
        renderer.extend_stroke(Point::new(10.0, 0.0));

        let [RasterOp::Segment { style, .. }] = renderer.backend().ops() else {
            panic!("expected one segment");
        };
        assert_eq!(style.color, Rgba::WHITE);
    }

    #[test]
    fn test_end_stroke_breaks_path() {
        let mut renderer = recording();
        renderer.begin_stroke(Point::new(0.0, 0.0));
        renderer.extend_stroke(Point::new(10.0, 0.0));
        renderer.end_stroke();
        assert!(!renderer.extend_stroke(Point::new(20.0, 0.0)));
        renderer.begin_stroke(Point::new(50.0, 50.0));
        renderer.extend_stroke(Point::new(60.0, 50.0));

        assert_eq!(
            renderer.backend().visible_segments(),
            vec![
                (Point::new(0.0, 0.0), Point::new(10.0, 0.0)),
                (Point::new(50.0, 50.0), Point::new(60.0, 50.0)),
            ]
        );
    }

    #[test]
    fn test_clear_requires_new_begin() {
        let mut renderer = recording();
        renderer.begin_stroke(Point::new(0.0, 0.0));
        renderer.clear_surface();
        assert!(!renderer.extend_stroke(Point::new(1.0, 1.0)));
        assert!(!renderer.extend_stroke(Point::new(2.0, 2.0)));
        assert!(renderer.backend().visible_segments().is_empty());

        renderer.begin_stroke(Point::new(3.0, 3.0));
        assert!(renderer.extend_stroke(Point::new(4.0, 4.0)));
        assert_eq!(renderer.backend().visible_segments().len(), 1);
    }

    #[test]
    fn test_remote_uses_sample_style() {
        let mut renderer = recording();
        renderer.pen_mut().set_erasing(true);
        let peer = PeerId::new();

        renderer.apply_remote(peer, &head(0.0, 0.0, "#0000ff"));
        renderer.apply_remote(peer, &draw(5.0, 5.0, "#0000ff"));

        let [RasterOp::Segment { style, .. }] = renderer.backend().ops() else {
            panic!("expected one segment");
        };
        assert_eq!(style.color, Rgba::opaque(0, 0, 255));
    }

    #[test]
    fn test_remote_erase_sample() {
        let mut renderer = recording();
        let peer = PeerId::new();
        renderer.apply_remote(
            peer,
            &DrawEvent::Draw(StrokeSample::starting_path(
                Point::new(0.0, 0.0),
                ERASE_COLOR,
                true,
            )),
        );
        renderer.apply_remote(
            peer,
            &DrawEvent::Draw(StrokeSample::new(Point::new(9.0, 0.0), ERASE_COLOR, true)),
        );

        let [RasterOp::Segment { style, .. }] = renderer.backend().ops() else {
            panic!("expected one segment");
        };
        assert_eq!(style.color, renderer.background());
    }

    #[test]
    fn test_remote_sample_without_head_ignored() {
        let mut renderer = recording();
        renderer.apply_remote(PeerId::new(), &draw(5.0, 5.0, "#000"));
        assert!(renderer.backend().ops().is_empty());
    }

    #[test]
    fn test_interleaved_sources_do_not_cross_connect() {
        let mut renderer = recording();
        let a = PeerId::new();
        let b = PeerId::new();

        renderer.apply_remote(a, &head(0.0, 0.0, "#000"));
        renderer.apply_remote(b, &head(100.0, 100.0, "#000"));
        renderer.apply_remote(a, &draw(10.0, 0.0, "#000"));
        renderer.apply_remote(b, &draw(100.0, 90.0, "#000"));
        renderer.apply_remote(a, &draw(20.0, 0.0, "#000"));

        assert_eq!(
            renderer.backend().visible_segments(),
            vec![
                (Point::new(0.0, 0.0), Point::new(10.0, 0.0)),
                (Point::new(100.0, 100.0), Point::new(100.0, 90.0)),
                (Point::new(10.0, 0.0), Point::new(20.0, 0.0)),
            ]
        );
    }

    #[test]
    fn test_remote_does_not_disturb_local_stroke() {
        let mut renderer = recording();
        renderer.begin_stroke(Point::new(0.0, 0.0));
        renderer.apply_remote(PeerId::new(), &head(50.0, 50.0, "#000"));
        renderer.extend_stroke(Point::new(0.0, 10.0));

        assert_eq!(
            renderer.backend().visible_segments(),
            vec![(Point::new(0.0, 0.0), Point::new(0.0, 10.0))]
        );
    }

    #[test]
    fn test_unparseable_color_advances_cursor() {
        let mut renderer = recording();
        let peer = PeerId::new();
        renderer.apply_remote(peer, &head(0.0, 0.0, "#000"));
        renderer.apply_remote(peer, &draw(10.0, 0.0, "not-a-color"));
        renderer.apply_remote(peer, &draw(20.0, 0.0, "#000"));

        assert_eq!(
            renderer.backend().visible_segments(),
            vec![(Point::new(10.0, 0.0), Point::new(20.0, 0.0))]
        );
    }

    #[test]
    fn test_forget_source_drops_cursor() {
        let mut renderer = recording();
        let peer = PeerId::new();
        renderer.apply_remote(peer, &head(0.0, 0.0, "#000"));
        assert!(renderer.remote_state(&peer).is_some());

        renderer.forget_source(&peer);
        renderer.apply_remote(peer, &draw(10.0, 0.0, "#000"));
        assert!(renderer.backend().ops().is_empty());
    }

    #[test]
    fn test_samples_then_clear_leave_blank_surface() {
        let mut renderer = Renderer::new(&RendererConfig {
            width: 64,
            height: 64,
            ..RendererConfig::default()
        })
        .expect("renderer");
        let peer = PeerId::new();

        renderer.apply_remote(peer, &head(0.0, 0.0, "#000"));
        renderer.apply_remote(peer, &draw(10.0, 0.0, "#000"));
        renderer.apply_remote(peer, &draw(10.0, 10.0, "#000"));
        assert!(!renderer.is_blank());

        renderer.apply_remote(peer, &DrawEvent::Clear);
        assert!(renderer.is_blank());
    }
}
