//! # Whiteboard Renderer
//!
//! Replays stroke samples onto a raster surface.
//!
//! ## Backends
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │          Renderer<B: RasterBackend>         │
//! │  local cursor + one cursor per remote peer  │
//! ├──────────────────────┬──────────────────────┤
//! │ SkiaBackend          │ RecordingBackend     │
//! │ (tiny-skia pixmap)   │ (operation log)      │
//! └──────────────────────┴──────────────────────┘
//! ```
//!
//! Line style is fixed: constant width, round caps, no pressure.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod color;
pub mod error;
pub mod renderer;
pub mod state;

pub use backend::recording::{RasterOp, RecordingBackend};
#[cfg(feature = "skia")]
pub use backend::skia::SkiaBackend;
pub use backend::{RasterBackend, StrokeStyle};
pub use color::{parse_color, Rgba};
pub use error::{RenderError, RenderResult};
pub use renderer::{Renderer, RendererConfig, STROKE_WIDTH};
pub use state::RendererState;
