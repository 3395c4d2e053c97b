//! # Whiteboard Core
//!
//! Shared model for the collaborative whiteboard: the drawing events that
//! travel over the relay, the envelope the server wraps them in, and the
//! adapters that turn raw pointer or hand-tracking input into strokes.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │                whiteboard-core                 │
//! ├────────────────────────┬───────────────────────┤
//! │  Wire model            │  Input                │
//! │  - StrokeSample        │  - PointerEvent       │
//! │  - DrawEvent           │  - PinchTracker       │
//! │  - ServerMessage       │  - PenState           │
//! └────────────────────────┴───────────────────────┘
//! ```
//!
//! A stroke is a `newPath` sample followed by any number of plain samples.
//! Nothing here is persisted; every event is sent once and forgotten.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod event;
pub mod gesture;
pub mod input;
pub mod pen;
pub mod protocol;

pub use error::{CoreError, CoreResult};
pub use event::{DrawEvent, Point, StrokeSample, DEFAULT_COLOR};
pub use gesture::{HandLandmarks, PinchTracker};
pub use input::{PointerEvent, PointerPhase};
pub use pen::{PenState, ERASE_COLOR};
pub use protocol::{PeerId, ServerMessage};

/// Protocol version reported in the welcome message.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
