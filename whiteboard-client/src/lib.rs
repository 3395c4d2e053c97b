//! # Whiteboard Client
//!
//! Headless client for the whiteboard relay.
//!
//! [`ClientSession`] is the drawing side: pointer or hand input in, events to
//! publish out, remote events replayed onto its own surface. It does no I/O.
//! [`RelayConnection`] is the transport side: one WebSocket to the server.
//!
//! ```text
//! PointerEvent ──► ClientSession ──► DrawEvent ──► RelayConnection ──► server
//!                       ▲                                │
//!                       └──────── ServerMessage ◄────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod connection;
pub mod error;
pub mod session;

pub use connection::RelayConnection;
pub use error::{ClientError, ClientResult};
pub use session::ClientSession;
