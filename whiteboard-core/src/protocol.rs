//! Server-to-client envelope.
//!
//! Clients send bare [`DrawEvent`]s. The server never echoes an event back to
//! its sender; every other peer receives it wrapped in a `relay` message that
//! names the originating connection, so receivers can keep one path cursor
//! per source.
//!
//! - `{"type": "welcome", "version": "...", "peer_id": "..."}`
//! - `{"type": "relay", "from": "...", "event": {"type": "draw", ...}}`
//! - `{"type": "peer_joined", "peer_id": "..."}`
//! - `{"type": "peer_left", "peer_id": "..."}`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::event::DrawEvent;

/// Server-assigned identity of one relay connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeerId(Uuid);

impl PeerId {
    /// Create a new random peer ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PeerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PeerId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| CoreError::InvalidPeerId(s.to_string()))
    }
}

/// Messages sent from the server to a connected client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// First frame on every connection.
    Welcome {
        /// Server version.
        version: String,
        /// Identity assigned to this connection.
        peer_id: PeerId,
    },
    /// An event published by another connection.
    Relay {
        /// Connection that published the event.
        from: PeerId,
        /// The event itself, unchanged.
        event: DrawEvent,
    },
    /// Another connection joined.
    PeerJoined {
        /// The new connection.
        peer_id: PeerId,
    },
    /// Another connection left. Any stroke it had in progress stays unfinished.
    PeerLeft {
        /// The departed connection.
        peer_id: PeerId,
    },
}

impl ServerMessage {
    /// Encode as JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn encode(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a well-formed server message.
    pub fn decode(text: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Short label for logs and metrics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Welcome { .. } => "welcome",
            Self::Relay { event, .. } => event.kind(),
            Self::PeerJoined { .. } => "peer_joined",
            Self::PeerLeft { .. } => "peer_left",
        }
    }
}
