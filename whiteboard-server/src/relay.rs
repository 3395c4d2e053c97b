//! Event fan-out between connected peers.
//!
//! Every connection registers a bounded channel with the [`RelayHub`].
//! Publishing an event pushes one [`ServerMessage::Relay`] into every channel
//! except the publisher's. A peer whose queue is full misses that message;
//! delivery is at most once. Ordering per publisher follows from each socket
//! task reading its frames sequentially and each channel being FIFO.
//!
//! Nothing is stored: a peer that joins late sees only events published after
//! it registered.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;
use tokio::sync::mpsc::{self, error::TrySendError};
use whiteboard_core::{DrawEvent, PeerId, ServerMessage};

use crate::metrics::record_relay;
use crate::session::SessionCoordinator;

/// Errors from relay operations.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The peer registry lock was poisoned by a panicking thread.
    #[error("peer registry lock poisoned")]
    LockPoisoned,
    /// The publisher is not registered.
    #[error("unknown peer: {0}")]
    UnknownPeer(PeerId),
}

/// Result type for relay operations.
pub type RelayResult<T> = std::result::Result<T, RelayError>;

/// Messages buffered per peer before further ones are dropped.
pub const PEER_QUEUE_CAPACITY: usize = 1024;

/// Channel end held for one connected peer.
#[derive(Debug, Clone)]
pub struct PeerHandle {
    /// Channel to send messages to this peer.
    pub sender: mpsc::Sender<ServerMessage>,
}

/// Registry of connected peers.
type PeerRegistry = Arc<RwLock<HashMap<PeerId, PeerHandle>>>;

/// Outcome of one fan-out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FanOut {
    /// Peers the message was queued for.
    pub delivered: usize,
    /// Peers whose queue was full or already closed.
    pub dropped: usize,
}

/// Shared relay state.
///
/// Cheap to clone; all clones share one registry.
#[derive(Debug, Clone)]
pub struct RelayHub {
    peers: PeerRegistry,
    sessions: SessionCoordinator,
    queue_capacity: usize,
}

impl Default for RelayHub {
    fn default() -> Self {
        Self::with_capacity(PEER_QUEUE_CAPACITY)
    }
}

impl RelayHub {
    /// Create an empty hub.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty hub whose per-peer queues hold `capacity` messages.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            peers: PeerRegistry::default(),
            sessions: SessionCoordinator::default(),
            queue_capacity: capacity.max(1),
        }
    }

    /// Register a peer connection and announce it to everyone else.
    ///
    /// Returns a receiver for messages sent to this peer.
    pub fn on_connect(&self, peer_id: PeerId) -> mpsc::Receiver<ServerMessage> {
        let (tx, rx) = mpsc::channel(self.queue_capacity);
        match self.peers.write() {
            Ok(mut peers) => {
                peers.insert(peer_id, PeerHandle { sender: tx });
                tracing::info!(peer_id = %peer_id, peers = peers.len(), "Registered peer");
            }
            Err(e) => {
                tracing::error!(
                    peer_id = %peer_id,
                    "Failed to register peer: lock poisoned ({}). \
                     Peer will not receive messages.",
                    e
                );
                return rx;
            }
        }
        self.sessions.opened(peer_id);
        self.fan_out(&ServerMessage::PeerJoined { peer_id }, &peer_id);
        rx
    }

    /// Unregister a peer connection and announce its departure.
    ///
    /// Unknown peers are ignored, so calling this twice is harmless.
    pub fn on_disconnect(&self, peer_id: &PeerId) {
        let removed = match self.peers.write() {
            Ok(mut peers) => peers.remove(peer_id).is_some(),
            Err(e) => {
                tracing::error!(
                    peer_id = %peer_id,
                    "Failed to unregister peer: lock poisoned ({})",
                    e
                );
                false
            }
        };
        if !removed {
            return;
        }

        if let Some(summary) = self.sessions.closed(peer_id) {
            tracing::info!(
                peer_id = %peer_id,
                duration_ms = summary.duration.as_millis(),
                events = summary.events_published,
                "Unregistered peer"
            );
        }
        self.fan_out(&ServerMessage::PeerLeft { peer_id: *peer_id }, peer_id);
    }

    /// Relay an event to every registered peer except `sender`.
    ///
    /// A peer whose queue is full or closed is skipped; the others still
    /// receive the event.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::UnknownPeer`] if `sender` is not registered and
    /// [`RelayError::LockPoisoned`] if the registry is unusable.
    pub fn publish(&self, event: &DrawEvent, sender: &PeerId) -> RelayResult<FanOut> {
        {
            let peers = self.peers.read().map_err(|_| RelayError::LockPoisoned)?;
            if !peers.contains_key(sender) {
                return Err(RelayError::UnknownPeer(*sender));
            }
        }

        let message = ServerMessage::Relay {
            from: *sender,
            event: event.clone(),
        };
        let outcome = self.fan_out(&message, sender);
        self.sessions.record_publish(sender);
        record_relay(outcome.delivered, outcome.dropped);
        Ok(outcome)
    }

    /// Number of registered peers.
    #[must_use]
    pub fn peer_count(&self) -> usize {
        self.peers.read().map_or(0, |peers| peers.len())
    }

    /// Whether the registry lock is usable.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        !self.peers.is_poisoned()
    }

    /// Session bookkeeping shared with this hub.
    #[must_use]
    pub fn sessions(&self) -> &SessionCoordinator {
        &self.sessions
    }

    fn fan_out(&self, message: &ServerMessage, exclude: &PeerId) -> FanOut {
        let mut outcome = FanOut::default();
        match self.peers.read() {
            Ok(peers) => {
                for (peer_id, handle) in peers.iter().filter(|(id, _)| *id != exclude) {
                    match handle.sender.try_send(message.clone()) {
                        Ok(()) => outcome.delivered += 1,
                        Err(TrySendError::Full(_)) => {
                            tracing::warn!(
                                peer_id = %peer_id,
                                message = message.kind(),
                                "Peer queue full; dropping message"
                            );
                            outcome.dropped += 1;
                        }
                        Err(TrySendError::Closed(_)) => {
                            tracing::warn!(
                                peer_id = %peer_id,
                                message = message.kind(),
                                "Peer channel closed; skipping"
                            );
                            outcome.dropped += 1;
                        }
                    }
                }
            }
            Err(e) => {
                tracing::error!(
                    message = message.kind(),
                    "Failed to fan out: lock poisoned ({})",
                    e
                );
            }
        }
        outcome
    }
}
