//! Per-connection bookkeeping.
//!
//! Tracks when each connection opened and how much it has published. Nothing
//! here affects delivery; it feeds logs, metrics and the readiness probe.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use whiteboard_core::PeerId;

use crate::metrics::set_ws_connections;

/// Live data about one connection.
#[derive(Debug, Clone, Copy)]
pub struct SessionInfo {
    /// When the connection was accepted.
    pub connected_at: Instant,
    /// Events this connection has published.
    pub events_published: u64,
}

/// Summary emitted when a connection closes.
#[derive(Debug, Clone, Copy)]
pub struct SessionSummary {
    /// How long the connection stayed open.
    pub duration: Duration,
    /// Events it published.
    pub events_published: u64,
}

/// Registry of open sessions keyed by peer.
#[derive(Debug, Clone, Default)]
pub struct SessionCoordinator {
    sessions: Arc<RwLock<HashMap<PeerId, SessionInfo>>>,
}

impl SessionCoordinator {
    /// Create an empty coordinator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly accepted connection.
    pub fn opened(&self, peer_id: PeerId) {
        match self.sessions.write() {
            Ok(mut sessions) => {
                sessions.insert(
                    peer_id,
                    SessionInfo {
                        connected_at: Instant::now(),
                        events_published: 0,
                    },
                );
                set_ws_connections(sessions.len());
            }
            Err(e) => {
                tracing::error!(peer_id = %peer_id, "Failed to open session: lock poisoned ({})", e);
            }
        }
    }

    /// Record a closed connection and return its summary.
    pub fn closed(&self, peer_id: &PeerId) -> Option<SessionSummary> {
        match self.sessions.write() {
            Ok(mut sessions) => {
                let info = sessions.remove(peer_id)?;
                set_ws_connections(sessions.len());
                Some(SessionSummary {
                    duration: info.connected_at.elapsed(),
                    events_published: info.events_published,
                })
            }
            Err(e) => {
                tracing::error!(peer_id = %peer_id, "Failed to close session: lock poisoned ({})", e);
                None
            }
        }
    }

    /// Count one published event against a session.
    pub fn record_publish(&self, peer_id: &PeerId) {
        match self.sessions.write() {
            Ok(mut sessions) => {
                if let Some(info) = sessions.get_mut(peer_id) {
                    info.events_published += 1;
                }
            }
            Err(e) => {
                tracing::error!(peer_id = %peer_id, "Failed to count publish: lock poisoned ({})", e);
            }
        }
    }

    /// Look up a session.
    #[must_use]
    pub fn get(&self, peer_id: &PeerId) -> Option<SessionInfo> {
        self.sessions
            .read()
            .ok()
            .and_then(|sessions| sessions.get(peer_id).copied())
    }

    /// Number of open sessions.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.sessions.read().map_or(0, |sessions| sessions.len())
    }
}
