//! Local drawing session.

use whiteboard_core::{
    DrawEvent, HandLandmarks, PeerId, PinchTracker, PointerEvent, PointerPhase, ServerMessage,
};
use whiteboard_renderer::{Renderer, RendererConfig, SkiaBackend};

use crate::error::ClientResult;

/// One user's view of the shared board.
///
/// Local input is rendered immediately and turned into the events to
/// publish; relayed events from other peers are replayed onto the same
/// surface with their own path cursors.
pub struct ClientSession {
    renderer: Renderer<SkiaBackend>,
    hand: PinchTracker,
    peer_id: Option<PeerId>,
}

impl ClientSession {
    /// Create a session with a blank surface.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot be allocated.
    pub fn new(config: &RendererConfig) -> ClientResult<Self> {
        Ok(Self {
            renderer: Renderer::new(config)?,
            hand: PinchTracker::new(),
            peer_id: None,
        })
    }

    /// Identity assigned by the server, once known.
    #[must_use]
    pub fn peer_id(&self) -> Option<PeerId> {
        self.peer_id
    }

    /// Record the identity assigned by the server.
    pub fn set_peer_id(&mut self, peer_id: PeerId) {
        self.peer_id = Some(peer_id);
    }

    /// Set the pen color.
    pub fn set_color(&mut self, color: impl Into<String>) {
        self.renderer.pen_mut().set_color(color);
    }

    /// Toggle the eraser.
    pub fn set_erasing(&mut self, erasing: bool) {
        self.renderer.pen_mut().set_erasing(erasing);
    }

    /// Handle a pointer event and return the event to publish, if any.
    ///
    /// A press starts a path and publishes its head sample. A move publishes
    /// only while the pointer is down. A release publishes nothing.
    pub fn pointer(&mut self, event: PointerEvent) -> Option<DrawEvent> {
        match event.phase {
            PointerPhase::Down => {
                self.renderer.begin_stroke(event.position);
                Some(DrawEvent::from(self.renderer.pen().sample(event.position, true)))
            }
            PointerPhase::Move => self
                .renderer
                .extend_stroke(event.position)
                .then(|| DrawEvent::from(self.renderer.pen().sample(event.position, false))),
            PointerPhase::Up => {
                self.renderer.end_stroke();
                None
            }
        }
    }

    /// Feed one hand-tracking frame; `None` means no hand was detected.
    pub fn hand_frame(&mut self, hand: Option<&HandLandmarks>) -> Option<DrawEvent> {
        let event = self.hand.observe(hand)?;
        self.pointer(event)
    }

    /// Clear the board locally and return the event to publish.
    pub fn clear(&mut self) -> DrawEvent {
        self.renderer.clear_surface();
        DrawEvent::Clear
    }

    /// Apply a message received from the server.
    pub fn apply(&mut self, message: &ServerMessage) {
        match message {
            ServerMessage::Welcome { peer_id, .. } => self.set_peer_id(*peer_id),
            ServerMessage::Relay { from, event } => {
                if Some(*from) == self.peer_id {
                    tracing::debug!("ignoring relayed copy of own event");
                    return;
                }
                self.renderer.apply_remote(*from, event);
            }
            ServerMessage::PeerJoined { peer_id } => {
                tracing::debug!(%peer_id, "peer joined");
            }
            ServerMessage::PeerLeft { peer_id } => {
                tracing::debug!(%peer_id, "peer left");
                self.renderer.forget_source(peer_id);
            }
        }
    }

    /// The session's renderer.
    #[must_use]
    pub fn renderer(&self) -> &Renderer<SkiaBackend> {
        &self.renderer
    }

    /// Encode the current surface as PNG.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn snapshot_png(&self) -> ClientResult<Vec<u8>> {
        Ok(self.renderer.backend().encode_png()?)
    }
}
