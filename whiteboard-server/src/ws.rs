//! WebSocket connection handling.
//!
//! One task per socket. Inbound text frames are validated and published to
//! the [`RelayHub`]; messages queued for this peer are written back out.
//! Bad input is logged and dropped without replying, and the connection
//! stays open.

use axum::extract::ws::{Message, WebSocket};
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use whiteboard_core::{DrawEvent, PeerId, ServerMessage, VERSION};

use crate::metrics::{record_validation_failure, record_ws_message};
use crate::relay::RelayHub;
use crate::validation::{validate_event, validate_message_size};

/// Drive one relay connection until it closes.
pub async fn handle_relay_socket(socket: WebSocket, hub: RelayHub) {
    let (mut sender, mut receiver) = socket.split();

    let peer_id = PeerId::new();
    let mut peer_rx = hub.on_connect(peer_id);

    let welcome = ServerMessage::Welcome {
        version: VERSION.to_string(),
        peer_id,
    };
    if send_message(&mut sender, &peer_id, &welcome).await.is_err() {
        hub.on_disconnect(&peer_id);
        return;
    }

    loop {
        tokio::select! {
            msg = receiver.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        handle_text(&hub, &peer_id, text.as_str());
                    }
                    Some(Ok(Message::Close(_))) => {
                        tracing::info!("Peer {} disconnected", peer_id);
                        break;
                    }
                    Some(Err(e)) => {
                        tracing::warn!("WebSocket error for peer {}: {}", peer_id, e);
                        break;
                    }
                    None => break,
                    // Binary frames carry nothing we understand; ping/pong is handled by axum.
                    Some(Ok(_)) => {}
                }
            }

            outbound = peer_rx.recv() => {
                match outbound {
                    Some(message) => {
                        if send_message(&mut sender, &peer_id, &message).await.is_err() {
                            break;
                        }
                    }
                    None => {
                        tracing::debug!("Peer {} channel closed", peer_id);
                        break;
                    }
                }
            }
        }
    }

    hub.on_disconnect(&peer_id);
    tracing::info!("Relay connection for peer {} closed", peer_id);
}

/// Validate and publish one inbound frame.
fn handle_text(hub: &RelayHub, peer_id: &PeerId, text: &str) {
    if let Err(e) = validate_message_size(text.len()) {
        tracing::warn!("Message from peer {} rejected: {}", peer_id, e);
        record_validation_failure(e.kind());
        return;
    }

    let event = match DrawEvent::decode(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Unparseable message from peer {}: {}", peer_id, e);
            record_validation_failure("decode");
            return;
        }
    };

    if let Err(e) = validate_event(&event) {
        tracing::warn!("Event from peer {} rejected: {}", peer_id, e);
        record_validation_failure(e.kind());
        return;
    }

    record_ws_message("inbound", event.kind());
    match hub.publish(&event, peer_id) {
        Ok(outcome) => {
            tracing::debug!(
                peer_id = %peer_id,
                event = event.kind(),
                delivered = outcome.delivered,
                dropped = outcome.dropped,
                "Relayed event"
            );
        }
        Err(e) => {
            tracing::warn!("Failed to relay event from peer {}: {}", peer_id, e);
        }
    }
}

/// Write one message to the socket.
///
/// Serialization failures are logged and skipped; only transport errors are
/// returned.
async fn send_message(
    sender: &mut SplitSink<WebSocket, Message>,
    peer_id: &PeerId,
    message: &ServerMessage,
) -> Result<(), axum::Error> {
    let json = match message.encode() {
        Ok(json) => json,
        Err(e) => {
            tracing::error!(peer_id = %peer_id, "Failed to serialize {} message: {}", message.kind(), e);
            return Ok(());
        }
    };
    sender.send(Message::Text(json.into())).await?;
    record_ws_message("outbound", message.kind());
    Ok(())
}
