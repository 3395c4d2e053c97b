//! WebSocket connection to the relay server.

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use whiteboard_core::{DrawEvent, PeerId, ServerMessage};

use crate::error::{ClientError, ClientResult};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// An open relay connection.
///
/// Created by [`RelayConnection::connect`], which completes only after the
/// server's welcome frame has assigned this connection a [`PeerId`].
pub struct RelayConnection {
    stream: WsStream,
    peer_id: PeerId,
    server_version: String,
}

impl RelayConnection {
    /// Connect to `url` (e.g. `ws://127.0.0.1:3000/ws`) and wait for the welcome.
    ///
    /// # Errors
    ///
    /// Returns an error if the socket cannot be opened or the first frame is
    /// not a welcome.
    pub async fn connect(url: &str) -> ClientResult<Self> {
        let (mut stream, _) = connect_async(url).await?;

        match read_message(&mut stream).await? {
            Some(ServerMessage::Welcome { version, peer_id }) => {
                tracing::info!(%peer_id, server_version = %version, "connected to relay at {url}");
                Ok(Self {
                    stream,
                    peer_id,
                    server_version: version,
                })
            }
            Some(other) => Err(ClientError::Handshake(format!(
                "expected welcome, got {}",
                other.kind()
            ))),
            None => Err(ClientError::Closed),
        }
    }

    /// Identity the server assigned to this connection.
    #[must_use]
    pub fn peer_id(&self) -> PeerId {
        self.peer_id
    }

    /// Version reported by the server.
    #[must_use]
    pub fn server_version(&self) -> &str {
        &self.server_version
    }

    /// Publish an event.
    ///
    /// # Errors
    ///
    /// Returns an error if the event cannot be encoded or the socket write fails.
    pub async fn send(&mut self, event: &DrawEvent) -> ClientResult<()> {
        let text = event.encode()?;
        self.stream.send(Message::Text(text)).await?;
        Ok(())
    }

    /// Wait for the next message from the server.
    ///
    /// Returns `Ok(None)` once the server closes the connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the socket fails.
    pub async fn next_message(&mut self) -> ClientResult<Option<ServerMessage>> {
        read_message(&mut self.stream).await
    }

    /// Close the connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the close frame cannot be sent.
    pub async fn close(mut self) -> ClientResult<()> {
        self.stream.close(None).await?;
        Ok(())
    }
}

/// Read frames until one decodes as a server message.
///
/// Frames this client does not understand are skipped.
async fn read_message(stream: &mut WsStream) -> ClientResult<Option<ServerMessage>> {
    while let Some(frame) = stream.next().await {
        match frame? {
            Message::Text(text) => match ServerMessage::decode(&text) {
                Ok(message) => return Ok(Some(message)),
                Err(e) => tracing::warn!("skipping unrecognized server frame: {e}"),
            },
            Message::Close(_) => return Ok(None),
            _ => {}
        }
    }
    Ok(None)
}
