//! Clients drawing through a live relay end up with identical canvases.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::time::timeout;

use whiteboard_client::{ClientSession, RelayConnection};
use whiteboard_core::{DrawEvent, PointerEvent, ServerMessage};
use whiteboard_renderer::RendererConfig;
use whiteboard_server::{build_router, AppState, ServerConfig};

struct Relay {
    addr: SocketAddr,
    shutdown_tx: oneshot::Sender<()>,
}

impl Relay {
    async fn start() -> Self {
        let port = portpicker::pick_unused_port().expect("no available port");
        let config = ServerConfig {
            port,
            ..ServerConfig::default()
        };
        let app = build_router(AppState::new(), &config);
        let listener = TcpListener::bind(config.socket_addr())
            .await
            .expect("failed to bind");
        let addr = listener.local_addr().expect("local addr");

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .expect("server error");
        });

        Self { addr, shutdown_tx }
    }

    fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }
}

struct Peer {
    conn: RelayConnection,
    session: ClientSession,
}

impl Peer {
    async fn join(relay: &Relay) -> Self {
        let conn = RelayConnection::connect(&relay.ws_url())
            .await
            .expect("connect");
        assert_eq!(conn.server_version(), whiteboard_core::VERSION);
        let mut session = ClientSession::new(&RendererConfig {
            width: 400,
            height: 400,
            ..RendererConfig::default()
        })
        .expect("surface");
        assert_eq!(session.renderer().size(), (400, 400));
        session.set_peer_id(conn.peer_id());
        Self { conn, session }
    }

    async fn publish(&mut self, event: Option<DrawEvent>) -> usize {
        match event {
            Some(event) => {
                self.conn.send(&event).await.expect("send");
                1
            }
            None => 0,
        }
    }

    /// Draw a polyline and return how many events were published.
    async fn stroke(&mut self, points: &[(f64, f64)]) -> usize {
        let (first, rest) = points.split_first().expect("at least one point");
        let mut inputs = vec![PointerEvent::down(first.0, first.1)];
        inputs.extend(rest.iter().map(|&(x, y)| PointerEvent::moved(x, y)));
        let (x, y) = points[points.len() - 1];
        inputs.push(PointerEvent::up(x, y));

        let mut sent = 0;
        for input in inputs {
            let event = self.session.pointer(input);
            sent += self.publish(event).await;
        }
        sent
    }

    /// Apply incoming messages until `expected` relayed events have arrived.
    async fn absorb(&mut self, expected: usize) {
        let mut relayed = 0;
        let pump = async {
            while relayed < expected {
                let message = self
                    .conn
                    .next_message()
                    .await
                    .expect("read")
                    .expect("connection open");
                if matches!(message, ServerMessage::Relay { .. }) {
                    relayed += 1;
                }
                self.session.apply(&message);
            }
        };
        timeout(Duration::from_secs(5), pump)
            .await
            .expect("relayed events arrive");
    }

    fn pixels(&self) -> &[u8] {
        self.session.renderer().backend().data()
    }
}

#[allow(clippy::cast_precision_loss)]
fn line(from: (f64, f64), to: (f64, f64), steps: usize) -> Vec<(f64, f64)> {
    (0..=steps)
        .map(|i| {
            let t = i as f64 / steps as f64;
            (from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t)
        })
        .collect()
}

#[tokio::test]
async fn test_three_clients_converge() {
    let relay = Relay::start().await;
    let mut a = Peer::join(&relay).await;
    let mut b = Peer::join(&relay).await;
    let mut c = Peer::join(&relay).await;

    // Disjoint strokes, so arrival order across senders cannot matter.
    a.session.set_color("#ff0000");
    let from_a = a.stroke(&line((50.0, 100.0), (350.0, 100.0), 10)).await;
    b.session.set_color("#0000ff");
    let from_b = b.stroke(&line((50.0, 300.0), (350.0, 250.0), 12)).await;
    assert_eq!(from_a, 11);
    assert_eq!(from_b, 13);

    a.absorb(from_b).await;
    b.absorb(from_a).await;
    c.absorb(from_a + from_b).await;

    assert!(!c.session.renderer().is_blank());
    assert_eq!(a.pixels(), b.pixels());
    assert_eq!(b.pixels(), c.pixels());

    // B erases across A's line once everyone has it.
    b.session.set_erasing(true);
    let erase = b.stroke(&line((200.0, 60.0), (200.0, 140.0), 4)).await;
    a.absorb(erase).await;
    c.absorb(erase).await;
    assert_eq!(a.pixels(), b.pixels());
    assert_eq!(b.pixels(), c.pixels());

    // C clears the board for everyone.
    let clear = c.session.clear();
    c.conn.send(&clear).await.expect("send");
    a.absorb(1).await;
    b.absorb(1).await;
    for peer in [&a, &b, &c] {
        assert!(peer.session.renderer().is_blank());
    }
    assert_eq!(a.pixels(), c.pixels());

    a.conn.close().await.ok();
    b.conn.close().await.ok();
    c.conn.close().await.ok();
    let _ = relay.shutdown_tx.send(());
}

#[tokio::test]
async fn test_departed_peer_stroke_stays_unfinished() {
    let relay = Relay::start().await;
    let mut a = Peer::join(&relay).await;
    let mut b = Peer::join(&relay).await;

    let head = a.session.pointer(PointerEvent::down(20.0, 20.0));
    let sent = a.publish(head).await;
    b.absorb(sent).await;
    let a_id = a.conn.peer_id();
    assert!(b.session.renderer().remote_state(&a_id).is_some());

    a.conn.close().await.ok();
    let left = async {
        loop {
            let message = b.conn.next_message().await.expect("read").expect("open");
            b.session.apply(&message);
            if matches!(message, ServerMessage::PeerLeft { .. }) {
                break;
            }
        }
    };
    timeout(Duration::from_secs(5), left)
        .await
        .expect("peer_left arrives");
    assert!(b.session.renderer().remote_state(&a_id).is_none());
    assert!(b.session.renderer().is_blank());

    b.conn.close().await.ok();
    let _ = relay.shutdown_tx.send(());
}
