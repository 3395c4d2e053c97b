//! Test server harness for integration tests.
//!
//! Spins up the real router on a random port so WebSocket and HTTP clients
//! can talk to it.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use whiteboard_server::{build_router, AppState, RelayHub, ServerConfig};

/// A test server instance with control handles.
pub struct TestServer {
    addr: SocketAddr,
    relay: RelayHub,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server on a random available port.
    ///
    /// # Panics
    ///
    /// Panics if no port is available or server fails to bind.
    pub async fn start() -> Self {
        let port = portpicker::pick_unused_port().expect("no available port");
        let config = ServerConfig {
            port,
            ..ServerConfig::default()
        };

        let state = AppState::new();
        let relay = state.relay.clone();
        let app = build_router(state, &config);

        let listener = TcpListener::bind(config.socket_addr())
            .await
            .expect("failed to bind");
        let actual_addr = listener.local_addr().expect("failed to get local addr");

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .expect("server error");
        });

        // Give the server a moment to start
        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

        Self {
            addr: actual_addr,
            relay,
            shutdown_tx: Some(shutdown_tx),
            handle,
        }
    }

    /// Get the server's socket address.
    #[allow(dead_code)]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Get the WebSocket URL for connecting to the server.
    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    /// Relay state shared with the running server (for test assertions).
    #[allow(dead_code)]
    pub fn relay(&self) -> &RelayHub {
        &self.relay
    }

    /// Wait until the server reports `expected` connected peers.
    ///
    /// # Panics
    ///
    /// Panics if the count is not reached within five seconds.
    #[allow(dead_code)]
    pub async fn wait_for_peers(&self, expected: usize) {
        let deadline = tokio::time::Instant::now() + tokio::time::Duration::from_secs(5);
        while self.relay.peer_count() != expected {
            assert!(
                tokio::time::Instant::now() < deadline,
                "expected {expected} peers, have {}",
                self.relay.peer_count()
            );
            tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
        }
    }

    /// Gracefully shut down the server.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        let _ = tokio::time::timeout(tokio::time::Duration::from_secs(5), self.handle).await;
    }
}
