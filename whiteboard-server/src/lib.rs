//! # Whiteboard Server Library
//!
//! Relay server for the collaborative whiteboard. Used by both the binary
//! and integration tests.
//!
//! Clients connect to `/ws`, receive a welcome frame carrying their peer ID,
//! and from then on every drawing event they send is forwarded to all other
//! connected clients. The server keeps no canvas state.

use axum::{
    extract::{ws::WebSocketUpgrade, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

pub mod config;
pub mod health;
pub mod metrics;
pub mod relay;
pub mod session;
pub mod validation;
pub mod ws;

pub use config::{CliArgs, LogFormat, ServerConfig};
pub use relay::{FanOut, RelayError, RelayHub, PEER_QUEUE_CAPACITY};
pub use session::SessionCoordinator;

/// Shared application state.
#[derive(Clone, Default)]
pub struct AppState {
    /// Peer registry and fan-out.
    pub relay: RelayHub,
    /// Prometheus handle; `/metrics` is only routed when present.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// State with a fresh relay and no metrics endpoint.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a Prometheus handle.
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Get a reference to the relay hub.
    pub fn relay(&self) -> &RelayHub {
        &self.relay
    }
}

/// Build the HTTP router.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let mut app = Router::new()
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .route("/health", get(health::readiness))
        .route("/ws", get(relay_websocket_handler));

    if state.metrics.is_some() {
        app = app.route("/metrics", get(metrics_handler));
    }

    if let Some(dir) = &config.static_dir {
        tracing::info!("Serving static files from: {:?}", dir);
        app = app.fallback_service(ServeDir::new(dir));
    }

    app
        // Request ID for log correlation
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(build_cors_layer(config))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Build a CORS layer from the configured origins.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins()
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", o);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

/// Prometheus metrics endpoint.
#[tracing::instrument(name = "metrics", skip(state))]
async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (StatusCode::NOT_FOUND, String::new()),
    }
}

/// Relay WebSocket upgrade.
#[tracing::instrument(name = "relay_websocket_connect", skip(ws, state))]
async fn relay_websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    tracing::debug!("Relay WebSocket upgrade requested");
    ws.on_upgrade(move |socket| ws::handle_relay_socket(socket, state.relay))
}
