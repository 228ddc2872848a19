//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Serve the tracking pixel and favicon with identifier cookies
//! - Redirect everything else to the canonical origin
//! - Bind server to listener and shut down gracefully

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{HeaderMap, Request, Uri},
    response::Response,
    routing::get,
    Router,
};
use chrono::Utc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::assets::StaticAssets;
use crate::config::TrackerConfig;
use crate::cookies::Reconciler;
use crate::http::request::{request_cookies, request_host};
use crate::http::response::{permanent_redirect, tracked_response, DiagnosticEcho};
use crate::lifecycle::shutdown::wait_for_shutdown;
use crate::observability::metrics;

pub const PIXEL_PATH: &str = "/pixel.gif";
pub const FAVICON_PATH: &str = "/favicon.ico";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub reconciler: Arc<Reconciler>,
    pub assets: Arc<StaticAssets>,
    pub redirect_origin: Arc<str>,
    pub echo_headers: bool,
}

impl AppState {
    pub fn new(config: &TrackerConfig, assets: StaticAssets) -> Self {
        Self {
            reconciler: Arc::new(Reconciler::new(config.cookies.clone())),
            assets: Arc::new(assets),
            redirect_origin: Arc::from(config.redirect.origin.as_str()),
            echo_headers: config.diagnostics.echo_headers,
        }
    }
}

/// HTTP server for the tracking service.
pub struct TrackerServer {
    router: Router,
    config: TrackerConfig,
}

impl TrackerServer {
    /// Create a new server from a validated configuration and loaded assets.
    pub fn new(config: TrackerConfig, assets: StaticAssets) -> Self {
        let state = AppState::new(&config, assets);
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &TrackerConfig, state: AppState) -> Router {
        Router::new()
            .route(PIXEL_PATH, get(pixel_handler))
            .route(FAVICON_PATH, get(favicon_handler))
            .fallback(redirect_handler)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown");
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request_id
                )
            }))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router, for embedding or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// an OS signal or a trigger on `shutdown`.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            redirect_origin = %self.config.redirect.origin,
            secondary_enabled = self.config.cookies.secondary_enabled,
            echo_headers = self.config.diagnostics.echo_headers,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(wait_for_shutdown(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }
}

async fn pixel_handler(State(state): State<AppState>, headers: HeaderMap, uri: Uri) -> Response {
    let body = state.assets.pixel();
    track(&state, &headers, &uri, body, "image/gif", "pixel")
}

async fn favicon_handler(State(state): State<AppState>, headers: HeaderMap, uri: Uri) -> Response {
    let body = state.assets.favicon();
    track(&state, &headers, &uri, body, "image/x-icon", "favicon")
}

/// Reconcile identifier cookies and attach them to a static payload.
fn track(
    state: &AppState,
    headers: &HeaderMap,
    uri: &Uri,
    body: Bytes,
    content_type: &'static str,
    route: &'static str,
) -> Response {
    let start = Instant::now();

    let host = request_host(headers, uri);
    let cookies = request_cookies(headers);
    let reconciliation = state.reconciler.reconcile(&cookies, &host, Utc::now());

    tracing::debug!(
        route,
        host = %host,
        primary = reconciliation.primary_outcome.as_str(),
        secondary = reconciliation.secondary_outcome.as_str(),
        "Identifier cookies reconciled"
    );

    let echo = state
        .echo_headers
        .then(|| DiagnosticEcho::new(headers, uri, &reconciliation));
    let response = tracked_response(body, content_type, &reconciliation, echo);

    metrics::record_reconciliation(&reconciliation);
    metrics::record_request(route, response.status().as_u16(), start);
    response
}

async fn redirect_handler(State(state): State<AppState>, uri: Uri) -> Response {
    let start = Instant::now();
    let response = permanent_redirect(&state.redirect_origin, uri.path());

    tracing::debug!(path = %uri.path(), status = %response.status(), "Redirecting");
    metrics::record_request("redirect", response.status().as_u16(), start);
    response
}
