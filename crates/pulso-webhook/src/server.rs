// SPDX-FileCopyrightText: 2026 Pulso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webhook HTTP server built on axum.
//!
//! Sets up routes, the CORS layer, and shared state. The router is built
//! separately from the listener so tests can drive it without a socket.

use std::sync::Arc;

use axum::{
    http::{header, HeaderName},
    routing::{get, post},
    Router,
};
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};

use pulso_bus::EventBus;
use pulso_core::{EventStore, PulsoError};

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct WebhookState {
    /// The durable event store.
    pub store: Arc<dyn EventStore>,
    /// Bus handle used by the SSE stream to subscribe to insertions.
    pub bus: EventBus,
    /// Process start time for uptime reporting.
    pub started_at: std::time::Instant,
}

/// Webhook server configuration (mirrors `WebhookConfig` from pulso-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Build the full route table with CORS applied to every response.
///
/// The automation tool and dashboard are browser-adjacent callers, so the
/// layer answers preflight with a wildcard origin and the header set those
/// clients send (`authorization`, `x-client-info`, `apikey`,
/// `content-type`).
pub fn build_router(state: WebhookState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_headers([
        header::AUTHORIZATION,
        HeaderName::from_static("x-client-info"),
        HeaderName::from_static("apikey"),
        header::CONTENT_TYPE,
    ]);

    Router::new()
        .route(
            "/v1/interactions",
            post(crate::handlers::post_interaction)
                .get(crate::handlers::get_interactions)
                .options(crate::handlers::preflight),
        )
        .route(
            "/v1/interactions/stream",
            get(crate::sse::stream_interactions),
        )
        .route("/v1/stats", get(crate::handlers::get_stats))
        .route("/health", get(crate::handlers::get_health))
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until the shutdown token fires.
pub async fn start_server(
    config: &ServerConfig,
    state: WebhookState,
    shutdown: CancellationToken,
) -> Result<(), PulsoError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| PulsoError::Server {
            message: format!("failed to bind webhook server to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("webhook server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| PulsoError::Server {
            message: format!("webhook server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}
