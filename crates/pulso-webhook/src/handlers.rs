// SPDX-FileCopyrightText: 2026 Pulso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the webhook API.
//!
//! Handles POST /v1/interactions (the ingestion pipeline), the read-side
//! GET endpoints, and /health.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use pulso_core::{Interaction, PulsoError};

use crate::payload;
use crate::server::WebhookState;

/// Response body for a successfully stored interaction.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    /// The stored row, including the generated id and created_at.
    pub data: Interaction,
    pub message: String,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error description.
    pub error: String,
    /// Field names the caller must supply, present on validation errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<&'static str>>,
}

/// Response body for GET /v1/interactions.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub data: Vec<Interaction>,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Error wrapper mapping [`PulsoError`] onto HTTP responses.
///
/// Validation and malformed-body errors are the caller's fault (400);
/// everything else is a server-side failure (500). Storage errors expose
/// the error message only, never internals.
pub struct ApiError(pub PulsoError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self.0 {
            PulsoError::Validation { message, required } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: message,
                    required: Some(required),
                },
            ),
            err @ PulsoError::MalformedRequest(_) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: err.to_string(),
                    required: None,
                },
            ),
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: other.to_string(),
                    required: None,
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}

/// Log the outcome and convert into the response error.
fn reject(err: PulsoError) -> ApiError {
    warn!(error = %err, "webhook request rejected");
    ApiError(err)
}

/// POST /v1/interactions
///
/// The ingestion pipeline: parse, validate/normalize, insert, respond.
/// Exactly one row is appended per successful call; duplicate submissions
/// are deliberately not deduplicated.
pub async fn post_interaction(
    State(state): State<WebhookState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let raw = payload::parse(&body).map_err(reject)?;
    debug!(payload = ?raw, "received webhook payload");

    let event = payload::normalize(raw).map_err(reject)?;
    let stored = state.store.insert(event).await.map_err(reject)?;
    info!(
        id = %stored.id,
        platform = %stored.platform,
        event_type = %stored.event_type,
        "interaction saved"
    );

    Ok((
        StatusCode::OK,
        Json(SuccessResponse {
            success: true,
            data: stored,
            message: "Interaction saved successfully".to_string(),
        }),
    )
        .into_response())
}

/// OPTIONS /v1/interactions
///
/// Browser preflight support: empty success, no body processing, never
/// touches the store. The CORS layer decorates the response headers.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Query parameters for GET /v1/interactions.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub limit: Option<i64>,
}

/// GET /v1/interactions
///
/// The dashboard's bulk read: all rows, newest first.
pub async fn get_interactions(
    State(state): State<WebhookState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>, ApiError> {
    let data = state.store.list_recent(params.limit).await.map_err(reject)?;
    Ok(Json(ListResponse { data }))
}

/// Query parameters for GET /v1/stats.
#[derive(Debug, Deserialize)]
pub struct StatsParams {
    /// Optional single-day filter (YYYY-MM-DD).
    #[serde(default)]
    pub day: Option<NaiveDate>,
}

/// GET /v1/stats
///
/// Derived dashboard aggregates over the stored rows: totals, platform
/// counts, namespaced unique users, unique keywords, and the trailing
/// 7-day histogram.
pub async fn get_stats(
    State(state): State<WebhookState>,
    Query(params): Query<StatsParams>,
) -> Result<Json<pulso_feed::DashboardSnapshot>, ApiError> {
    let rows = state.store.list_recent(None).await.map_err(reject)?;
    let today = chrono::Utc::now().date_naive();
    let snapshot = pulso_feed::aggregate::snapshot(&rows, today, params.day);
    Ok(Json(snapshot))
}

/// GET /health
///
/// Returns service status without touching the store.
pub async fn get_health(State(state): State<WebhookState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.started_at.elapsed().as_secs(),
    })
}
