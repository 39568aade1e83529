//! HTTP request handlers for the summarize API.

use crate::api::models::{ErrorResponse, HealthResponse, SummarizeRequest, SummarizeResponse};
use crate::core::config::AppConfig;
use crate::core::error::{INVALID_JSON_MESSAGE, TEXT_REQUIRED_MESSAGE};
use crate::core::{AppError, Result};
use crate::services::{GeminiClient, Summarizer};
use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use prometheus::{Encoder, TextEncoder};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub summarizer: Summarizer,
}

impl AppState {
    pub fn new(config: AppConfig, summarizer: Summarizer) -> Self {
        Self { config, summarizer }
    }

    /// Wire a [`GeminiClient`] built from `config` behind the summarizer.
    pub fn with_gemini(config: AppConfig, http_client: reqwest::Client) -> Self {
        let client = GeminiClient::new(http_client, &config.gemini);
        let summarizer = Summarizer::new(Arc::new(client));
        Self::new(config, summarizer)
    }
}

/// Summarize free-form text into three bullet lines.
///
/// The body is parsed by hand rather than through the `Json` extractor so a
/// missing `Content-Type` or a missing `text` field both end in a plain 400
/// with our own error body.
#[utoipa::path(
    post,
    path = "/summarize",
    tag = "summarize",
    request_body = SummarizeRequest,
    responses(
        (status = 200, description = "Three-line summary", body = SummarizeResponse),
        (status = 400, description = "Missing or blank text, or invalid JSON", body = ErrorResponse),
        (status = 500, description = "Summarization failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, body), fields(body_len = body.len()))]
pub async fn summarize(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<SummarizeResponse>> {
    let payload: SummarizeRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!(error = %e, "rejecting request body");
        AppError::InvalidInput(INVALID_JSON_MESSAGE.to_string())
    })?;

    let text = payload
        .trimmed_text()
        .ok_or_else(|| AppError::InvalidInput(TEXT_REQUIRED_MESSAGE.to_string()))?;

    let summary = state
        .summarizer
        .summarize(&state.config.gemini.api_key, text)
        .await?;

    tracing::debug!(lines = summary.lines().count(), "summary produced");
    Ok(Json(SummarizeResponse { summary }))
}

/// Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Server is up", body = HealthResponse))
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Prometheus text exposition of all registered metrics.
pub async fn metrics_handler() -> Response {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "failed to encode metrics");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    (
        [(header::CONTENT_TYPE, encoder.format_type().to_string())],
        buffer,
    )
        .into_response()
}
