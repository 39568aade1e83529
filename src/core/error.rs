//! Error types and handling for the summarize server.
//!
//! [`SummarizeError`] describes why a summary could not be produced.
//! [`AppError`] is what handlers return; its [`IntoResponse`] impl is the
//! boundary where every summarization failure collapses into one generic
//! message so credential problems and provider error text never reach clients.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Message returned for every failure past input validation.
pub const GENERIC_FAILURE_MESSAGE: &str = "failed to summarize";

/// Message returned when the request text is missing or blank.
pub const TEXT_REQUIRED_MESSAGE: &str = "text is required";

/// Message returned when the request body is not valid JSON.
pub const INVALID_JSON_MESSAGE: &str = "invalid JSON body";

/// Failures of the summarization pipeline.
#[derive(Error, Debug)]
pub enum SummarizeError {
    /// The service credential is missing or blank
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The external call failed (transport, status, decoding, worker)
    #[error("Generative service error: {0}")]
    Service(String),

    /// The service answered but nothing usable was left after normalization
    #[error("Empty response from model")]
    EmptyResponse,
}

impl From<reqwest::Error> for SummarizeError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SummarizeError::Service(format!("request timed out: {}", e))
        } else if e.is_decode() {
            SummarizeError::Service(format!("malformed response: {}", e))
        } else {
            SummarizeError::Service(e.to_string())
        }
    }
}

impl SummarizeError {
    /// Short label used for metrics and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            SummarizeError::Configuration(_) => "configuration",
            SummarizeError::Service(_) => "service",
            SummarizeError::EmptyResponse => "empty_response",
        }
    }
}

/// Main error type for HTTP handlers.
#[derive(Error, Debug)]
pub enum AppError {
    /// Client provided invalid data
    #[error("Bad request: {0}")]
    InvalidInput(String),

    /// Summarization failed after the input was accepted
    #[error(transparent)]
    Summarize(#[from] SummarizeError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Summarize(e) => {
                tracing::error!(kind = e.kind(), error = %e, "summarize error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    GENERIC_FAILURE_MESSAGE.to_string(),
                )
            }
        };

        (status, Json(json!({ "error": error_message }))).into_response()
    }
}

/// Convenience type alias for Results using [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;
