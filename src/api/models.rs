//! API request and response models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /summarize`.
///
/// `text` is optional at the wire level so a missing field produces the same
/// 400 as an empty one instead of a deserialization rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"text": "Rust is a multi-paradigm systems programming language..."}))]
pub struct SummarizeRequest {
    /// Free-form text to summarize
    #[serde(default)]
    pub text: Option<String>,
}

impl SummarizeRequest {
    /// The trimmed text, or `None` when missing or blank.
    pub fn trimmed_text(&self) -> Option<&str> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// Successful summarize response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[schema(example = json!({
    "summary": "- Rust is a systems programming language.\n- It guarantees memory safety without a garbage collector.\n- It is used for CLIs, services and embedded software."
}))]
pub struct SummarizeResponse {
    /// Up to three `- ` prefixed lines separated by `\n`
    pub summary: String,
}

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[schema(example = json!({"error": "text is required"}))]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}
