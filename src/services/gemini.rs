//! Typed client for the Gemini `generateContent` API.
//!
//! Every nested field of the response is optional: the service omits
//! `candidates` for blocked prompts, omits `content` for some finish reasons and
//! may return parts that carry no text. Callers walk the structure with
//! [`GenerateContentResponse::text`] instead of assuming a shape.

use crate::core::config::GeminiConfig;
use crate::core::SummarizeError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Something that can turn a prompt into a `generateContent` response.
///
/// The summarizer depends on this seam rather than on [`GeminiClient`] so
/// handlers can be exercised against a stub.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Perform exactly one generation call. No retries.
    async fn generate(
        &self,
        credential: &str,
        prompt: &str,
    ) -> Result<GenerateContentResponse, SummarizeError>;
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// A single user turn holding `prompt` as one text part.
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: Some(vec![Part {
                    text: Some(prompt.to_string()),
                }]),
            }],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<Candidate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts: Option<Vec<Part>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenate the text of every part of every candidate, in order.
    pub fn text(&self) -> String {
        self.candidates
            .iter()
            .flatten()
            .filter_map(|candidate| candidate.content.as_ref())
            .filter_map(|content| content.parts.as_ref())
            .flatten()
            .filter_map(|part| part.text.as_deref())
            .collect()
    }

    /// Why the prompt was blocked, if the service said so.
    pub fn block_reason(&self) -> Option<&str> {
        self.prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
    }
}

/// Pull a human readable message out of a Gemini error body.
pub fn extract_error_message(body: &Value) -> Option<String> {
    body.get("error")
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        .map(|s| s.to_string())
        .or_else(|| {
            body.get("error")
                .and_then(|e| e.as_str())
                .map(|s| s.to_string())
        })
}

/// HTTP client for `POST {api_base}/v1beta/models/{model}:generateContent`.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_base: String,
    model: String,
}

impl GeminiClient {
    pub fn new(http_client: Client, config: &GeminiConfig) -> Self {
        Self {
            http_client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, self.model
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(
        &self,
        credential: &str,
        prompt: &str,
    ) -> Result<GenerateContentResponse, SummarizeError> {
        let url = self.endpoint();
        let payload = GenerateContentRequest::from_prompt(prompt);

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", credential)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(
                    model = %self.model,
                    is_timeout = e.is_timeout(),
                    is_connect = e.is_connect(),
                    error = %e,
                    "generateContent request failed"
                );
                SummarizeError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            let message = extract_error_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());
            return Err(SummarizeError::Service(format!(
                "upstream returned {}: {}",
                status.as_u16(),
                message
            )));
        }

        let parsed: GenerateContentResponse = response.json().await?;
        if let Some(reason) = parsed.block_reason() {
            tracing::warn!(model = %self.model, block_reason = %reason, "prompt blocked by service");
        }
        Ok(parsed)
    }
}
