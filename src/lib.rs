//! Summarize Server - three-line summaries of free-form text
//!
//! A single `POST /summarize` endpoint forwards text to the Gemini
//! `generateContent` API and reshapes the model output into at most three
//! capitalized, punctuated `- ` bullets.
//!
//! # Architecture
//!
//! - [`core`]: Core functionality (config, errors, logging, metrics, middleware)
//! - [`api`]: HTTP handlers, router and request/response models
//! - [`services`]: Gemini client and the summarizer
//!
//! # Configuration
//!
//! Optional environment variables:
//! - `GEMINI_API_KEY`: credential for the Gemini API (requests fail with 500 when unset)
//! - `GEMINI_MODEL`: model name (default: gemini-2.5-flash)
//! - `GEMINI_API_BASE`: API base URL (default: https://generativelanguage.googleapis.com)
//! - `HOST`: Server bind address (default: 0.0.0.0)
//! - `PORT`: Server port (default: 4001)
//! - `CORS_ALLOWED_ORIGIN`: browser origin allowed by CORS (default: http://localhost:3000)
//! - `REQUEST_TIMEOUT_SECS`: upstream request timeout in seconds (default: 300)

pub mod api;
pub mod core;
pub mod services;

// Re-export commonly used types for convenience
pub use crate::api::{build_router, AppState, SummarizeRequest, SummarizeResponse};
pub use crate::core::{AppConfig, AppError, Result, SummarizeError};
pub use crate::services::{GeminiClient, Summarizer, TextGenerator};
