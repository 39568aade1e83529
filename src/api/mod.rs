//! API layer for the summarize server.
//!
//! This module contains the HTTP handlers, request/response models and the
//! router with its CORS and middleware stack.

pub mod handlers;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use handlers::{health, metrics_handler, summarize, AppState};
pub use models::{ErrorResponse, HealthResponse, SummarizeRequest, SummarizeResponse};
pub use routes::{build_router, cors_layer, ApiDoc};
