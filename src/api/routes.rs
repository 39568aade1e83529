//! Router assembly: routes, CORS and middleware stack.

use crate::api::handlers::{health, metrics_handler, summarize, AppState};
use crate::api::models::{ErrorResponse, HealthResponse, SummarizeRequest, SummarizeResponse};
use crate::core::{request_id_middleware, MetricsMiddleware};
use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI documentation for the public API.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::summarize,
        crate::api::handlers::health,
    ),
    components(schemas(SummarizeRequest, SummarizeResponse, ErrorResponse, HealthResponse)),
    tags(
        (name = "summarize", description = "Three-line text summaries"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;

/// CORS policy: one origin, `POST`/`OPTIONS`, credentials allowed.
pub fn cors_layer(allowed_origin: &str) -> Result<CorsLayer> {
    let origin = HeaderValue::from_str(allowed_origin)
        .with_context(|| format!("Invalid CORS origin: {}", allowed_origin))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true))
}

/// Build the application router with all endpoints and layers.
pub fn build_router(state: Arc<AppState>) -> Result<Router> {
    let cors = cors_layer(&state.config.server.cors_allowed_origin)?;

    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi());

    let api_routes = Router::new()
        .route("/summarize", post(summarize))
        .layer(axum::middleware::from_fn(MetricsMiddleware::track_metrics))
        .with_state(state);

    Ok(Router::new()
        .merge(swagger_ui)
        .merge(api_routes)
        .route("/health", get(health))
        .route("/metrics", get(metrics_handler))
        .layer(cors)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http()))
}
