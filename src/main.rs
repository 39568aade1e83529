//! Summarize Server - Main entry point
//!
//! Loads configuration, installs logging and serves the router.

use anyhow::Result;
use std::sync::Arc;
use summarize_server::{
    api::{build_router, AppState},
    core::{init_metrics, init_tracing, AppConfig},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env files if present (before reading any environment variables).
    // The parent directory is checked too so a shared project-root .env works.
    dotenvy::dotenv().ok();
    dotenvy::from_filename("../.env").ok();

    init_tracing();
    init_metrics();

    let config = AppConfig::from_env()?;
    if !config.has_credential() {
        tracing::warn!("GEMINI_API_KEY is empty. Set it in .env at project root.");
    }
    tracing::debug!(?config, "configuration loaded");

    let http_client = create_http_client(&config)?;
    let host = config.server.host.clone();
    let port = config.server.port;

    let state = Arc::new(AppState::with_gemini(config, http_client));
    let app = build_router(state)?;

    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
    tracing::info!("Backend running on http://{}", listener.local_addr()?);
    tracing::info!("Summarize API: POST /summarize");
    tracing::info!("Swagger UI: /swagger-ui");
    tracing::info!("Metrics endpoint: /metrics");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the HTTP client used for upstream calls.
fn create_http_client(config: &AppConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
        .pool_idle_timeout(std::time::Duration::from_secs(90))
        .tcp_keepalive(std::time::Duration::from_secs(60))
        .build()?;
    Ok(client)
}
