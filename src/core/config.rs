//! Configuration management for the summarize server.
//!
//! Settings are layered from built-in defaults and the process environment
//! (optionally populated from `.env` files by the binary). The resulting
//! [`AppConfig`] is immutable and shared with handlers through application state.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, CORS)
    pub server: ServerConfig,

    /// Generative-text service configuration
    pub gemini: GeminiConfig,

    /// Request timeout in seconds for the upstream service
    pub request_timeout_secs: u64,
}

/// Server-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// The single browser origin allowed by CORS
    pub cors_allowed_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_allowed_origin: default_cors_origin(),
        }
    }
}

/// Settings for the Gemini `generateContent` API.
#[derive(Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key; empty when not configured
    pub api_key: String,

    /// Model name used in the request path
    pub model: String,

    /// Base URL, without trailing slash
    pub api_base: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

// Keep the key out of logs.
impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            gemini: GeminiConfig::default(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4001
}

fn default_cors_origin() -> String {
    "http://localhost:3000".to_string()
}

fn default_request_timeout() -> u64 {
    300
}

/// Flat view of the environment keys we read.
#[derive(Debug, Deserialize)]
struct EnvSettings {
    gemini_api_key: String,
    gemini_model: String,
    gemini_api_base: String,
    host: String,
    port: u16,
    cors_allowed_origin: String,
    request_timeout_secs: u64,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// Recognized variables: `GEMINI_API_KEY`, `GEMINI_MODEL`, `GEMINI_API_BASE`,
    /// `HOST`, `PORT`, `CORS_ALLOWED_ORIGIN`, `REQUEST_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::from_environment(config::Environment::default())
    }

    /// Load configuration from an explicit environment source.
    ///
    /// Tests pass `Environment::default().source(Some(map))` here so they never
    /// touch the real process environment.
    pub fn from_environment(environment: config::Environment) -> Result<Self> {
        let defaults = AppConfig::default();

        let settings = config::Config::builder()
            .set_default("gemini_api_key", defaults.gemini.api_key)?
            .set_default("gemini_model", defaults.gemini.model)?
            .set_default("gemini_api_base", defaults.gemini.api_base)?
            .set_default("host", defaults.server.host)?
            .set_default("port", i64::from(defaults.server.port))?
            .set_default("cors_allowed_origin", defaults.server.cors_allowed_origin)?
            .set_default("request_timeout_secs", defaults.request_timeout_secs as i64)?
            .add_source(environment.try_parsing(true))
            .build()
            .context("Failed to build configuration")?;

        let env: EnvSettings = settings
            .try_deserialize()
            .context("Failed to parse configuration")?;

        Ok(Self {
            server: ServerConfig {
                host: env.host,
                port: env.port,
                cors_allowed_origin: env.cors_allowed_origin,
            },
            gemini: GeminiConfig {
                api_key: env.gemini_api_key.trim().to_string(),
                model: env.gemini_model,
                api_base: env.gemini_api_base.trim_end_matches('/').to_string(),
            },
            request_timeout_secs: env.request_timeout_secs,
        })
    }

    /// Whether an API key for the generative service is present.
    pub fn has_credential(&self) -> bool {
        !self.gemini.api_key.is_empty()
    }
}
