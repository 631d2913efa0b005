//! Server configuration, loaded from environment variables at startup.

use anyhow::Context;

/// Browser origins allowed by default: the local development frontends.
pub const DEFAULT_CORS_ORIGINS: &str =
    "http://localhost:3000,http://localhost:3001,http://127.0.0.1:3000";

/// Runtime configuration for supportron-server.
///
/// Every field except the Gemini credential has a sensible default, so the
/// server works with nothing but `GEMINI_API_KEY` set.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:8000"`).
    pub bind_address: String,

    /// Google Generative Language API key. Required; startup fails without it.
    pub gemini_api_key: String,

    /// Base URL of the Generative Language API. Override to point the server
    /// at a proxy or a local stand-in.
    pub gemini_api_base: String,

    /// Model tried first for every chat request.
    pub primary_model: String,

    /// Model tried once when the primary fails to initialise.
    pub fallback_model: String,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// Comma-separated CORS origin allow-list.
    pub cors_allowed_origins: String,

    /// Serve Swagger UI at `/swagger-ui` (default: `true`).
    pub enable_swagger: bool,
}

impl Config {
    /// Build [`Config`] from environment variables.
    ///
    /// Fails only when `GEMINI_API_KEY` is absent; every other variable
    /// falls back to its default.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            bind_address: env_or("SUPPORTRON_BIND", "0.0.0.0:8000"),
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .context("GEMINI_API_KEY not found in environment variables")?,
            gemini_api_base: env_or("GEMINI_API_BASE", supportron_gemini::DEFAULT_BASE_URL),
            primary_model: env_or("SUPPORTRON_MODEL", "gemini-2.5-flash"),
            fallback_model: env_or("SUPPORTRON_FALLBACK_MODEL", "gemini-1.5-pro"),
            log_level: env_or("SUPPORTRON_LOG", "info"),
            log_json: std::env::var("SUPPORTRON_LOG_JSON")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            cors_allowed_origins: env_or("SUPPORTRON_CORS_ORIGINS", DEFAULT_CORS_ORIGINS),
            enable_swagger: std::env::var("SUPPORTRON_ENABLE_SWAGGER")
                .map(|v| !(v == "0" || v.eq_ignore_ascii_case("false")))
                .unwrap_or(true),
        })
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}
