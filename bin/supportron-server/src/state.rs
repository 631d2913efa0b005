//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use crate::config::Config;

/// State shared across all HTTP handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Typed client for the Gemini `generateContent` API.
    pub gemini: supportron_gemini::Client,
}
