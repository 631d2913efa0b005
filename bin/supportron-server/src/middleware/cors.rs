use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowHeaders, CorsLayer};

use crate::state::AppState;

/// Build the CORS layer from the configured origin allow-list.
///
/// Credentials are allowed, which rules out wildcard origins and headers
/// (tower-http rejects `Any` combined with credentials); request headers
/// are mirrored back instead.
pub fn cors_layer(state: Arc<AppState>) -> CorsLayer {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_allowed_origins
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
