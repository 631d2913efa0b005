//! Service metadata and health / heartbeat endpoints.

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use utoipa::OpenApi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(get_root, get_health))]
pub struct HealthApi;

/// Register metadata / health routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_root))
        .route("/health", get(get_health))
}

/// Root endpoint – service metadata.
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Service name, version and status", body = Value)
    )
)]
pub async fn get_root() -> Json<Value> {
    Json(json!({
        "message": "Supportron API is running",
        "version": env!("CARGO_PKG_VERSION"),
        "status":  "operational",
    }))
}

/// Heartbeat endpoint.
///
/// Always returns `{"status": "healthy"}` with HTTP 200, independent of the
/// upstream model provider. Load-balancers and monitoring systems should
/// poll this endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Server is healthy", body = Value)
    )
)]
pub async fn get_health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn health_response_is_healthy() {
        let Json(body) = get_health().await;
        assert_eq!(body, json!({ "status": "healthy" }));
    }

    #[tokio::test]
    async fn root_response_has_service_metadata() {
        let Json(body) = get_root().await;
        assert_eq!(body["message"], "Supportron API is running");
        assert_eq!(body["status"], "operational");
        assert!(!body["version"].as_str().unwrap_or("").is_empty());
    }
}
