//! Unified server error type.
//!
//! Every handler returns `Result<T, ServerError>`, which implements
//! [`axum::response::IntoResponse`] so errors are automatically converted
//! to a JSON-body HTTP response with an appropriate status code.
//!
//! Deliberate client errors ([`ServerError::BadRequest`]) carry their
//! message through unchanged; upstream failures are logged in full and the
//! error's string form is embedded in the 500 body's `detail` field.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// All errors that can occur in the supportron-server request lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The caller sent an invalid or malformed request.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Propagated from the Gemini client: session initialisation (both the
    /// primary and the fallback model) or the generation call itself.
    #[error("upstream error: {0}")]
    Upstream(#[from] supportron_gemini::GeminiError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            // Client-facing errors: expose the message directly.
            ServerError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),

            // Upstream failures: log the full detail, return the error's
            // string form to the caller.
            ServerError::Upstream(e) => {
                error!(error = %e, "error processing chat request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Error processing chat request: {e}"),
                )
            }
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bad_request_maps_to_400() {
        let response =
            ServerError::BadRequest("Messages list cannot be empty".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_error_maps_to_500() {
        let response =
            ServerError::Upstream(supportron_gemini::GeminiError::EmptyResponse).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
