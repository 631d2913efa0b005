use thiserror::Error;

/// Errors that can be returned by supportron-gemini operations.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// An HTTP request failed (connect error, broken transport, etc.).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status code.
    #[error("Gemini API error {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Failed to deserialize the API response body.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The model identifier cannot form a valid `generateContent` URL.
    #[error("invalid model identifier: {0:?}")]
    InvalidModel(String),

    /// The configured API base URL is not a valid URL.
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    /// The API returned a response with no usable candidate text.
    #[error("model returned no candidate text")]
    EmptyResponse,
}
