//! HTTP client for the Generative Language `generateContent` endpoint.

use url::Url;

use crate::error::GeminiError;
use crate::types::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig};
use crate::DEFAULT_BASE_URL;

/// Header carrying the API key. Keeps the credential out of request URLs.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the Generative Language API.
///
/// Cheap to clone; every [`ChatSession`] holds its own copy and shares the
/// underlying `reqwest` connection pool.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    api_key: String,
    base_url: Url,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a client for the hosted API.
    pub fn new(api_key: impl Into<String>) -> Result<Self, GeminiError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client against a custom base URL (local proxies, tests).
    pub fn with_base_url(api_key: impl Into<String>, base_url: &str) -> Result<Self, GeminiError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| GeminiError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        let http = reqwest::Client::builder()
            .user_agent(concat!("supportron-gemini/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url,
        })
    }

    /// Start a chat session for `model` seeded with `history`.
    ///
    /// Session construction is local: it validates that `model` forms a
    /// well-formed `generateContent` URL and does not contact the API.
    pub fn start_chat(
        &self,
        model: &str,
        generation_config: GenerationConfig,
        history: Vec<Content>,
    ) -> Result<ChatSession, GeminiError> {
        if model.is_empty()
            || !model
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_'))
        {
            return Err(GeminiError::InvalidModel(model.to_owned()));
        }

        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.as_str().trim_end_matches('/'),
            model
        );
        let endpoint =
            Url::parse(&endpoint).map_err(|_| GeminiError::InvalidModel(model.to_owned()))?;

        Ok(ChatSession {
            client: self.clone(),
            endpoint,
            generation_config,
            history,
        })
    }
}

/// A multi-turn exchange bound to one model and one parameter set.
///
/// Mirrors the upstream SDK's chat shape: the session carries the history,
/// and each `send_message` call posts the full history plus the new turn.
#[derive(Debug)]
pub struct ChatSession {
    client: Client,
    endpoint: Url,
    generation_config: GenerationConfig,
    history: Vec<Content>,
}

impl ChatSession {
    /// Send `text` as the next user turn and return the model's reply text.
    ///
    /// On success the user turn and the reply are appended to the session
    /// history, so a later call continues the same conversation.
    pub async fn send_message(&mut self, text: &str) -> Result<String, GeminiError> {
        self.history.push(Content::user(text));

        let request = GenerateContentRequest {
            contents: self.history.clone(),
            generation_config: self.generation_config,
        };

        let response = self
            .client
            .http
            .post(self.endpoint.clone())
            .header(API_KEY_HEADER, &self.client.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(GeminiError::Api { status, body });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        let reply = parsed.text().ok_or(GeminiError::EmptyResponse)?;

        self.history.push(Content::model(reply.clone()));
        Ok(reply)
    }

    /// Full request URL this session posts to.
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// Sampling parameters this session was started with.
    pub fn generation_config(&self) -> &GenerationConfig {
        &self.generation_config
    }

    /// Turns accumulated so far, oldest first.
    pub fn history(&self) -> &[Content] {
        &self.history
    }
}
