//! Chat API request / response types.
//!
//! The wire shapes match what the web frontend sends: the caller resends
//! the full conversation history on every call, so nothing here refers to
//! server-side session state.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Role of a chat message author.
///
/// Only end-user and assistant turns exist on this API; any other role
/// fails deserialization before the handler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// A single message in the conversation history.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Message {
    /// The role of the message author.
    pub role: MessageRole,
    /// The content of the message. Must be non-empty.
    pub content: String,
}

/// Request body for `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatRequest {
    /// Conversation history, oldest first; the last entry is the new turn.
    pub messages: Vec<Message>,
}

/// Response body for `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    /// The assistant's reply text.
    pub message: String,
    /// Whether the reply stayed on IT-support topic (see the redirect-phrase
    /// heuristic in the chat route).
    #[serde(default = "default_is_it_related")]
    pub is_it_related: bool,
}

fn default_is_it_related() -> bool {
    true
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn roles_deserialize_lowercase() {
        let message: Message =
            serde_json::from_str(r#"{"role": "user", "content": "hi"}"#).unwrap();
        assert_eq!(message.role, MessageRole::User);

        let message: Message =
            serde_json::from_str(r#"{"role": "assistant", "content": "hello"}"#).unwrap();
        assert_eq!(message.role, MessageRole::Assistant);
    }

    #[test]
    fn unknown_role_is_rejected() {
        let result: Result<Message, _> =
            serde_json::from_str(r#"{"role": "system", "content": "you are a bot"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn is_it_related_defaults_to_true() {
        let response: ChatResponse = serde_json::from_str(r#"{"message": "ok"}"#).unwrap();
        assert!(response.is_it_related);
    }
}
