//! Wire types for the `generateContent` REST endpoint.
//!
//! Field names follow the REST API's camelCase convention on the wire. The
//! API supports more part kinds than plain text (inline data, function
//! calls); this client only sends and reads text.

use serde::{Deserialize, Serialize};

/// Conversation role in the Gemini wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One piece of a turn's content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// One role-tagged turn in a conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl Content {
    /// A single-part user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Content {
            role: Role::User,
            parts: vec![Part { text: text.into() }],
        }
    }

    /// A single-part model turn.
    pub fn model(text: impl Into<String>) -> Self {
        Content {
            role: Role::Model,
            parts: vec![Part { text: text.into() }],
        }
    }
}

/// Sampling parameters for a generation call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

/// Request body for `POST …/models/{model}:generateContent`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

/// One generated candidate. `content` is absent when generation was blocked
/// before producing any text.
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

/// Response body of a `generateContent` call. Unknown fields (usage
/// metadata, prompt feedback) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts, if any.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content.parts.iter().map(|p| p.text.as_str()).collect();
        if text.is_empty() { None } else { Some(text) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_camel_case() {
        let request = GenerateContentRequest {
            contents: vec![Content::user("hello")],
            generation_config: GenerationConfig {
                temperature: 0.7,
                top_p: 0.95,
                top_k: 40,
                max_output_tokens: 2048,
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value["contents"][0],
            json!({ "role": "user", "parts": [{ "text": "hello" }] })
        );
        assert_eq!(value["generationConfig"]["topP"], json!(0.95));
        assert_eq!(value["generationConfig"]["topK"], json!(40));
        assert_eq!(value["generationConfig"]["maxOutputTokens"], json!(2048));
    }

    #[test]
    fn response_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": "Try rebooting" }, { "text": " your router." }]
                }
            }],
            "usageMetadata": { "totalTokenCount": 12 }
        }))
        .unwrap();
        assert_eq!(response.text().as_deref(), Some("Try rebooting your router."));
    }

    #[test]
    fn response_text_is_none_without_candidates() {
        let response: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(response.text(), None);
    }

    #[test]
    fn response_text_is_none_for_blocked_candidate() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        }))
        .unwrap();
        assert_eq!(response.text(), None);
    }
}
