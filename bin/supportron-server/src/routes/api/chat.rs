//! The chat endpoint: forwards a conversation to Gemini and classifies the
//! reply.
//!
//! The gateway is stateless: the caller resends the full history on every
//! call. Each request builds a fresh Gemini chat session seeded with two
//! fixed instruction turns plus that history, sends the newest message as
//! the new turn, and flags replies in which the assistant fell back to its
//! off-topic redirect template.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use tracing::{info, warn};
use utoipa::OpenApi;

use supportron_gemini::{ChatSession, Client, Content, GenerationConfig};

use crate::error::ServerError;
use crate::schemas::chat::{ChatRequest, ChatResponse, Message, MessageRole};
use crate::state::AppState;

/// Instruction turn fixed at the start of every conversation sent upstream.
pub const SYSTEM_PROMPT: &str = r#"You are Supportron, an advanced AI assistant specialized in IT technical support.
Your primary role is to assist users with:
- Hardware troubleshooting (computers, printers, networks, etc.)
- Software issues (operating systems, applications, drivers)
- Network connectivity problems
- Security concerns (malware, firewalls, encryption)
- System configuration and optimization
- IT infrastructure questions
- Cloud services and deployment
- Database issues
- Development tools and environments

IMPORTANT: If a user asks about non-IT topics (such as cooking, travel, medical advice, legal advice, personal relationships, etc.), politely redirect them by saying:
"I'm Supportron, your IT tech support assistant. I specialize in helping with technical IT issues. Could you please rephrase your question related to IT support, or let me know what technical problem you're experiencing?"

Be professional, clear, and helpful. Provide step-by-step solutions when possible."#;

/// The model's scripted acknowledgment of the instruction turn.
pub const SYSTEM_PROMPT_ACK: &str =
    "Understood. I'm Supportron, ready to assist with IT technical support issues.";

/// Substrings of the assistant's own redirect template. A reply containing
/// any of these (case-insensitively) answered a non-IT question.
pub const REDIRECT_PHRASES: [&str; 2] = [
    "i specialize in helping with technical it issues",
    "could you please rephrase your question related to it support",
];

/// Sampling parameters used for every generation call, primary or fallback.
const GENERATION_CONFIG: GenerationConfig = GenerationConfig {
    temperature: 0.7,
    top_p: 0.95,
    top_k: 40,
    max_output_tokens: 2048,
};

#[derive(OpenApi)]
#[openapi(
    paths(chat),
    components(schemas(ChatRequest, ChatResponse, Message, MessageRole))
)]
pub struct ChatApi;

/// Register chat routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/chat", post(chat))
}

/// Chat endpoint (`POST /api/chat`).
///
/// Sends the conversation to Gemini with the IT-support instruction turns
/// prepended and returns the reply together with the IT-relatedness flag.
#[utoipa::path(
    post,
    path = "/api/chat",
    tag = "chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Reply generated", body = ChatResponse),
        (status = 400, description = "Empty or malformed message list"),
        (status = 500, description = "Upstream model failure"),
    )
)]
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ServerError> {
    let last_message = request
        .messages
        .last()
        .ok_or_else(|| ServerError::BadRequest("Messages list cannot be empty".to_owned()))?;

    if let Some(pos) = request.messages.iter().position(|m| m.content.is_empty()) {
        return Err(ServerError::BadRequest(format!(
            "message {pos} has empty content"
        )));
    }

    let history = build_conversation_history(&request.messages);
    let new_turn = last_message.content.clone();

    let (mut session, model) = start_chat_with_fallback(
        &state.gemini,
        &state.config.primary_model,
        &state.config.fallback_model,
        history,
    )?;
    info!(%model, "using Gemini model");

    let reply = session.send_message(&new_turn).await?;

    let is_it_related = check_it_related(&reply);
    info!(is_it_related, "chat request processed successfully");

    Ok(Json(ChatResponse {
        message: reply,
        is_it_related,
    }))
}

/// Build the Gemini conversation history: the fixed instruction and
/// acknowledgment turns, then one turn per caller message (`user`→`user`,
/// `assistant`→`model`), order preserved.
fn build_conversation_history(messages: &[Message]) -> Vec<Content> {
    let mut history = Vec::with_capacity(2 + messages.len());
    history.push(Content::user(SYSTEM_PROMPT));
    history.push(Content::model(SYSTEM_PROMPT_ACK));

    for msg in messages {
        history.push(match msg.role {
            MessageRole::User => Content::user(msg.content.as_str()),
            MessageRole::Assistant => Content::model(msg.content.as_str()),
        });
    }

    history
}

/// Try the primary model, then the fallback once, both with identical
/// generation parameters. Returns the session and the model that won.
fn start_chat_with_fallback<'a>(
    client: &Client,
    primary: &'a str,
    fallback: &'a str,
    history: Vec<Content>,
) -> Result<(ChatSession, &'a str), ServerError> {
    match client.start_chat(primary, GENERATION_CONFIG, history.clone()) {
        Ok(session) => Ok((session, primary)),
        Err(e) => {
            warn!(model = %primary, fallback = %fallback, error = %e, "model failed, trying fallback");
            let session = client.start_chat(fallback, GENERATION_CONFIG, history)?;
            Ok((session, fallback))
        }
    }
}

/// A reply that echoes the assistant's own redirect template answered a
/// non-IT question. Substring containment on the lowercased reply; nothing
/// smarter is attempted.
fn check_it_related(reply: &str) -> bool {
    let lowered = reply.to_lowercase();
    !REDIRECT_PHRASES.iter().any(|phrase| lowered.contains(phrase))
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;
    use supportron_gemini::Role;

    fn message(role: MessageRole, content: &str) -> Message {
        Message {
            role,
            content: content.into(),
        }
    }

    fn part_text(content: &Content) -> &str {
        &content.parts[0].text
    }

    #[test]
    fn history_starts_with_instruction_and_ack() {
        let history = build_conversation_history(&[message(MessageRole::User, "hello")]);
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].role, Role::User);
        assert_eq!(part_text(&history[0]), SYSTEM_PROMPT);
        assert_eq!(history[1].role, Role::Model);
        assert_eq!(part_text(&history[1]), SYSTEM_PROMPT_ACK);
    }

    #[test]
    fn history_maps_roles_and_preserves_order() {
        let messages = [
            message(MessageRole::User, "My printer is offline"),
            message(MessageRole::Assistant, "Is it powered on?"),
            message(MessageRole::User, "Yes, still offline"),
        ];
        let history = build_conversation_history(&messages);

        assert_eq!(history.len(), 2 + messages.len());
        assert_eq!(history[2].role, Role::User);
        assert_eq!(part_text(&history[2]), "My printer is offline");
        assert_eq!(history[3].role, Role::Model);
        assert_eq!(part_text(&history[3]), "Is it powered on?");
        assert_eq!(history[4].role, Role::User);
        assert_eq!(part_text(&history[4]), "Yes, still offline");
    }

    #[test]
    fn single_message_round_trip_shape() {
        let messages = [message(MessageRole::User, "My wifi keeps disconnecting")];
        let history = build_conversation_history(&messages);

        assert_eq!(history.len(), 3);
        assert_eq!(history[2].role, Role::User);
        assert_eq!(part_text(&history[2]), "My wifi keeps disconnecting");
        // The same content is also sent as the explicit new turn.
        assert_eq!(messages.last().unwrap().content, "My wifi keeps disconnecting");
    }

    #[test]
    fn redirect_phrases_mark_reply_off_topic() {
        assert!(!check_it_related(
            "I'm Supportron, your IT tech support assistant. I specialize in helping with \
             technical IT issues. Could you please rephrase your question related to IT support, \
             or let me know what technical problem you're experiencing?"
        ));
        assert!(!check_it_related(
            "COULD YOU PLEASE REPHRASE YOUR QUESTION RELATED TO IT SUPPORT?"
        ));
    }

    #[test]
    fn ordinary_replies_are_it_related() {
        assert!(check_it_related(
            "Try restarting your router and checking the cable."
        ));
        assert!(check_it_related(""));
    }

    #[test]
    fn system_prompt_contains_the_redirect_template() {
        // The heuristic only works if the instruction text still dictates the
        // exact redirect wording the phrases are substrings of.
        let lowered = SYSTEM_PROMPT.to_lowercase();
        for phrase in REDIRECT_PHRASES {
            assert!(lowered.contains(phrase), "{phrase:?}");
        }
    }

    #[test]
    fn fallback_is_used_when_primary_fails_to_initialise() {
        let client = Client::new("test-key").unwrap();
        let history = build_conversation_history(&[message(MessageRole::User, "hi")]);

        let (session, model) =
            start_chat_with_fallback(&client, "not a model", "gemini-1.5-pro", history.clone())
                .unwrap();
        assert_eq!(model, "gemini-1.5-pro");
        assert_eq!(session.generation_config(), &GENERATION_CONFIG);
        assert_eq!(session.history().len(), history.len());
    }

    #[test]
    fn primary_model_wins_when_it_initialises() {
        let client = Client::new("test-key").unwrap();
        let (session, model) =
            start_chat_with_fallback(&client, "gemini-2.5-flash", "gemini-1.5-pro", vec![])
                .unwrap();
        assert_eq!(model, "gemini-2.5-flash");
        assert_eq!(session.generation_config(), &GENERATION_CONFIG);
    }

    #[test]
    fn failing_fallback_surfaces_an_error() {
        let client = Client::new("test-key").unwrap();
        let result = start_chat_with_fallback(&client, "not a model", "also bad", vec![]);
        assert!(matches!(result, Err(ServerError::Upstream(_))));
    }
}
