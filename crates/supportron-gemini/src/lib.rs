pub mod client;
pub mod error;
pub mod types;

pub use client::{ChatSession, Client};
pub use error::GeminiError;
pub use types::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
    Role,
};

/// Base URL of the hosted Generative Language API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
