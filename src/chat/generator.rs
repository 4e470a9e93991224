//! Text generation seam between the chat session and an LLM provider

use super::Turn;
use async_trait::async_trait;

/// Everything one outbound generation call carries
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub system_instruction: String,
    /// Prior transcript, oldest first. Does not include `message`.
    pub history: Vec<Turn>,
    pub message: String,
    pub temperature: Option<f32>,
}

/// Errors from a text generation provider.
///
/// The chat layer collapses all of these into one fallback reply; the
/// variants only matter for logging.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("no API key configured")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("response contained no text")]
    EmptyResponse,
}

/// Provider of assistant replies (allows swapping in a fake)
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}
