//! Chat session with the companion assistant
//!
//! Holds the append-only transcript and forwards each user message, together
//! with everything said before it, to a [`TextGenerator`]. Provider failures
//! never escape this module: they become a fixed fallback reply.

mod advice;
mod gemini;
mod generator;

pub use advice::{advice_prompt, health_advice, ADVICE_ERROR_FALLBACK};
pub use gemini::{GeminiClient, GeminiConfig};
pub use generator::{GenerationError, GenerationRequest, TextGenerator};

#[cfg(test)]
pub(crate) use generator::fake;

use crate::constants::{CHAT_PERSONA, GENERATION_TEMPERATURE};
use chrono::{DateTime, Local};
use tracing::{debug, warn};

pub const GREETING: &str = "您好，王爷爷！我是您的康养小助手小悦，今天感觉怎么样？";

/// Reply used when the provider call fails
pub const BUSY_FALLBACK: &str = "服务繁忙，请稍等一下。";

/// Reply used when the provider answers with no text
pub const EMPTY_REPLY_FALLBACK: &str = "我没听清，请再说一遍？";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One message in the transcript. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub role: Role,
    pub text: String,
    pub created_at: DateTime<Local>,
}

impl Turn {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            created_at: Local::now(),
        }
    }
}

/// A submitted message waiting for its reply
#[derive(Debug, Clone)]
pub struct Exchange {
    history: Vec<Turn>,
    message: String,
}

impl Exchange {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// Issue the single provider call and return the text to show.
    pub async fn run(self, generator: &dyn TextGenerator) -> String {
        let request = GenerationRequest {
            system_instruction: CHAT_PERSONA.to_string(),
            history: self.history,
            message: self.message,
            temperature: Some(GENERATION_TEMPERATURE),
        };
        match generator.generate(&request).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) | Err(GenerationError::EmptyResponse) => {
                debug!("Assistant returned no text");
                EMPTY_REPLY_FALLBACK.to_string()
            }
            Err(e) => {
                warn!(error = %e, "Chat request failed");
                BUSY_FALLBACK.to_string()
            }
        }
    }
}

/// Transcript plus the busy flag guarding against overlapping submissions
#[derive(Debug)]
pub struct ChatSession {
    transcript: Vec<Turn>,
    busy: bool,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    /// New session opening with the assistant's greeting
    pub fn new() -> Self {
        Self {
            transcript: vec![Turn::new(Role::Assistant, GREETING)],
            busy: false,
        }
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Append the user turn and mark the session busy.
    ///
    /// Returns `None` without touching the transcript when `text` is blank or
    /// an earlier exchange has not finished.
    pub fn begin(&mut self, text: &str) -> Option<Exchange> {
        if text.trim().is_empty() {
            return None;
        }
        if self.busy {
            debug!("Submission ignored while a reply is pending");
            return None;
        }

        let exchange = Exchange {
            history: self.transcript.clone(),
            message: text.to_string(),
        };
        self.transcript.push(Turn::new(Role::User, text));
        self.busy = true;
        Some(exchange)
    }

    /// Append the assistant turn for the outstanding exchange.
    pub fn finish(&mut self, reply: String) {
        if !self.busy {
            warn!("Reply arrived with no exchange outstanding, dropping it");
            return;
        }
        self.transcript.push(Turn::new(Role::Assistant, reply));
        self.busy = false;
    }

    /// Run a whole exchange inline. Returns false if the message was rejected.
    pub async fn submit(&mut self, generator: &dyn TextGenerator, text: &str) -> bool {
        let Some(exchange) = self.begin(text) else {
            return false;
        };
        let reply = exchange.run(generator).await;
        self.finish(reply);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::fake::ScriptedGenerator;
    use super::*;

    fn last_two(session: &ChatSession) -> (&Turn, &Turn) {
        let t = session.transcript();
        (&t[t.len() - 2], &t[t.len() - 1])
    }

    #[test]
    fn new_session_starts_with_greeting() {
        let session = ChatSession::new();
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript()[0].role, Role::Assistant);
        assert_eq!(session.transcript()[0].text, GREETING);
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn successful_exchange_appends_user_then_assistant() {
        let generator = ScriptedGenerator::replying("多喝温水，注意休息。");
        let mut session = ChatSession::new();

        assert!(session.submit(&generator, "今天有点累").await);

        assert_eq!(session.transcript().len(), 3);
        let (user, assistant) = last_two(&session);
        assert_eq!(user.role, Role::User);
        assert_eq!(user.text, "今天有点累");
        assert_eq!(assistant.role, Role::Assistant);
        assert_eq!(assistant.text, "多喝温水，注意休息。");
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn failing_provider_yields_busy_fallback() {
        let generator = ScriptedGenerator::failing();
        let mut session = ChatSession::new();

        assert!(session.submit(&generator, "我血压有点高").await);

        let (user, assistant) = last_two(&session);
        assert_eq!(user.role, Role::User);
        assert_eq!(user.text, "我血压有点高");
        assert_eq!(assistant.role, Role::Assistant);
        assert_eq!(assistant.text, "服务繁忙，请稍等一下。");
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn blank_reply_yields_empty_fallback() {
        let generator = ScriptedGenerator::replying("   \n");
        let mut session = ChatSession::new();

        session.submit(&generator, "你好").await;

        assert_eq!(session.transcript().len(), 3);
        assert_eq!(session.transcript()[2].text, EMPTY_REPLY_FALLBACK);
    }

    #[tokio::test]
    async fn gemini_reply_without_candidates_yields_empty_fallback() {
        let (base_url, _server) =
            super::gemini::test_server::serve_once("200 OK", r#"{"candidates":[]}"#).await;
        let client = GeminiClient::new(GeminiConfig {
            api_key: Some("test-key".into()),
            base_url,
            ..GeminiConfig::default()
        });
        let mut session = ChatSession::new();

        assert!(session.submit(&client, "你好").await);

        let (_, assistant) = last_two(&session);
        assert_eq!(assistant.text, EMPTY_REPLY_FALLBACK);
    }

    #[tokio::test]
    async fn blank_submission_is_a_no_op() {
        let generator = ScriptedGenerator::replying("unused");
        let mut session = ChatSession::new();

        assert!(!session.submit(&generator, "").await);
        assert!(!session.submit(&generator, "  \t ").await);

        assert_eq!(session.transcript().len(), 1);
        assert_eq!(generator.request_count(), 0);
    }

    #[test]
    fn second_submission_while_busy_is_ignored() {
        let mut session = ChatSession::new();

        let first = session.begin("第一条");
        assert!(first.is_some());
        assert!(session.is_busy());
        assert!(session.begin("第二条").is_none());

        assert_eq!(session.transcript().len(), 2);
        assert_eq!(session.transcript()[1].text, "第一条");

        session.finish("好的".into());
        assert_eq!(session.transcript().len(), 3);
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn provider_sees_prior_transcript_and_new_message() {
        let generator = ScriptedGenerator::replying("收到");
        let mut session = ChatSession::new();

        session.submit(&generator, "早上好").await;
        session.submit(&generator, "我睡得不好").await;

        let requests = generator.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        let second = &requests[1];
        assert_eq!(second.message, "我睡得不好");
        let history: Vec<&str> = second.history.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(history, vec![GREETING, "早上好", "收到"]);
        assert_eq!(second.system_instruction, CHAT_PERSONA);
        assert_eq!(second.temperature, Some(GENERATION_TEMPERATURE));
    }

    #[test]
    fn finish_without_exchange_is_ignored() {
        let mut session = ChatSession::new();
        session.finish("stray".into());
        assert_eq!(session.transcript().len(), 1);
    }

    #[test]
    fn user_text_is_kept_as_typed() {
        let mut session = ChatSession::new();
        let exchange = session.begin("  头有点晕 ").unwrap();
        assert_eq!(exchange.message(), "  头有点晕 ");
        assert_eq!(exchange.history().len(), 1);
        assert_eq!(session.transcript()[1].text, "  头有点晕 ");
    }
}
