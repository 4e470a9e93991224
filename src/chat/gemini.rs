//! HTTP client for the Gemini `generateContent` endpoint.
//!
//! No chat awareness: one request in, one string out.

use super::generator::{GenerationError, GenerationRequest, TextGenerator};
use super::Role;
use crate::constants::{GEMINI_BASE_URL, GEMINI_DEFAULT_MODEL, GEMINI_TIMEOUT_SECS};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Construction-time settings for [`GeminiClient`]
#[derive(Debug, Clone, PartialEq)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: GEMINI_DEFAULT_MODEL.to_string(),
            base_url: GEMINI_BASE_URL.to_string(),
            timeout_secs: GEMINI_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "Failed to build HTTP client, using defaults");
                reqwest::Client::new()
            });

        Self {
            http,
            api_key: config.api_key.filter(|k| !k.trim().is_empty()),
            model: config.model,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

// ----------------------------------------------------------------------------
// Wire format
// ----------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn wire_role(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "model",
    }
}

fn build_request(request: &GenerationRequest) -> GenerateContentRequest<'_> {
    // The conversation sent upstream must open with a user turn, so the
    // locally generated greeting is left out.
    let history = request
        .history
        .iter()
        .skip_while(|t| t.role == Role::Assistant);

    let mut contents: Vec<Content<'_>> = history
        .map(|t| Content {
            role: Some(wire_role(t.role)),
            parts: vec![Part { text: &t.text }],
        })
        .collect();
    contents.push(Content {
        role: Some(wire_role(Role::User)),
        parts: vec![Part { text: &request.message }],
    });

    GenerateContentRequest {
        system_instruction: Content {
            role: None,
            parts: vec![Part { text: &request.system_instruction }],
        },
        contents,
        generation_config: request
            .temperature
            .map(|temperature| GenerationConfig { temperature }),
    }
}

/// Concatenated text parts of the first candidate
fn extract_text(response: GenerateContentResponse) -> Option<String> {
    let content = response.candidates.into_iter().next()?.content?;
    let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let api_key = self.api_key.as_deref().ok_or(GenerationError::MissingApiKey)?;
        let body = build_request(request);

        debug!(
            model = %self.model,
            history = request.history.len(),
            "Sending generateContent request"
        );

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

        extract_text(parsed).ok_or(GenerationError::EmptyResponse)
    }
}

/// One-shot HTTP responder on a loopback port, for exercising the client end to end
#[cfg(test)]
pub(crate) mod test_server {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve a single request with `status` and JSON `body`.
    /// Returns the base URL and a handle resolving to the raw request text.
    pub(crate) async fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                if request_complete(&raw) {
                    break;
                }
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&raw).into_owned()
        });

        (format!("http://{addr}/v1beta"), handle)
    }

    fn request_complete(raw: &[u8]) -> bool {
        let Some(end) = raw.windows(4).position(|w| w == b"\r\n\r\n") else {
            return false;
        };
        let head = String::from_utf8_lossy(&raw[..end]).to_ascii_lowercase();
        let length = head
            .lines()
            .find_map(|l| l.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        raw.len() >= end + 4 + length
    }
}

#[cfg(test)]
mod tests {
    use super::super::Turn;
    use super::*;

    fn request(history: Vec<Turn>, message: &str) -> GenerationRequest {
        GenerationRequest {
            system_instruction: "persona".into(),
            history,
            message: message.into(),
            temperature: Some(0.7),
        }
    }

    #[test]
    fn client_trims_trailing_slash_and_builds_endpoint() {
        let client = GeminiClient::new(GeminiConfig {
            base_url: "http://localhost:8080/v1beta/".into(),
            model: "gemini-test".into(),
            ..GeminiConfig::default()
        });
        assert_eq!(
            client.endpoint(),
            "http://localhost:8080/v1beta/models/gemini-test:generateContent"
        );
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let client = GeminiClient::new(GeminiConfig {
            api_key: Some("  ".into()),
            ..GeminiConfig::default()
        });
        assert!(!client.has_api_key());
    }

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let client = GeminiClient::new(GeminiConfig::default());
        let err = client.generate(&request(vec![], "hi")).await.unwrap_err();
        assert!(matches!(err, GenerationError::MissingApiKey));
    }

    #[test]
    fn request_carries_history_message_and_persona() {
        let history = vec![
            Turn::new(Role::Assistant, "greeting"),
            Turn::new(Role::User, "first"),
            Turn::new(Role::Assistant, "reply"),
        ];
        let req = request(history, "second");
        let json = serde_json::to_value(build_request(&req)).unwrap();

        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "persona");
        assert!(json["systemInstruction"].get("role").is_none());

        let contents = json["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[0]["parts"][0]["text"], "first");
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(contents[2]["role"], "user");
        assert_eq!(contents[2]["parts"][0]["text"], "second");

        // f32 precision: 0.7f32 round-trips through JSON as ~0.699999988
        let temp = json["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temp - 0.7).abs() < 0.001);
    }

    #[test]
    fn temperature_is_omitted_when_unset() {
        let mut req = request(vec![], "hi");
        req.temperature = None;
        let json = serde_json::to_value(build_request(&req)).unwrap();
        assert!(json.get("generationConfig").is_none());
    }

    #[test]
    fn response_text_parts_are_joined() {
        let raw = r#"{
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "多喝水，"}, {"text": "早点休息。"}]}},
                {"content": {"role": "model", "parts": [{"text": "ignored"}]}}
            ]
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(extract_text(parsed).as_deref(), Some("多喝水，早点休息。"));
    }

    #[test]
    fn response_without_text_is_none() {
        for raw in [
            r#"{}"#,
            r#"{"candidates": []}"#,
            r#"{"candidates": [{"finishReason": "SAFETY"}]}"#,
            r#"{"candidates": [{"content": {"parts": [{"inlineData": {}}]}}]}"#,
        ] {
            let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
            assert!(extract_text(parsed).is_none(), "{raw}");
        }
    }

    #[test]
    fn api_error_message_is_unwrapped() {
        let body = r#"{"error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(error_message(body), "Quota exceeded");
        assert_eq!(error_message("plain text"), "plain text");
    }

    fn local_client(base_url: String) -> GeminiClient {
        GeminiClient::new(GeminiConfig {
            api_key: Some("test-key".into()),
            model: "gemini-test".into(),
            base_url,
            timeout_secs: 5,
        })
    }

    #[tokio::test]
    async fn posts_to_endpoint_and_returns_candidate_text() {
        let (base, server) = test_server::serve_once(
            "200 OK",
            r#"{"candidates":[{"content":{"parts":[{"text":"您好"},{"text":"，王爷爷"}]}}]}"#,
        )
        .await;
        let client = local_client(base);

        let text = client.generate(&request(vec![], "早上好")).await.unwrap();
        assert_eq!(text, "您好，王爷爷");

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /v1beta/models/gemini-test:generateContent "));
        assert!(raw.to_ascii_lowercase().contains("x-goog-api-key: test-key"));
        assert!(raw.contains("早上好"));
    }

    #[tokio::test]
    async fn error_status_maps_to_api_error_with_message() {
        let (base, _server) = test_server::serve_once(
            "429 Too Many Requests",
            r#"{"error":{"code":429,"message":"Quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#,
        )
        .await;
        let err = local_client(base)
            .generate(&request(vec![], "hi"))
            .await
            .unwrap_err();
        match err {
            GenerationError::Api { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "Quota exceeded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_candidate_list_is_empty_response() {
        let (base, _server) = test_server::serve_once("200 OK", r#"{"candidates":[]}"#).await;
        let err = local_client(base)
            .generate(&request(vec![], "hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::EmptyResponse));
    }

    #[tokio::test]
    async fn malformed_body_is_invalid_response() {
        let (base, _server) = test_server::serve_once("200 OK", "not json").await;
        let err = local_client(base)
            .generate(&request(vec![], "hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::InvalidResponse(_)));
    }
}
