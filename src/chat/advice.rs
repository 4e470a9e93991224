//! One-shot health advice for the daily briefing

use super::{GenerationError, GenerationRequest, TextGenerator};
use crate::constants::{ADVICE_PERSONA, GENERATION_TEMPERATURE};
use crate::types::VitalReading;
use tracing::{debug, warn};

pub const ADVICE_EMPTY_FALLBACK: &str = "抱歉，我现在无法提供建议。";
pub const ADVICE_ERROR_FALLBACK: &str = "连接AI助理失败，请稍后再试。";

/// Prompt asking for advice on today's readings
pub fn advice_prompt(vitals: &[VitalReading]) -> String {
    let mut prompt = String::from("以下是老人今天的体征数据，请给出通俗易懂的健康建议：\n");
    for v in vitals {
        prompt.push_str(&format!(
            "- {}：{} {}（{}，{}）\n",
            v.label,
            v.value,
            v.unit,
            v.status.label(),
            v.trend.describe()
        ));
    }
    prompt
}

/// Ask the advice persona about `prompt`. Never fails: problems become a fallback text.
pub async fn health_advice(generator: &dyn TextGenerator, prompt: &str) -> String {
    let request = GenerationRequest {
        system_instruction: ADVICE_PERSONA.to_string(),
        history: Vec::new(),
        message: prompt.to_string(),
        temperature: Some(GENERATION_TEMPERATURE),
    };
    match generator.generate(&request).await {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) | Err(GenerationError::EmptyResponse) => {
            debug!("Advice request returned no text");
            ADVICE_EMPTY_FALLBACK.to_string()
        }
        Err(e) => {
            warn!(error = %e, "Advice request failed");
            ADVICE_ERROR_FALLBACK.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::fake::ScriptedGenerator;
    use super::*;
    use crate::data::VITALS;

    #[test]
    fn prompt_lists_every_vital() {
        let prompt = advice_prompt(&VITALS);
        for v in &VITALS {
            assert!(prompt.contains(v.label), "missing {}", v.label);
        }
        assert!(prompt.contains("- 总胆固醇：5.4 mmol/L（异常，比昨日上升）"));
    }

    #[tokio::test]
    async fn advice_uses_advice_persona_without_history() {
        let generator = ScriptedGenerator::replying("建议清淡饮食。");
        let text = health_advice(&generator, "血脂偏高怎么办").await;
        assert_eq!(text, "建议清淡饮食。");

        let requests = generator.requests.lock().unwrap();
        assert_eq!(requests[0].system_instruction, ADVICE_PERSONA);
        assert!(requests[0].history.is_empty());
        assert_eq!(requests[0].message, "血脂偏高怎么办");
    }

    #[tokio::test]
    async fn advice_failures_map_to_fixed_texts() {
        assert_eq!(
            health_advice(&ScriptedGenerator::failing(), "x").await,
            ADVICE_ERROR_FALLBACK
        );
        assert_eq!(
            health_advice(&ScriptedGenerator::replying(""), "x").await,
            ADVICE_EMPTY_FALLBACK
        );
    }

    #[tokio::test]
    async fn gemini_reply_without_candidates_yields_empty_advice_fallback() {
        let (base_url, _server) =
            super::super::gemini::test_server::serve_once("200 OK", r#"{"candidates":[]}"#).await;
        let client = super::super::GeminiClient::new(super::super::GeminiConfig {
            api_key: Some("test-key".into()),
            base_url,
            ..Default::default()
        });

        assert_eq!(health_advice(&client, "血脂偏高怎么办").await, ADVICE_EMPTY_FALLBACK);
    }
}
