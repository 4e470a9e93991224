//! User settings stored as settings.json in the app data directory

use crate::chat::GeminiConfig;
use crate::constants::{API_KEY_ENV_VARS, GEMINI_BASE_URL, GEMINI_DEFAULT_MODEL, GEMINI_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // Assistant
    pub api_key: Option<String>,
    pub model: String,
    pub api_base_url: String,
    pub request_timeout_secs: u64,

    // Font override for CJK text
    pub font_path: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            api_key: None,
            model: GEMINI_DEFAULT_MODEL.to_string(),
            api_base_url: GEMINI_BASE_URL.to_string(),
            request_timeout_secs: GEMINI_TIMEOUT_SECS,
            font_path: None,
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }

    /// Client configuration, with `env_key` taking precedence over the stored key.
    pub fn gemini_config(&self, env_key: Option<String>) -> GeminiConfig {
        GeminiConfig {
            api_key: env_key.or_else(|| self.api_key.clone()),
            model: self.model.clone(),
            base_url: self.api_base_url.clone(),
            timeout_secs: self.request_timeout_secs,
        }
    }
}

/// First non-empty API key found in the environment
pub fn api_key_from_env() -> Option<String> {
    API_KEY_ENV_VARS
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Settings::load(dir.path()), Settings::default());
    }

    #[test]
    fn corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("settings.json"), "{ not json").unwrap();
        assert_eq!(Settings::load(dir.path()), Settings::default());
    }

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            window_w: Some(480.0),
            api_key: Some("stored-key".into()),
            model: "gemini-flash".into(),
            ..Settings::default()
        };
        settings.save(dir.path());
        assert_eq!(Settings::load(dir.path()), settings);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("settings.json"), r#"{"model": "custom"}"#).unwrap();
        let settings = Settings::load(dir.path());
        assert_eq!(settings.model, "custom");
        assert_eq!(settings.api_base_url, GEMINI_BASE_URL);
        assert_eq!(settings.request_timeout_secs, GEMINI_TIMEOUT_SECS);
    }

    #[test]
    fn env_key_overrides_stored_key() {
        let settings = Settings {
            api_key: Some("stored".into()),
            ..Settings::default()
        };
        assert_eq!(
            settings.gemini_config(Some("env".into())).api_key.as_deref(),
            Some("env")
        );
        assert_eq!(settings.gemini_config(None).api_key.as_deref(), Some("stored"));
        assert_eq!(settings.gemini_config(None).model, GEMINI_DEFAULT_MODEL);
    }
}
