//! Completion service configuration

use crate::paths::get_completion_config_path;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable that overrides the stored API key
pub const API_KEY_ENV: &str = "CODECUBE_API_KEY";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CompletionConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_model() -> String {
    "openai/chatgpt-4o-latest".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            model: default_model(),
            api_key: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl CompletionConfig {
    /// API key to use: the environment wins over the stored key. Blank keys count as missing.
    pub fn resolved_api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .or_else(|| self.api_key.clone())
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
    }

    /// Copy safe to hand to the frontend
    pub fn redacted(&self) -> Self {
        Self {
            api_key: self.api_key.as_ref().map(|_| "********".to_string()),
            ..self.clone()
        }
    }
}

pub fn load_completion_config() -> Result<CompletionConfig, String> {
    load_completion_config_from(&get_completion_config_path()?)
}

pub fn save_completion_config(config: &CompletionConfig) -> Result<(), String> {
    save_completion_config_to(&get_completion_config_path()?, config)
}

pub fn load_completion_config_from(path: &Path) -> Result<CompletionConfig, String> {
    if !path.exists() {
        return Ok(CompletionConfig::default());
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read completion config: {}", e))?;
    serde_json::from_str(&content).map_err(|e| format!("Failed to parse completion config: {}", e))
}

pub fn save_completion_config_to(path: &Path, config: &CompletionConfig) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory: {}", e))?;
    }
    let content = serde_json::to_string_pretty(config)
        .map_err(|e| format!("Failed to serialize completion config: {}", e))?;
    std::fs::write(path, content).map_err(|e| format!("Failed to save completion config: {}", e))?;
    info!("[config] Saved completion config to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_completion_config_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, CompletionConfig::default());
        assert_eq!(config.max_tokens, 2000);
        assert!((config.temperature - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn save_then_load_keeps_key_and_model() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = CompletionConfig {
            api_key: Some("sk-test".to_string()),
            model: "openai/gpt-4o-mini".to_string(),
            ..CompletionConfig::default()
        };
        save_completion_config_to(&path, &config).unwrap();

        let loaded = load_completion_config_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "model": "meta/llama" }"#).unwrap();

        let loaded = load_completion_config_from(&path).unwrap();
        assert_eq!(loaded.model, "meta/llama");
        assert_eq!(loaded.api_base, "https://openrouter.ai/api/v1");
        assert_eq!(loaded.timeout_secs, 60);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(load_completion_config_from(&path).is_err());
    }

    #[test]
    fn redacted_hides_key() {
        let config = CompletionConfig {
            api_key: Some("sk-secret".to_string()),
            ..CompletionConfig::default()
        };
        let redacted = config.redacted();
        assert_eq!(redacted.api_key.as_deref(), Some("********"));
        assert_eq!(redacted.model, config.model);
        assert_eq!(CompletionConfig::default().redacted().api_key, None);
    }
}
