//! Completion service client and completion parsing

use crate::config::CompletionConfig;
use crate::error::GenerationError;
use crate::models::GeneratedCode;
use log::info;
use serde_json::{json, Value};
use std::future::Future;
use std::time::Duration;

const OPENROUTER_REFERER: &str = "https://codecube.frisson.app";
const OPENROUTER_TITLE: &str = "CodeCube Desktop";

/// A chat-style completion backend: system and user message in, completion text out.
pub trait CompletionService {
    fn complete(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> impl Future<Output = Result<String, GenerationError>> + Send;
}

/// Client for OpenAI-compatible `chat/completions` endpoints (OpenRouter by default)
pub struct OpenRouterClient {
    client: reqwest::Client,
    config: CompletionConfig,
    api_key: String,
}

impl OpenRouterClient {
    pub fn new(config: CompletionConfig) -> Result<Self, GenerationError> {
        let api_key = config
            .resolved_api_key()
            .ok_or(GenerationError::MissingApiKey)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.api_base.trim_end_matches('/'))
    }
}

impl CompletionService for OpenRouterClient {
    async fn complete(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, GenerationError> {
        info!(
            "[completion] Requesting {} (max_tokens={}, temperature={})",
            self.config.model, self.config.max_tokens, self.config.temperature
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("HTTP-Referer", OPENROUTER_REFERER)
            .header("X-Title", OPENROUTER_TITLE)
            .header("Content-Type", "application/json")
            .json(&json!({
                "model": self.config.model,
                "messages": [
                    { "role": "system", "content": system_prompt },
                    { "role": "user", "content": user_message }
                ],
                "temperature": self.config.temperature,
                "max_tokens": self.config.max_tokens
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let response_json: Value = response.json().await?;
        completion_text(&response_json)
    }
}

/// Pulls the first choice's message content out of a chat completion response
pub fn completion_text(response_json: &Value) -> Result<String, GenerationError> {
    response_json["choices"][0]["message"]["content"]
        .as_str()
        .filter(|content| !content.trim().is_empty())
        .map(str::to_string)
        .ok_or(GenerationError::EmptyCompletion)
}

/// Outermost `{ ... }` span of a string, for completions wrapped in prose or fences
fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if start >= end {
        return None;
    }
    Some(&raw[start..=end])
}

fn required_field(object: &Value, key: &str) -> Result<String, GenerationError> {
    object[key]
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            GenerationError::MalformedCompletion(format!("missing required field '{}'", key))
        })
}

fn code_from_value(value: &Value) -> Result<GeneratedCode, GenerationError> {
    if !value.is_object() {
        return Err(GenerationError::MalformedCompletion(
            "completion is not a JSON object".to_string(),
        ));
    }
    Ok(GeneratedCode {
        html: required_field(value, "html")?,
        css: required_field(value, "css")?,
        javascript: required_field(value, "javascript")?,
    })
}

/// Parses completion text into a [`GeneratedCode`].
///
/// The text must be a JSON object whose `html`, `css` and `javascript` fields
/// are non-empty strings. When the whole text is not JSON, the outermost
/// brace-delimited span is tried once.
pub fn parse_generated_code(content: &str) -> Result<GeneratedCode, GenerationError> {
    match serde_json::from_str::<Value>(content) {
        Ok(value) => code_from_value(&value),
        Err(strict_err) => {
            let candidate = extract_json_object(content).ok_or_else(|| {
                GenerationError::MalformedCompletion(strict_err.to_string())
            })?;
            let value: Value = serde_json::from_str(candidate)
                .map_err(|e| GenerationError::MalformedCompletion(e.to_string()))?;
            code_from_value(&value)
        }
    }
}
