//! Prompt validation and the fallback policy around the completion service

use crate::completion::{parse_generated_code, CompletionService, OpenRouterClient};
use crate::config::CompletionConfig;
use crate::error::GenerationError;
use crate::fallback::fallback_code;
use crate::models::{GeneratedCode, GenerationOutcome, GenerationSource};
use crate::prompts::{code_generation_user_message, CODE_GENERATION_SYSTEM_PROMPT};
use log::{error, info, warn};
use serde_json::Value;

/// Extracts the prompt from a request body value. It must be a non-empty string.
pub fn prompt_from_value(body: &Value) -> Result<&str, GenerationError> {
    body.get("prompt")
        .and_then(Value::as_str)
        .filter(|p| !p.is_empty())
        .ok_or(GenerationError::InvalidInput)
}

/// One attempt at the model path, with no fallback
pub async fn request_model_code<C: CompletionService>(
    service: &C,
    prompt: &str,
) -> Result<GeneratedCode, GenerationError> {
    let content = service
        .complete(
            CODE_GENERATION_SYSTEM_PROMPT,
            &code_generation_user_message(prompt),
        )
        .await?;
    parse_generated_code(&content)
}

/// Generates code for a prompt, substituting the fallback template for any
/// failure other than invalid input.
///
/// `service` is a `Result` so that a client that could not even be built
/// (no API key, bad TLS setup) takes the same fallback path as a failed call.
pub async fn generate_code<C: CompletionService>(
    service: Result<C, GenerationError>,
    prompt: &str,
) -> Result<GenerationOutcome, GenerationError> {
    if prompt.is_empty() {
        return Err(GenerationError::InvalidInput);
    }

    let attempt = match service {
        Ok(service) => request_model_code(&service, prompt).await,
        Err(e) => Err(e),
    };

    let (code, source) = match attempt {
        Ok(code) => {
            info!("[generator] Model produced code for prompt ({} chars)", prompt.len());
            (code, GenerationSource::Model)
        }
        Err(e) if e.is_recoverable() => {
            match &e {
                GenerationError::MissingApiKey => {
                    warn!("[generator] {}; using fallback template", e)
                }
                _ => error!("[generator] Error generating code: {}; using fallback template", e),
            }
            (fallback_code(prompt), GenerationSource::Fallback)
        }
        Err(e) => return Err(e),
    };

    Ok(GenerationOutcome {
        code,
        source,
        generated_at: chrono::Utc::now().to_rfc3339(),
    })
}

/// [`generate_code`] against the configured OpenRouter-compatible service
pub async fn generate_code_with_config(
    config: CompletionConfig,
    prompt: &str,
) -> Result<GenerationOutcome, GenerationError> {
    generate_code(OpenRouterClient::new(config), prompt).await
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Completion stub returning a canned reply and counting calls
    #[derive(Clone)]
    pub struct StubCompletion {
        pub reply: Result<String, String>,
        pub calls: Arc<AtomicUsize>,
    }

    impl StubCompletion {
        pub fn ok(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        pub fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl CompletionService for StubCompletion {
        async fn complete(
            &self,
            system_prompt: &str,
            user_message: &str,
        ) -> Result<String, GenerationError> {
            assert_eq!(system_prompt, CODE_GENERATION_SYSTEM_PROMPT);
            assert!(user_message.starts_with("Generate a complete web application for: "));
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone().map_err(GenerationError::Upstream)
        }
    }
}
