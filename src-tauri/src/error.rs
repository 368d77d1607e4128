//! Error taxonomy for code generation

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    /// Prompt absent, not a string, or empty. The only variant surfaced to callers.
    #[error("Valid prompt is required")]
    InvalidInput,

    #[error("Completion API key not configured")]
    MissingApiKey,

    #[error("Completion request failed: {0}")]
    Upstream(String),

    #[error("Completion API error ({status}): {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("No response from completion service")]
    EmptyCompletion,

    #[error("Invalid completion format: {0}")]
    MalformedCompletion(String),
}

impl GenerationError {
    /// Whether the fallback template should replace this failure
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, GenerationError::InvalidInput)
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        GenerationError::Upstream(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_invalid_input_is_unrecoverable() {
        assert!(!GenerationError::InvalidInput.is_recoverable());
        assert!(GenerationError::MissingApiKey.is_recoverable());
        assert!(GenerationError::EmptyCompletion.is_recoverable());
        assert!(GenerationError::Upstream("timeout".into()).is_recoverable());
        assert!(GenerationError::MalformedCompletion("eof".into()).is_recoverable());
        assert!(GenerationError::UpstreamStatus {
            status: 502,
            body: String::new()
        }
        .is_recoverable());
    }

    #[test]
    fn invalid_input_message_matches_route_body() {
        assert_eq!(
            GenerationError::InvalidInput.to_string(),
            "Valid prompt is required"
        );
    }
}
