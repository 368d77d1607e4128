//! Data models shared by the generation route, the commands and the reveal

use serde::{Deserialize, Serialize};

/// The three files produced for a single prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCode {
    pub html: String,
    pub css: String,
    pub javascript: String,
}

impl GeneratedCode {
    /// Source text per face, opposite faces sharing a file
    pub fn face_sources(&self) -> [&str; 6] {
        [
            &self.html,
            &self.css,
            &self.javascript,
            &self.html,
            &self.css,
            &self.javascript,
        ]
    }
}

/// Labels drawn above each face, in face order
pub const FACE_LABELS: [&str; 6] = ["HTML", "CSS", "JS", "HTML", "CSS", "JS"];

/// Body returned by the generation route on client errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Where a generated triplet came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationSource {
    Model,
    Fallback,
}

/// A generation result together with bookkeeping for logs and events
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutcome {
    pub code: GeneratedCode,
    pub source: GenerationSource,
    pub generated_at: String,
}
