use serde::{Serialize, Serializer};

use crate::constants::NOT_ANSWERABLE_SENTINEL;

/// Result of answer extraction: grounded text, or the not-answerable sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedAnswer {
    Answer(String),
    NotAnswerable,
}

impl ExtractedAnswer {
    pub fn is_answerable(&self) -> bool {
        matches!(self, ExtractedAnswer::Answer(_))
    }

    /// Returns the answer text, or the sentinel string.
    pub fn as_str(&self) -> &str {
        match self {
            ExtractedAnswer::Answer(text) => text,
            ExtractedAnswer::NotAnswerable => NOT_ANSWERABLE_SENTINEL,
        }
    }

    pub fn into_option(self) -> Option<String> {
        match self {
            ExtractedAnswer::Answer(text) => Some(text),
            ExtractedAnswer::NotAnswerable => None,
        }
    }
}

impl std::fmt::Display for ExtractedAnswer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ExtractedAnswer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// States visited by one extraction call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtractionState {
    Drafting,
    Normalizing,
    Gating,
    Accepted,
    Rejected,
}

impl ExtractionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ExtractionState::Accepted | ExtractionState::Rejected)
    }
}

/// Diagnostics for one extraction call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionTrace {
    pub answer: ExtractedAnswer,
    pub states: Vec<ExtractionState>,
    /// Raw span returned by the extraction primitive.
    pub raw: String,
    /// Overlap ratio computed in the gating state, if it was reached.
    pub overlap: Option<f32>,
    /// Number of passages joined into the context.
    pub passages_used: usize,
}
