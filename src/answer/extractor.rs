use tracing::{debug, info};

use crate::constants::{DEFAULT_MAX_PASSAGES, DEFAULT_MIN_OVERLAP, NOT_ANSWERABLE_SENTINEL};

use super::error::AnswerError;
use super::primitive::{LexicalSpanExtractor, SpanExtractor};
use super::text::{normalize_operational, overlap_ratio};
use super::types::{ExtractedAnswer, ExtractionState, ExtractionTrace};

/// Tags whose answers get operational (path/command) normalization by default.
pub const DEFAULT_OPERATIONAL_TAGS: &[&str] = &["ops", "operational", "runbook", "infra", "deploy"];

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractorConfig {
    /// Passages joined into the context, counted from the top.
    pub max_passages: usize,
    /// Answers whose token overlap with the context is below this are rejected.
    pub min_overlap: f32,
    /// Tags (case-insensitive) treated as operational.
    pub operational_tags: Vec<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_passages: DEFAULT_MAX_PASSAGES,
            min_overlap: DEFAULT_MIN_OVERLAP,
            operational_tags: DEFAULT_OPERATIONAL_TAGS
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }
}

impl ExtractorConfig {
    pub fn validate(&self) -> Result<(), AnswerError> {
        if self.max_passages == 0 {
            return Err(AnswerError::InvalidConfig {
                reason: "max_passages must be at least 1".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.min_overlap) {
            return Err(AnswerError::InvalidConfig {
                reason: format!(
                    "min_overlap must be between 0.0 and 1.0, got {}",
                    self.min_overlap
                ),
            });
        }
        Ok(())
    }

    pub fn is_operational(&self, tag: &str) -> bool {
        self.operational_tags
            .iter()
            .any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// Single-pass answer extraction with an answerability gate.
///
/// `DRAFTING → NORMALIZING → GATING → ACCEPTED`, with a direct jump to
/// `REJECTED` when the primitive returns the sentinel or the answer is not
/// grounded in the context (overlap ratio below `min_overlap`).
pub struct AnswerExtractor<E = LexicalSpanExtractor> {
    primitive: E,
    config: ExtractorConfig,
}

impl<E> std::fmt::Debug for AnswerExtractor<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnswerExtractor")
            .field("config", &self.config)
            .finish()
    }
}

impl AnswerExtractor<LexicalSpanExtractor> {
    /// Extractor backed by the deterministic lexical primitive.
    pub fn lexical(config: ExtractorConfig) -> Result<Self, AnswerError> {
        Self::new(LexicalSpanExtractor, config)
    }
}

impl<E: SpanExtractor> AnswerExtractor<E> {
    pub fn new(primitive: E, config: ExtractorConfig) -> Result<Self, AnswerError> {
        config.validate()?;
        Ok(Self { primitive, config })
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extracts an answer for `question` from the ranked passages.
    pub fn extract<S: AsRef<str>>(
        &self,
        question: &str,
        passages: &[S],
        tag: &str,
    ) -> Result<ExtractedAnswer, AnswerError> {
        Ok(self.extract_with_trace(question, passages, tag)?.answer)
    }

    /// Like [`extract`](Self::extract), also returning the visited states.
    pub fn extract_with_trace<S: AsRef<str>>(
        &self,
        question: &str,
        passages: &[S],
        tag: &str,
    ) -> Result<ExtractionTrace, AnswerError> {
        let mut states = vec![ExtractionState::Drafting];

        let used = passages.len().min(self.config.max_passages);
        let context = passages[..used]
            .iter()
            .map(|p| p.as_ref())
            .collect::<Vec<&str>>()
            .join("\n\n");
        let raw = self.primitive.extract_span(question, &context)?;

        states.push(ExtractionState::Normalizing);
        if raw.trim().eq_ignore_ascii_case(NOT_ANSWERABLE_SENTINEL) {
            states.push(ExtractionState::Rejected);
            debug!(tag, ?states, "Extractor signalled no answer");
            return Ok(ExtractionTrace {
                answer: ExtractedAnswer::NotAnswerable,
                states,
                raw,
                overlap: None,
                passages_used: used,
            });
        }

        let normalized = if self.config.is_operational(tag) {
            normalize_operational(&raw)
        } else {
            raw.trim().to_string()
        };

        states.push(ExtractionState::Gating);
        if normalized.eq_ignore_ascii_case(NOT_ANSWERABLE_SENTINEL) {
            states.push(ExtractionState::Rejected);
            return Ok(ExtractionTrace {
                answer: ExtractedAnswer::NotAnswerable,
                states,
                raw,
                overlap: None,
                passages_used: used,
            });
        }

        let mut overlap = None;
        if !normalized.is_empty() {
            let ratio = overlap_ratio(&normalized, &context);
            overlap = Some(ratio);
            if ratio < self.config.min_overlap {
                states.push(ExtractionState::Rejected);
                info!(
                    tag,
                    overlap = ratio,
                    min_overlap = self.config.min_overlap,
                    "Answer rejected: not grounded in context"
                );
                return Ok(ExtractionTrace {
                    answer: ExtractedAnswer::NotAnswerable,
                    states,
                    raw,
                    overlap,
                    passages_used: used,
                });
            }
        }

        states.push(ExtractionState::Accepted);
        debug!(
            tag,
            overlap,
            answer_len = normalized.len(),
            "Answer accepted"
        );

        Ok(ExtractionTrace {
            answer: ExtractedAnswer::Answer(normalized),
            states,
            raw,
            overlap,
            passages_used: used,
        })
    }
}
