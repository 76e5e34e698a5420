use std::collections::HashSet;
use std::sync::LazyLock;

use tracing::debug;

use crate::constants::NOT_ANSWERABLE_SENTINEL;

use super::error::AnswerError;

/// The raw extraction step: given a question and joined context, return an
/// answer span or the not-answerable sentinel.
///
/// Implementations typically wrap a language model; they are external to this
/// crate. Errors are collaborator failures, not "no answer".
pub trait SpanExtractor: Send + Sync {
    fn extract_span(&self, question: &str, context: &str) -> Result<String, AnswerError>;
}

impl<F> SpanExtractor for F
where
    F: Fn(&str, &str) -> Result<String, AnswerError> + Send + Sync,
{
    fn extract_span(&self, question: &str, context: &str) -> Result<String, AnswerError> {
        self(question, context)
    }
}

const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "do", "does", "did", "will", "would", "could", "should", "may", "might", "must", "can", "to",
    "of", "in", "for", "on", "with", "at", "by", "from", "as", "into", "and", "but", "if", "or",
    "what", "which", "who", "whom", "where", "when", "why", "how", "this", "that", "these",
    "those", "it", "its", "i", "me", "my", "we", "our", "you", "your",
];

static STOP_WORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOP_WORDS.iter().copied().collect());

fn content_words(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty() && !STOP_WORD_SET.contains(*w))
        .map(str::to_string)
        .collect()
}

/// Deterministic fallback extractor used when no model is wired in.
///
/// Returns the context sentence sharing the most content words with the
/// question (first wins on ties), or the sentinel when nothing overlaps.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalSpanExtractor;

impl SpanExtractor for LexicalSpanExtractor {
    fn extract_span(&self, question: &str, context: &str) -> Result<String, AnswerError> {
        let question_words = content_words(question);
        if question_words.is_empty() {
            return Ok(NOT_ANSWERABLE_SENTINEL.to_string());
        }

        let sentences = context
            .split(['\n', '!', '?'])
            .flat_map(|line| line.split(". "))
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let mut best: Option<(&str, usize)> = None;
        for sentence in sentences {
            let overlap = content_words(sentence).intersection(&question_words).count();
            // Strictly greater: the first sentence wins ties.
            if overlap > best.map_or(0, |(_, o)| o) {
                best = Some((sentence, overlap));
            }
        }

        debug!(
            question_terms = question_words.len(),
            best_overlap = best.map(|(_, o)| o),
            "Lexical span extraction"
        );

        Ok(best
            .map(|(sentence, _)| sentence.to_string())
            .unwrap_or_else(|| NOT_ANSWERABLE_SENTINEL.to_string()))
    }
}
