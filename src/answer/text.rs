//! Tokenization and normalization helpers for answer grounding.

use std::collections::HashSet;

fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '.' | '/' | '-')
}

/// Lower-cased word-like tokens: runs of alphanumerics plus `_./-`.
pub fn tokenize(text: &str) -> HashSet<String> {
    text.split(|c: char| !is_token_char(c))
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Fraction of distinct answer tokens that also occur in the context.
///
/// Returns `0.0` when the answer has no tokens.
pub fn overlap_ratio(answer: &str, context: &str) -> f32 {
    let answer_tokens = tokenize(answer);
    if answer_tokens.is_empty() {
        return 0.0;
    }
    let context_tokens = tokenize(context);
    let shared = answer_tokens.intersection(&context_tokens).count();
    shared as f32 / answer_tokens.len() as f32
}

/// Normalization for operational answers: forward-slash paths, no back-ticks,
/// single spaces.
pub fn normalize_operational(answer: &str) -> String {
    answer
        .replace('\\', "/")
        .replace('`', "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
