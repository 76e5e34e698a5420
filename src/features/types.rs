use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::SCALAR_FEATURE_COUNT;

/// Per-candidate retrieval sub-scores, in model input order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScalarScores {
    /// Lexical (BM25-style) score.
    #[serde(default)]
    pub lexical: f32,
    /// Vector similarity score.
    #[serde(default)]
    pub vector: f32,
    /// Title match score.
    #[serde(default)]
    pub title: f32,
    /// Bonus for short documents.
    #[serde(default)]
    pub short_doc: f32,
    /// Score derived from the lexical rank.
    #[serde(default)]
    pub lexical_rank: f32,
    /// Score derived from the vector rank.
    #[serde(default)]
    pub vector_rank: f32,
    /// Length normalization factor.
    #[serde(default)]
    pub length_norm: f32,
}

impl ScalarScores {
    /// Field names, in the same order as [`ScalarScores::to_array`].
    pub const NAMES: [&'static str; SCALAR_FEATURE_COUNT] = [
        "lexical",
        "vector",
        "title",
        "short_doc",
        "lexical_rank",
        "vector_rank",
        "length_norm",
    ];

    /// Builds scores from a name → value mapping.
    ///
    /// Missing names default to `0.0`; unknown names are ignored. Values are
    /// narrowed to `f32`.
    pub fn from_map(values: &HashMap<String, f64>) -> Self {
        let mut scores = [0.0f32; SCALAR_FEATURE_COUNT];
        for (name, value) in values {
            match Self::NAMES.iter().position(|n| n == name) {
                Some(idx) => scores[idx] = *value as f32,
                None => debug!(name = %name, "Ignoring unknown scalar feature"),
            }
        }
        Self::from_array(scores)
    }

    pub fn from_array(values: [f32; SCALAR_FEATURE_COUNT]) -> Self {
        let [
            lexical,
            vector,
            title,
            short_doc,
            lexical_rank,
            vector_rank,
            length_norm,
        ] = values;
        Self {
            lexical,
            vector,
            title,
            short_doc,
            lexical_rank,
            vector_rank,
            length_norm,
        }
    }

    pub fn to_array(&self) -> [f32; SCALAR_FEATURE_COUNT] {
        [
            self.lexical,
            self.vector,
            self.title,
            self.short_doc,
            self.lexical_rank,
            self.vector_rank,
            self.length_norm,
        ]
    }
}
