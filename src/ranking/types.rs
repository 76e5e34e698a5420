use serde::Serialize;

use crate::features::{FeatureError, FeatureVector, ScalarScores};

/// A candidate awaiting ranking: opaque id plus validated features.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub id: String,
    pub features: FeatureVector,
}

impl Candidate {
    pub fn new(id: impl Into<String>, features: FeatureVector) -> Self {
        Self {
            id: id.into(),
            features,
        }
    }
}

/// Raw per-candidate signals, before validation.
#[derive(Debug, Clone)]
pub struct CandidateSignals {
    pub id: String,
    pub scalars: ScalarScores,
    pub query_embedding: Vec<f32>,
    pub document_embedding: Vec<f32>,
}

/// A scored candidate. Scores within one ranking call are comparable.
#[derive(Debug, Clone, Serialize)]
pub struct RankedCandidate {
    pub id: String,
    pub score: f32,
    /// Position in the caller's input sequence.
    pub input_index: usize,
    #[serde(skip)]
    pub features: FeatureVector,
}

/// Why a candidate was excluded from a ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DroppedCandidate {
    pub id: String,
    pub reason: String,
}

/// Output of a ranking call: the shortlist cut and the final top-k set.
///
/// `top` is always a prefix of `shortlist`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RankedSet {
    pub shortlist: Vec<RankedCandidate>,
    pub top: Vec<RankedCandidate>,
    pub dropped: Vec<DroppedCandidate>,
}

impl RankedSet {
    pub fn top_ids(&self) -> Vec<&str> {
        self.top.iter().map(|c| c.id.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_empty()
    }
}

pub(crate) fn feature_drop(id: &str, err: &FeatureError) -> DroppedCandidate {
    DroppedCandidate {
        id: id.to_string(),
        reason: err.to_string(),
    }
}
