use serde::{Deserialize, Serialize};

use crate::constants::{
    DimConfig, EMBEDDING_STAT_COUNT, SCALAR_FEATURE_COUNT, validate_embedding_dim,
};

use super::error::FeatureError;
use super::types::ScalarScores;

/// Validation settings applied while constructing a [`FeatureVector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Expected length of both embeddings.
    pub dimensionality: usize,
    /// Reject NaN/Infinity in any scalar or embedding element.
    pub strict: bool,
}

impl ValidationPolicy {
    pub fn new(dimensionality: usize, strict: bool) -> Self {
        Self {
            dimensionality,
            strict,
        }
    }

    pub fn from_dims(dims: DimConfig, strict: bool) -> Self {
        Self::new(dims.embedding_dim, strict)
    }
}

/// Unvalidated feature data flowing through the validation pipeline.
#[derive(Debug, Clone)]
struct Draft {
    scalars: ScalarScores,
    query_embedding: Vec<f32>,
    document_embedding: Vec<f32>,
}

type Check = fn(Draft, &ValidationPolicy) -> Result<Draft, FeatureError>;

/// Ordered checks; the first failure short-circuits.
const PIPELINE: &[Check] = &[check_dimensionality, check_shape, check_finite];

fn check_dimensionality(draft: Draft, policy: &ValidationPolicy) -> Result<Draft, FeatureError> {
    DimConfig::new(policy.dimensionality).validate()?;
    Ok(draft)
}

fn check_shape(draft: Draft, policy: &ValidationPolicy) -> Result<Draft, FeatureError> {
    for (field, embedding) in [
        ("query_embedding", &draft.query_embedding),
        ("document_embedding", &draft.document_embedding),
    ] {
        validate_embedding_dim(embedding.len(), policy.dimensionality)
            .map_err(|e| FeatureError::for_field(field, e))?;
    }
    Ok(draft)
}

fn check_finite(draft: Draft, policy: &ValidationPolicy) -> Result<Draft, FeatureError> {
    if !policy.strict {
        return Ok(draft);
    }

    let scalars = draft.scalars.to_array();
    if let Some(idx) = scalars.iter().position(|v| !v.is_finite()) {
        return Err(FeatureError::NonFiniteValue {
            field: ScalarScores::NAMES[idx],
            index: None,
        });
    }

    for (field, embedding) in [
        ("query_embedding", &draft.query_embedding),
        ("document_embedding", &draft.document_embedding),
    ] {
        if let Some(idx) = embedding.iter().position(|v| !v.is_finite()) {
            return Err(FeatureError::NonFiniteValue {
                field,
                index: Some(idx),
            });
        }
    }
    Ok(draft)
}

/// Validated, immutable per-candidate feature record.
///
/// Both embeddings have exactly `dimensionality` elements. In strict mode every
/// element is finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FeatureRecord")]
pub struct FeatureVector {
    scalars: ScalarScores,
    query_embedding: Vec<f32>,
    document_embedding: Vec<f32>,
}

/// Plain serialized shape of a [`FeatureVector`]; deserialization re-validates.
#[derive(Debug, Clone, Deserialize)]
struct FeatureRecord {
    scalars: ScalarScores,
    query_embedding: Vec<f32>,
    document_embedding: Vec<f32>,
}

impl TryFrom<FeatureRecord> for FeatureVector {
    type Error = FeatureError;

    fn try_from(record: FeatureRecord) -> Result<Self, Self::Error> {
        let policy = ValidationPolicy::new(record.query_embedding.len(), false);
        Self::construct(
            record.scalars,
            &record.query_embedding,
            &record.document_embedding,
            policy,
        )
    }
}

impl FeatureVector {
    /// Validates and copies the inputs into a new feature vector.
    pub fn construct(
        scalars: ScalarScores,
        query_embedding: &[f32],
        document_embedding: &[f32],
        policy: ValidationPolicy,
    ) -> Result<Self, FeatureError> {
        let draft = Draft {
            scalars,
            query_embedding: query_embedding.to_vec(),
            document_embedding: document_embedding.to_vec(),
        };

        let draft = PIPELINE
            .iter()
            .try_fold(draft, |draft, check| check(draft, &policy))?;

        Ok(Self {
            scalars: draft.scalars,
            query_embedding: draft.query_embedding,
            document_embedding: draft.document_embedding,
        })
    }

    /// Like [`construct`](Self::construct), taking `f64` embeddings and narrowing them.
    pub fn construct_f64(
        scalars: ScalarScores,
        query_embedding: &[f64],
        document_embedding: &[f64],
        policy: ValidationPolicy,
    ) -> Result<Self, FeatureError> {
        let query: Vec<f32> = query_embedding.iter().map(|v| *v as f32).collect();
        let document: Vec<f32> = document_embedding.iter().map(|v| *v as f32).collect();
        Self::construct(scalars, &query, &document, policy)
    }

    pub fn scalars(&self) -> &ScalarScores {
        &self.scalars
    }

    pub fn query_embedding(&self) -> &[f32] {
        &self.query_embedding
    }

    pub fn document_embedding(&self) -> &[f32] {
        &self.document_embedding
    }

    pub fn dimensionality(&self) -> usize {
        self.query_embedding.len()
    }

    /// Returns `[cosine(query, document), ‖query‖, ‖document‖]`.
    pub fn embedding_stats(&self) -> [f32; EMBEDDING_STAT_COUNT] {
        let (dot, norm_q_sq, norm_d_sq) = self
            .query_embedding
            .iter()
            .zip(self.document_embedding.iter())
            .fold((0.0f32, 0.0f32, 0.0f32), |(dot, nq, nd), (q, d)| {
                (dot + q * d, nq + q * q, nd + d * d)
            });

        let norm_q = norm_q_sq.sqrt();
        let norm_d = norm_d_sq.sqrt();
        let cosine = if norm_q == 0.0 || norm_d == 0.0 {
            0.0
        } else {
            dot / (norm_q * norm_d)
        };

        [cosine, norm_q, norm_d]
    }

    /// Flattens the record into model input order: the scalars, optionally
    /// followed by [`embedding_stats`](Self::embedding_stats).
    pub fn model_input(&self, with_embedding_stats: bool) -> Vec<f32> {
        let mut input = Vec::with_capacity(SCALAR_FEATURE_COUNT + EMBEDDING_STAT_COUNT);
        input.extend_from_slice(&self.scalars.to_array());
        if with_embedding_stats {
            input.extend_from_slice(&self.embedding_stats());
        }
        input
    }
}
