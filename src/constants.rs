//! Cross-cutting, shared constants.
//!
//! # Dimension Invariants
//!
//! The embedding dimension is a runtime setting (see [`DimConfig`]), but every
//! [`FeatureVector`](crate::features::FeatureVector) built within one process is
//! expected to agree on it. [`validate_embedding_dim`] backs the embedding shape
//! check and the fusion model input-width check; the compile-time constant
//! remains the default.

pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Number of scalar retrieval sub-scores carried by a feature vector.
pub const SCALAR_FEATURE_COUNT: usize = 7;

/// Number of embedding summary statistics appended for the non-linear model.
pub const EMBEDDING_STAT_COUNT: usize = 3;

pub const DEFAULT_SHORTLIST: usize = 60;
pub const MIN_SHORTLIST: usize = 10;
pub const MAX_SHORTLIST: usize = 200;

pub const DEFAULT_TOPK: usize = 25;
pub const MIN_TOPK: usize = 5;

pub const DEFAULT_MIN_OVERLAP: f32 = 0.5;
pub const DEFAULT_MAX_PASSAGES: usize = 6;

pub const DEFAULT_LIMIT_CACHE_CAPACITY: u64 = 1024;

/// Reserved answer meaning "no grounded answer in the supplied context".
pub const NOT_ANSWERABLE_SENTINEL: &str = "NOT_ANSWERABLE";

/// Runtime dimension configuration shared by feature construction and scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimConfig {
    /// The embedding vector dimension (number of floats).
    pub embedding_dim: usize,
}

impl Default for DimConfig {
    fn default() -> Self {
        Self {
            embedding_dim: DEFAULT_EMBEDDING_DIM,
        }
    }
}

impl DimConfig {
    /// Creates a new dimension configuration with the specified embedding dimension.
    pub fn new(embedding_dim: usize) -> Self {
        Self { embedding_dim }
    }

    /// Returns an error if `embedding_dim` is zero.
    pub fn validate(&self) -> Result<(), DimValidationError> {
        if self.embedding_dim == 0 {
            return Err(DimValidationError::ZeroDimension);
        }
        Ok(())
    }
}

/// Error returned when dimension validation fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DimValidationError {
    /// Embedding dimension cannot be zero.
    ZeroDimension,
    /// Runtime dimension does not match expected dimension.
    DimensionMismatch { expected: usize, actual: usize },
}

impl std::fmt::Display for DimValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroDimension => write!(f, "embedding dimension cannot be zero"),
            Self::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "dimension mismatch: expected {}, got {}",
                    expected, actual
                )
            }
        }
    }
}

impl std::error::Error for DimValidationError {}

/// Validates that a runtime embedding dimension matches the expected dimension.
///
/// # Example
///
/// ```
/// use fusegate::constants::{validate_embedding_dim, DEFAULT_EMBEDDING_DIM};
///
/// let embedder_dim = 384;
/// validate_embedding_dim(embedder_dim, DEFAULT_EMBEDDING_DIM).unwrap();
/// ```
pub fn validate_embedding_dim(actual: usize, expected: usize) -> Result<(), DimValidationError> {
    if actual != expected {
        return Err(DimValidationError::DimensionMismatch { expected, actual });
    }
    Ok(())
}
