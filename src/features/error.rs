use thiserror::Error;

use crate::constants::DimValidationError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    #[error("shape mismatch in {field}: expected {expected} elements, got {actual}")]
    ShapeMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("non-finite value in {field}{}", .index.map(|i| format!("[{i}]")).unwrap_or_default())]
    NonFiniteValue {
        field: &'static str,
        index: Option<usize>,
    },

    #[error("invalid dimensionality: {0}")]
    InvalidDimension(#[from] DimValidationError),
}

impl FeatureError {
    /// Attributes a dimension check failure to an embedding field.
    pub(crate) fn for_field(field: &'static str, err: DimValidationError) -> Self {
        match err {
            DimValidationError::DimensionMismatch { expected, actual } => Self::ShapeMismatch {
                field,
                expected,
                actual,
            },
            other => Self::InvalidDimension(other),
        }
    }
}
