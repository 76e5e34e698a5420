use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("dimension mismatch: model expects {expected} inputs, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("invalid fusion model: {reason}")]
    InvalidModel { reason: String },

    #[error("failed to load fusion model from {path}: {reason}")]
    ModelLoadFailed { path: PathBuf, reason: String },

    #[error("invalid fusion configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("scoring computation failed: {reason}")]
    ComputationFailed { reason: String },
}

impl From<candle_core::Error> for ScoringError {
    fn from(err: candle_core::Error) -> Self {
        ScoringError::ComputationFailed {
            reason: err.to_string(),
        }
    }
}
