use std::path::Path;

use tracing::{debug, info};

use crate::constants::{EMBEDDING_STAT_COUNT, SCALAR_FEATURE_COUNT, validate_embedding_dim};
use crate::features::FeatureVector;

use super::error::ScoringError;
use super::model::{FusionModel, MlpModel};
use super::types::FusionConfig;

/// Combines a [`FeatureVector`] into a single fused relevance score.
///
/// Scoring is deterministic: identical parameters and inputs always produce
/// the same bits.
#[derive(Debug, Clone, Default)]
pub struct FusionScorer {
    model: FusionModel,
}

impl FusionScorer {
    pub fn new(model: FusionModel) -> Self {
        Self { model }
    }

    /// Builds the scorer described by `config`.
    pub fn from_config(config: &FusionConfig) -> Result<Self, ScoringError> {
        let model = match config {
            FusionConfig::Linear { weights, bias } => FusionModel::linear(*weights, *bias),
            FusionConfig::Mlp {
                model_path,
                weights,
                activation,
                embedding_stats,
            } => {
                let mlp = match (model_path, weights) {
                    (Some(path), None) => MlpModel::load(path, *activation, *embedding_stats)?,
                    (None, Some(weights)) => {
                        MlpModel::from_weights(weights, *activation, *embedding_stats)?
                    }
                    (Some(_), Some(_)) => {
                        return Err(ScoringError::InvalidConfig {
                            reason: "mlp mode takes either model_path or weights, not both"
                                .to_string(),
                        });
                    }
                    (None, None) => {
                        return Err(ScoringError::InvalidConfig {
                            reason: "mlp mode requires model_path or weights".to_string(),
                        });
                    }
                };
                let expected = SCALAR_FEATURE_COUNT
                    + if *embedding_stats {
                        EMBEDDING_STAT_COUNT
                    } else {
                        0
                    };
                validate_embedding_dim(mlp.input_width(), expected).map_err(|e| {
                    ScoringError::InvalidModel {
                        reason: format!("input width does not match feature layout: {e}"),
                    }
                })?;
                FusionModel::NonLinear(mlp)
            }
        };

        info!(
            mode = model.kind(),
            input_width = model.input_width(),
            embedding_stats = model.uses_embedding_stats(),
            "Fusion scorer ready"
        );

        Ok(Self { model })
    }

    /// Reads a JSON [`FusionConfig`] from disk and builds the scorer.
    pub fn from_file(path: &Path) -> Result<Self, ScoringError> {
        let config = FusionConfig::from_file(path)?;
        Self::from_config(&config)
    }

    pub fn model(&self) -> &FusionModel {
        &self.model
    }

    /// Scores one candidate.
    pub fn score(&self, features: &FeatureVector) -> Result<f32, ScoringError> {
        let input = features.model_input(self.model.uses_embedding_stats());
        self.score_inputs(&input)
    }

    /// Scores a raw input row (scalars, optionally followed by embedding stats).
    pub fn score_inputs(&self, input: &[f32]) -> Result<f32, ScoringError> {
        let score = self.model.forward(input)?;
        debug!(mode = self.model.kind(), score, "Fused score");
        Ok(score)
    }
}
