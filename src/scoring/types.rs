use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::SCALAR_FEATURE_COUNT;

use super::error::ScoringError;

/// Per-sub-score weights for linear fusion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinearWeights {
    pub lexical: f32,
    pub vector: f32,
    pub title: f32,
    pub short_doc: f32,
    pub lexical_rank: f32,
    pub vector_rank: f32,
    pub length_norm: f32,
}

impl Default for LinearWeights {
    fn default() -> Self {
        Self {
            lexical: 0.35,
            vector: 0.35,
            title: 0.10,
            short_doc: 0.05,
            lexical_rank: 0.05,
            vector_rank: 0.05,
            length_norm: 0.05,
        }
    }
}

impl LinearWeights {
    /// Weights in [`ScalarScores`](crate::features::ScalarScores) order.
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

/// Smooth hidden-layer activation for the two-layer model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    #[default]
    Gelu,
    Tanh,
    Silu,
}

/// Inline parameters for the two-layer model (row-major).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlpWeights {
    pub input_width: usize,
    /// `[hidden_width × input_width]`
    pub hidden_weight: Vec<f32>,
    /// `[hidden_width]`
    pub hidden_bias: Vec<f32>,
    /// `[hidden_width]`
    pub output_weight: Vec<f32>,
    #[serde(default)]
    pub output_bias: f32,
}

/// Fusion model selection, as read from a JSON configuration file.
///
/// ```json
/// {"mode": "mlp", "model_path": "fusion.safetensors", "activation": "tanh", "embedding_stats": true}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum FusionConfig {
    Linear {
        #[serde(default)]
        weights: LinearWeights,
        #[serde(default)]
        bias: f32,
    },
    Mlp {
        /// Safetensors file with `hidden.{weight,bias}` and `output.{weight,bias}`.
        #[serde(default)]
        model_path: Option<PathBuf>,
        #[serde(default)]
        weights: Option<MlpWeights>,
        #[serde(default)]
        activation: Activation,
        /// Append embedding summary statistics to the scalar inputs.
        #[serde(default)]
        embedding_stats: bool,
    },
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self::Linear {
            weights: LinearWeights::default(),
            bias: 0.0,
        }
    }
}

impl FusionConfig {
    /// Reads a JSON configuration; a relative `model_path` is resolved against
    /// the file's directory.
    pub fn from_file(path: &Path) -> Result<Self, ScoringError> {
        let content = std::fs::read_to_string(path).map_err(|e| ScoringError::InvalidConfig {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;
        let mut config: Self =
            serde_json::from_str(&content).map_err(|e| ScoringError::InvalidConfig {
                reason: format!("failed to parse {}: {}", path.display(), e),
            })?;

        if let Self::Mlp {
            model_path: Some(model_path),
            ..
        } = &mut config
            && model_path.is_relative()
            && let Some(dir) = path.parent()
        {
            *model_path = dir.join(&*model_path);
        }

        Ok(config)
    }
}
