use std::collections::HashMap;
use std::path::Path;

use candle_core::{DType, Device, Tensor};
use candle_nn::{Linear, Module};
use tracing::{debug, info};

use super::error::ScoringError;
use super::types::{Activation, LinearWeights, MlpWeights};

impl Activation {
    fn apply(&self, xs: &Tensor) -> Result<Tensor, ScoringError> {
        let out = match self {
            Activation::Gelu => xs.gelu()?,
            Activation::Tanh => xs.tanh()?,
            Activation::Silu => candle_nn::ops::silu(xs)?,
        };
        Ok(out)
    }
}

/// Two-layer fusion network: `output(activation(hidden(x)))`.
#[derive(Clone)]
pub struct MlpModel {
    hidden: Linear,
    output: Linear,
    activation: Activation,
    input_width: usize,
    hidden_width: usize,
    embedding_stats: bool,
}

impl std::fmt::Debug for MlpModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MlpModel")
            .field("activation", &self.activation)
            .field("input_width", &self.input_width)
            .field("hidden_width", &self.hidden_width)
            .field("embedding_stats", &self.embedding_stats)
            .finish()
    }
}

impl MlpModel {
    /// Builds the model from inline row-major parameters.
    pub fn from_weights(
        weights: &MlpWeights,
        activation: Activation,
        embedding_stats: bool,
    ) -> Result<Self, ScoringError> {
        let input_width = weights.input_width;
        let hidden_width = weights.hidden_bias.len();

        if input_width == 0 || hidden_width == 0 {
            return Err(ScoringError::InvalidModel {
                reason: format!(
                    "layer widths must be non-zero (input {input_width}, hidden {hidden_width})"
                ),
            });
        }
        if weights.hidden_weight.len() != hidden_width * input_width {
            return Err(ScoringError::InvalidModel {
                reason: format!(
                    "hidden weight has {} elements, expected {}x{}",
                    weights.hidden_weight.len(),
                    hidden_width,
                    input_width
                ),
            });
        }
        if weights.output_weight.len() != hidden_width {
            return Err(ScoringError::InvalidModel {
                reason: format!(
                    "output weight has {} elements, expected {}",
                    weights.output_weight.len(),
                    hidden_width
                ),
            });
        }

        let device = Device::Cpu;
        let hidden_w = Tensor::from_slice(
            &weights.hidden_weight,
            (hidden_width, input_width),
            &device,
        )?;
        let hidden_b = Tensor::from_slice(&weights.hidden_bias, hidden_width, &device)?;
        let output_w = Tensor::from_slice(&weights.output_weight, (1, hidden_width), &device)?;
        let output_b = Tensor::from_slice(&[weights.output_bias], 1, &device)?;

        Ok(Self {
            hidden: Linear::new(hidden_w, Some(hidden_b)),
            output: Linear::new(output_w, Some(output_b)),
            activation,
            input_width,
            hidden_width,
            embedding_stats,
        })
    }

    /// Loads `hidden.{weight,bias}` and `output.{weight,bias}` from a safetensors file.
    pub fn load<P: AsRef<Path>>(
        path: P,
        activation: Activation,
        embedding_stats: bool,
    ) -> Result<Self, ScoringError> {
        let path = path.as_ref();
        let load_err = |reason: String| ScoringError::ModelLoadFailed {
            path: path.to_path_buf(),
            reason,
        };

        if !path.is_file() {
            return Err(load_err("file not found".to_string()));
        }

        info!(
            model_path = %path.display(),
            ?activation,
            "Loading fusion model"
        );

        let mut tensors = candle_core::safetensors::load(path, &Device::Cpu)
            .map_err(|e| load_err(e.to_string()))?;

        let hidden_w = take_tensor(&mut tensors, "hidden.weight").map_err(load_err)?;
        let hidden_b = take_tensor(&mut tensors, "hidden.bias").map_err(load_err)?;
        let output_w = take_tensor(&mut tensors, "output.weight").map_err(load_err)?;
        let output_b = take_tensor(&mut tensors, "output.bias").map_err(load_err)?;

        let (hidden_width, input_width) = hidden_w.dims2()?;
        let (out_rows, out_cols) = output_w.dims2()?;
        if hidden_b.elem_count() != hidden_width
            || out_rows != 1
            || out_cols != hidden_width
            || output_b.elem_count() != 1
        {
            return Err(ScoringError::InvalidModel {
                reason: format!(
                    "inconsistent layer shapes: hidden {:?}/{:?}, output {:?}/{:?}",
                    hidden_w.dims(),
                    hidden_b.dims(),
                    output_w.dims(),
                    output_b.dims()
                ),
            });
        }

        debug!(input_width, hidden_width, "Fusion model shapes");

        Ok(Self {
            hidden: Linear::new(hidden_w, Some(hidden_b.flatten_all()?)),
            output: Linear::new(output_w, Some(output_b.flatten_all()?)),
            activation,
            input_width,
            hidden_width,
            embedding_stats,
        })
    }

    pub fn input_width(&self) -> usize {
        self.input_width
    }

    pub fn hidden_width(&self) -> usize {
        self.hidden_width
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    fn forward(&self, input: &[f32]) -> Result<f32, ScoringError> {
        let xs = Tensor::from_slice(input, (1, input.len()), &Device::Cpu)?;
        let hidden = self.activation.apply(&self.hidden.forward(&xs)?)?;
        let out = self.output.forward(&hidden)?.flatten_all()?.to_vec1::<f32>()?;
        out.first()
            .copied()
            .ok_or_else(|| ScoringError::ComputationFailed {
                reason: "fusion model produced no output".to_string(),
            })
    }
}

fn take_tensor(tensors: &mut HashMap<String, Tensor>, name: &str) -> Result<Tensor, String> {
    let tensor = tensors
        .remove(name)
        .ok_or_else(|| format!("missing tensor '{name}'"))?;
    tensor.to_dtype(DType::F32).map_err(|e| e.to_string())
}

/// Fusion model: a plain weighted sum, or a two-layer network.
#[derive(Debug, Clone)]
pub enum FusionModel {
    Linear { weights: Vec<f32>, bias: f32 },
    NonLinear(MlpModel),
}

impl Default for FusionModel {
    fn default() -> Self {
        Self::linear(LinearWeights::default(), 0.0)
    }
}

impl FusionModel {
    pub fn linear(weights: LinearWeights, bias: f32) -> Self {
        Self::Linear {
            weights: weights.to_array().to_vec(),
            bias,
        }
    }

    /// Expected input arity.
    pub fn input_width(&self) -> usize {
        match self {
            Self::Linear { weights, .. } => weights.len(),
            Self::NonLinear(mlp) => mlp.input_width,
        }
    }

    /// Whether inputs carry embedding summary statistics.
    pub fn uses_embedding_stats(&self) -> bool {
        match self {
            Self::Linear { .. } => false,
            Self::NonLinear(mlp) => mlp.embedding_stats,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Linear { .. } => "linear",
            Self::NonLinear(_) => "mlp",
        }
    }

    /// Scores a flat input row.
    pub fn forward(&self, input: &[f32]) -> Result<f32, ScoringError> {
        let expected = self.input_width();
        if input.len() != expected {
            return Err(ScoringError::DimensionMismatch {
                expected,
                actual: input.len(),
            });
        }

        match self {
            Self::Linear { weights, bias } => Ok(weights
                .iter()
                .zip(input)
                .fold(*bias, |acc, (w, x)| acc + w * x)),
            Self::NonLinear(mlp) => mlp.forward(input),
        }
    }
}
