//! Fusion scoring of retrieval sub-scores.
//!
//! Two model variants are supported, selected by configuration:
//!
//! - **Linear**: a dot product of fixed weights with the seven scalar
//!   sub-scores (no embedding terms).
//! - **Two-layer**: the scalars (optionally followed by embedding summary
//!   statistics) pass through one hidden layer with a smooth activation, then a
//!   linear projection to a single value. Runs on `candle` CPU tensors.
//!
//! Training is out of scope; models are loaded from safetensors or inline
//! weights and only used for inference.

pub mod error;
pub mod model;
pub mod scorer;
pub mod types;


pub use error::ScoringError;
pub use model::{FusionModel, MlpModel};
pub use scorer::FusionScorer;
pub use types::{Activation, FusionConfig, LinearWeights, MlpWeights};
