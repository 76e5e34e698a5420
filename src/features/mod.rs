//! Validated per-candidate feature records.
//!
//! A [`FeatureVector`] carries the seven scalar retrieval sub-scores plus the
//! raw query/document embeddings. Construction runs an ordered validation
//! pipeline (dimensionality, shape, then finiteness in strict mode) and stops at
//! the first failure. Failures are local to one candidate.

pub mod error;
pub mod types;
pub mod vector;


pub use error::FeatureError;
pub use types::ScalarScores;
pub use vector::{FeatureVector, ValidationPolicy};
