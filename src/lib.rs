//! Fusegate library crate (used by the gate binary and integration tests).
//!
//! Hybrid retrieval fusion and answerability-gated extraction for RAG
//! pipelines. Document storage, embedding generation and the language model
//! itself are external collaborators: the crate receives already-computed
//! sub-scores and embeddings and returns fused scores, bounded candidate
//! lists, gated answers and quality-gate verdicts.
//!
//! # Pipeline
//!
//! raw signals → [`FeatureVector`] → [`FusionScorer`] → [`CandidateRanker`]
//! (bounded by [`RetrievalLimits`]) → top passages → [`AnswerExtractor`].
//!
//! Separately, [`gate::validate`] checks aggregate run metrics against soft and
//! hard thresholds.
//!
//! ## Core Types
//! - [`FeatureVector`], [`ScalarScores`], [`ValidationPolicy`] - Validated features
//! - [`LimitResolver`], [`RetrievalLimits`], [`LimitsSource`] - Shortlist/top-k limits
//! - [`FusionScorer`], [`FusionModel`], [`FusionConfig`] - Fusion scoring
//! - [`CandidateRanker`], [`RankedCandidate`], [`RankedSet`] - Ranking
//! - [`AnswerExtractor`], [`ExtractedAnswer`], [`SpanExtractor`] - Gated extraction
//! - [`GateConfig`], [`GateReport`] - Quality gates
//! - [`Config`], [`ConfigError`] - Environment configuration
//!
//! Every component is a pure function over immutable inputs and safe to call
//! concurrently; [`LimitResolver`] is the only shared mutable state.

pub mod answer;
pub mod config;
pub mod constants;
pub mod features;
pub mod gate;
pub mod limits;
pub mod ranking;
pub mod scoring;

pub use answer::{
    AnswerError, AnswerExtractor, ExtractedAnswer, ExtractionState, ExtractionTrace,
    ExtractorConfig, LexicalSpanExtractor, SpanExtractor,
};
pub use config::{Config, ConfigError};
pub use constants::{
    DEFAULT_EMBEDDING_DIM, DimConfig, DimValidationError, NOT_ANSWERABLE_SENTINEL,
    validate_embedding_dim,
};
pub use features::{FeatureError, FeatureVector, ScalarScores, ValidationPolicy};
pub use gate::{GateConfig, GateFileError, GateReport, Metrics};
pub use limits::{LimitResolver, LimitsSource, RetrievalLimits, resolve_limits};
pub use ranking::{
    Candidate, CandidateRanker, CandidateSignals, DroppedCandidate, RankedCandidate, RankedSet,
};
pub use scoring::{
    Activation, FusionConfig, FusionModel, FusionScorer, LinearWeights, MlpModel, MlpWeights,
    ScoringError,
};
