use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnswerError {
    /// The extraction primitive (e.g. a language model call) failed.
    #[error("answer extraction failed: {reason}")]
    Extraction { reason: String },

    #[error("invalid extractor configuration: {reason}")]
    InvalidConfig { reason: String },
}
