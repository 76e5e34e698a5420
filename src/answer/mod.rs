//! Answer extraction with an answerability gate.
//!
//! The extraction primitive (normally a language model, see [`SpanExtractor`])
//! drafts an answer from at most `max_passages` ranked passages. The draft is
//! normalized for operational tags, then gated: unless at least `min_overlap`
//! of its distinct tokens occur in the context, it is replaced by the
//! not-answerable sentinel. The gate tolerates false negatives in exchange for
//! rejecting spans the context does not support.

pub mod error;
pub mod extractor;
pub mod primitive;
pub mod text;
pub mod types;


pub use error::AnswerError;
pub use extractor::{AnswerExtractor, DEFAULT_OPERATIONAL_TAGS, ExtractorConfig};
pub use primitive::{LexicalSpanExtractor, SpanExtractor};
pub use text::{normalize_operational, overlap_ratio, tokenize};
pub use types::{ExtractedAnswer, ExtractionState, ExtractionTrace};
