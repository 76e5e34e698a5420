//! Candidate ranking by fused score.
//!
//! Candidates are scored in parallel, sorted by descending score (ties keep
//! input order), cut to the shortlist and then to top-k. A candidate that fails
//! validation or scoring is excluded; it never aborts the whole ranking.

pub mod ranker;
pub mod types;


pub use ranker::CandidateRanker;
pub use types::{Candidate, CandidateSignals, DroppedCandidate, RankedCandidate, RankedSet};
