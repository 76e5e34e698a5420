use std::cmp::Ordering;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::features::{FeatureVector, ValidationPolicy};
use crate::limits::RetrievalLimits;
use crate::scoring::FusionScorer;

use super::types::{
    Candidate, CandidateSignals, DroppedCandidate, RankedCandidate, RankedSet, feature_drop,
};

/// Descending by score; NaN after every number. Callers rely on a stable sort
/// for input-order tie-breaking.
fn cmp_score_desc(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// Orders candidates by fused score and applies the two-stage limit cut.
#[derive(Debug, Clone, Default)]
pub struct CandidateRanker {
    scorer: FusionScorer,
}

impl CandidateRanker {
    pub fn new(scorer: FusionScorer) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &FusionScorer {
        &self.scorer
    }

    /// Scores, sorts and truncates, returning the final top-k candidates.
    pub fn rank(
        &self,
        candidates: Vec<Candidate>,
        limits: &RetrievalLimits,
    ) -> Vec<RankedCandidate> {
        self.rank_with_shortlist(candidates, limits).top
    }

    /// Like [`rank`](Self::rank), also returning the shortlist and any
    /// candidates that failed to score.
    pub fn rank_with_shortlist(
        &self,
        candidates: Vec<Candidate>,
        limits: &RetrievalLimits,
    ) -> RankedSet {
        self.rank_indexed(candidates.into_iter().enumerate().collect(), limits)
    }

    /// Ranks candidates tagged with their position in the caller's input.
    /// Indices must be increasing so the stable sort breaks ties by input order.
    fn rank_indexed(
        &self,
        candidates: Vec<(usize, Candidate)>,
        limits: &RetrievalLimits,
    ) -> RankedSet {
        if candidates.is_empty() {
            return RankedSet::default();
        }

        let total = candidates.len();
        let results: Vec<Result<RankedCandidate, DroppedCandidate>> = candidates
            .into_par_iter()
            .map(|(input_index, candidate)| match self.scorer.score(&candidate.features) {
                Ok(score) => Ok(RankedCandidate {
                    id: candidate.id,
                    score,
                    input_index,
                    features: candidate.features,
                }),
                Err(e) => {
                    warn!(
                        candidate_id = %candidate.id,
                        error = %e,
                        "Dropping candidate: scoring failed"
                    );
                    Err(DroppedCandidate {
                        id: candidate.id,
                        reason: e.to_string(),
                    })
                }
            })
            .collect();

        let mut scored = Vec::with_capacity(total);
        let mut dropped = Vec::new();
        for result in results {
            match result {
                Ok(ranked) => scored.push(ranked),
                Err(excluded) => dropped.push(excluded),
            }
        }

        scored.sort_by(|a, b| cmp_score_desc(a.score, b.score));

        scored.truncate(limits.shortlist);
        let top: Vec<RankedCandidate> = scored.iter().take(limits.topk).cloned().collect();

        debug!(
            total,
            dropped = dropped.len(),
            shortlist = scored.len(),
            top = top.len(),
            top_score = top.first().map(|c| c.score),
            "Ranking complete"
        );

        RankedSet {
            shortlist: scored,
            top,
            dropped,
        }
    }

    /// Builds feature vectors from raw signals and ranks them. Candidates whose
    /// features fail validation are excluded and reported in `dropped`.
    pub fn rank_signals(
        &self,
        signals: Vec<CandidateSignals>,
        policy: ValidationPolicy,
        limits: &RetrievalLimits,
    ) -> RankedSet {
        let mut invalid = Vec::new();
        let candidates: Vec<(usize, Candidate)> = signals
            .into_iter()
            .enumerate()
            .filter_map(|(input_index, signal)| {
                match FeatureVector::construct(
                    signal.scalars,
                    &signal.query_embedding,
                    &signal.document_embedding,
                    policy,
                ) {
                    Ok(features) => Some((input_index, Candidate::new(signal.id, features))),
                    Err(e) => {
                        warn!(
                            candidate_id = %signal.id,
                            error = %e,
                            "Dropping candidate: invalid features"
                        );
                        invalid.push(feature_drop(&signal.id, &e));
                        None
                    }
                }
            })
            .collect();

        let mut ranked = self.rank_indexed(candidates, limits);
        invalid.append(&mut ranked.dropped);
        ranked.dropped = invalid;
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::cmp_score_desc;
    use std::cmp::Ordering;

    #[test]
    fn test_nan_sorts_last() {
        assert_eq!(cmp_score_desc(f32::NAN, 1.0), Ordering::Greater);
        assert_eq!(cmp_score_desc(1.0, f32::NAN), Ordering::Less);
        assert_eq!(cmp_score_desc(f32::NAN, f32::NAN), Ordering::Equal);
        assert_eq!(cmp_score_desc(2.0, 1.0), Ordering::Less);
    }
}
