//! End-to-end pipeline: signals → ranking → extraction → gating.

mod common;

use common::fixtures::{SignalsBuilder, TEST_DIM, embedding, passage_for};
use fusegate::gate::{self, GateConfig, Metrics};
use fusegate::{
    AnswerExtractor, CandidateRanker, ExtractedAnswer, ExtractorConfig, FusionConfig,
    FusionScorer, LimitResolver, LimitsSource, ValidationPolicy,
};
use serde_json::json;

fn ranker() -> CandidateRanker {
    CandidateRanker::new(FusionScorer::from_config(&FusionConfig::default()).unwrap())
}

#[test]
fn test_rank_then_extract_grounded_answer() {
    let signals = vec![
        SignalsBuilder::new("changelog").lexical(0.2).vector(0.1).build(),
        SignalsBuilder::new("runbook").lexical(0.9).vector(0.8).title(1.0).build(),
        SignalsBuilder::new("faq").lexical(0.6).vector(0.5).build(),
        SignalsBuilder::new("broken")
            .lexical(5.0)
            .document_embedding(vec![0.0; TEST_DIM - 1])
            .build(),
    ];

    let resolver = LimitResolver::new();
    let limits = resolver.resolve("ops", &LimitsSource::Empty);

    let ranked = ranker().rank_signals(
        signals,
        ValidationPolicy::new(TEST_DIM, true),
        &limits,
    );
    assert_eq!(ranked.top_ids(), vec!["runbook", "faq", "changelog"]);
    assert_eq!(ranked.dropped.len(), 1);
    assert_eq!(ranked.dropped[0].id, "broken");

    let passages: Vec<&str> = ranked.top.iter().map(|c| passage_for(&c.id)).collect();
    let extractor = AnswerExtractor::lexical(ExtractorConfig::default()).unwrap();
    let answer = extractor
        .extract("How do I rotate credentials?", &passages, "ops")
        .unwrap();

    assert_eq!(
        answer,
        ExtractedAnswer::Answer(
            "To rotate credentials run scripts/rotate_keys.sh on the bastion host.".to_string()
        )
    );
}

#[test]
fn test_tagged_limits_bound_the_answer_context() {
    let source = LimitsSource::Parsed(json!({
        "default": {"shortlist": 12},
        "tags": {"narrow": {"topk": 1}}
    }));
    let resolver = LimitResolver::with_capacity(8);
    let limits = resolver.resolve("narrow", &source);
    assert_eq!(limits.shortlist, 12);
    assert_eq!(limits.topk, 5);

    let signals = (0..30)
        .map(|i| {
            SignalsBuilder::new(&format!("doc-{i}"))
                .lexical(i as f32 / 30.0)
                .document_embedding(embedding(i))
                .build()
        })
        .collect();
    let ranked = ranker().rank_signals(
        signals,
        ValidationPolicy::new(TEST_DIM, false),
        &limits,
    );

    assert_eq!(ranked.shortlist.len(), 12);
    assert_eq!(ranked.top.len(), 5);
    assert_eq!(ranked.top[0].id, "doc-29");
}

#[test]
fn test_unanswerable_question_yields_sentinel() {
    let passages = [passage_for("changelog"), passage_for("glossary")];
    let extractor = AnswerExtractor::new(
        |_: &str, _: &str| Ok::<_, fusegate::AnswerError>("config/secrets.vault".to_string()),
        ExtractorConfig::default(),
    )
    .unwrap();

    let answer = extractor
        .extract("What file contains the API secret?", &passages, "")
        .unwrap();
    assert_eq!(answer, ExtractedAnswer::NotAnswerable);
    assert_eq!(answer.to_string(), fusegate::NOT_ANSWERABLE_SENTINEL);
}

#[test]
fn test_gate_over_aggregated_run_metrics() {
    let gates: GateConfig = serde_json::from_value(json!({
        "soft": {"answer_rate": 0.8},
        "hard": {"recall_at_20": 0.5, "mrr": 0.3}
    }))
    .unwrap();

    let mut metrics = Metrics::new();
    metrics.insert("recall_at_20".to_string(), Some(0.72));
    metrics.insert("mrr".to_string(), Some(0.41));
    metrics.insert("answer_rate".to_string(), Some(0.65));

    let report = gate::validate(&metrics, &gates);
    assert!(report.passed);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].starts_with("answer_rate:"));

    metrics.insert("mrr".to_string(), None);
    let report = gate::validate(&metrics, &gates);
    assert!(!report.passed);
    assert_eq!(
        report.errors,
        vec!["mrr: missing metric required for hard gate validation".to_string()]
    );
}
