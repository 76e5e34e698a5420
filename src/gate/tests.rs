use std::collections::BTreeMap;

use super::validator::{GateConfig, GateReport, Metrics, load_metrics, validate};

fn gates(soft: &[(&str, f64)], hard: &[(&str, f64)]) -> GateConfig {
    let map = |pairs: &[(&str, f64)]| -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    };
    GateConfig {
        soft: map(soft),
        hard: map(hard),
    }
}

fn metrics(pairs: &[(&str, Option<f64>)]) -> Metrics {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

#[test]
fn test_missing_soft_metric_warns_but_passes() {
    let report = validate(&Metrics::new(), &gates(&[("recall_at_20", 0.5)], &[]));
    assert!(report.passed);
    assert!(report.errors.is_empty());
    assert_eq!(
        report.warnings,
        vec!["recall_at_20: missing metric for soft gate validation".to_string()]
    );
}

#[test]
fn test_missing_hard_metric_fails() {
    let report = validate(&Metrics::new(), &gates(&[], &[("recall_at_20", 0.5)]));
    assert!(!report.passed);
    assert!(report.warnings.is_empty());
    assert_eq!(
        report.errors,
        vec!["recall_at_20: missing metric required for hard gate validation".to_string()]
    );
}

#[test]
fn test_none_value_counts_as_missing() {
    let report = validate(
        &metrics(&[("mrr", None)]),
        &gates(&[("mrr", 0.1)], &[("mrr", 0.1)]),
    );
    assert!(!report.passed);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.errors.len(), 1);
}

#[test]
fn test_soft_threshold_violation_is_a_warning() {
    let report = validate(
        &metrics(&[("answer_rate", Some(0.3))]),
        &gates(&[("answer_rate", 0.6)], &[]),
    );
    assert!(report.passed);
    assert_eq!(
        report.warnings,
        vec!["answer_rate: 0.3000 below soft threshold 0.6000".to_string()]
    );
}

#[test]
fn test_hard_threshold_violation_fails() {
    let report = validate(
        &metrics(&[("recall_at_20", Some(0.49)), ("mrr", Some(0.8))]),
        &gates(&[], &[("recall_at_20", 0.5), ("mrr", 0.5)]),
    );
    assert!(!report.passed);
    assert_eq!(
        report.errors,
        vec!["recall_at_20: 0.4900 below hard threshold 0.5000".to_string()]
    );
}

#[test]
fn test_value_at_threshold_passes() {
    let report = validate(
        &metrics(&[("recall_at_20", Some(0.5))]),
        &gates(&[("recall_at_20", 0.5)], &[("recall_at_20", 0.5)]),
    );
    assert_eq!(
        report,
        GateReport {
            passed: true,
            errors: vec![],
            warnings: vec![],
        }
    );
}

#[test]
fn test_nan_value_is_below_threshold() {
    let report = validate(
        &metrics(&[("mrr", Some(f64::NAN))]),
        &gates(&[], &[("mrr", 0.0)]),
    );
    assert!(!report.passed);
}

#[test]
fn test_messages_follow_sorted_metric_order() {
    let report = validate(
        &Metrics::new(),
        &gates(&[("zeta", 1.0), ("alpha", 1.0)], &[]),
    );
    assert!(report.warnings[0].starts_with("alpha:"));
    assert!(report.warnings[1].starts_with("zeta:"));
}

#[test]
fn test_undeclared_metrics_are_ignored() {
    let report = validate(&metrics(&[("extra", Some(0.0))]), &GateConfig::default());
    assert!(report.passed);
    assert!(report.warnings.is_empty());
    assert_eq!(report.to_string(), "PASSED (0 errors, 0 warnings)");
}

#[test]
fn test_load_files() {
    let dir = tempfile::tempdir().unwrap();
    let gates_path = dir.path().join("gates.yaml");
    std::fs::write(
        &gates_path,
        "soft:\n  mrr: 0.3\nhard:\n  recall_at_20: 0.5\n",
    )
    .unwrap();
    let metrics_path = dir.path().join("metrics.json");
    std::fs::write(
        &metrics_path,
        r#"{"recall_at_20": 0.7, "mrr": null}"#,
    )
    .unwrap();

    let gates = GateConfig::from_file(&gates_path).unwrap();
    let metrics = load_metrics(&metrics_path).unwrap();
    let report = validate(&metrics, &gates);
    assert!(report.passed);
    assert_eq!(
        report.warnings,
        vec!["mrr: missing metric for soft gate validation".to_string()]
    );

    assert!(GateConfig::from_file(&dir.path().join("missing.yaml")).is_err());
}

#[test]
fn test_report_serializes_for_ci() {
    let report = validate(&Metrics::new(), &gates(&[], &[("recall_at_20", 0.5)]));
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["passed"], false);
    assert_eq!(json["errors"].as_array().unwrap().len(), 1);
}
