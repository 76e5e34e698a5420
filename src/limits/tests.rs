use std::io::Write;
use std::path::PathBuf;

use rayon::prelude::*;
use serde_json::json;
use tempfile::NamedTempFile;

use super::cache::LimitResolver;
use super::resolver::{LimitsSource, RetrievalLimits, resolve_limits};

fn write_config(content: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_defaults_without_config() {
    let limits = resolve_limits("", &LimitsSource::Parsed(json!({})));
    assert_eq!(
        limits,
        RetrievalLimits {
            shortlist: 60,
            topk: 25
        }
    );
    assert_eq!(resolve_limits("ops", &LimitsSource::Empty), limits);
}

#[test]
fn test_default_block_clamped_up() {
    let source = LimitsSource::Parsed(json!({"default": {"shortlist": 5}}));
    let limits = resolve_limits("x", &source);
    assert_eq!(limits.shortlist, 10);
    assert_eq!(limits.topk, 10);
}

#[test]
fn test_tag_topk_never_exceeds_shortlist() {
    let source = LimitsSource::Parsed(json!({"tags": {"x": {"topk": 300}}}));
    let limits = resolve_limits("x", &source);
    assert_eq!(limits.shortlist, 60);
    assert_eq!(limits.topk, 60);
    assert!(limits.topk <= limits.shortlist);
}

#[test]
fn test_tag_overrides_layer_on_default_block() {
    let source = LimitsSource::Parsed(json!({
        "default": {"shortlist": 120, "topk": 40},
        "tags": {"ops": {"topk": 8}}
    }));
    assert_eq!(
        resolve_limits("ops", &source),
        RetrievalLimits {
            shortlist: 120,
            topk: 8
        }
    );
    assert_eq!(
        resolve_limits("other", &source),
        RetrievalLimits {
            shortlist: 120,
            topk: 40
        }
    );
    // An empty tag never consults the tags map.
    assert_eq!(resolve_limits("", &source).topk, 40);
}

#[test]
fn test_upper_and_lower_clamps() {
    let source = LimitsSource::Parsed(json!({"default": {"shortlist": 5000, "topk": 1}}));
    assert_eq!(
        resolve_limits("", &source),
        RetrievalLimits {
            shortlist: 200,
            topk: 5
        }
    );
}

#[test]
fn test_invalid_values_are_ignored() {
    let source = LimitsSource::Parsed(json!({
        "default": {"shortlist": "lots", "topk": null},
        "tags": {"x": "not-a-map"}
    }));
    assert_eq!(resolve_limits("x", &source), RetrievalLimits::default());

    let source = LimitsSource::Parsed(json!({"default": {"shortlist": 75.9}}));
    assert_eq!(resolve_limits("", &source).shortlist, 75);
}

#[test]
fn test_negative_overrides_clamp_to_minimums() {
    let source = LimitsSource::Parsed(json!({"default": {"shortlist": -1, "topk": -3}}));
    assert_eq!(
        resolve_limits("", &source),
        RetrievalLimits {
            shortlist: 10,
            topk: 5
        }
    );

    let source = LimitsSource::Parsed(json!({"tags": {"x": {"topk": -40}}}));
    assert_eq!(resolve_limits("x", &source).topk, 5);
}

#[test]
fn test_yaml_file_source() {
    let file = write_config(
        "default:\n  shortlist: 90\ntags:\n  ops:\n    topk: 12\n",
        ".yaml",
    );
    let source = LimitsSource::File(file.path().to_path_buf());
    assert_eq!(
        resolve_limits("ops", &source),
        RetrievalLimits {
            shortlist: 90,
            topk: 12
        }
    );
}

#[test]
fn test_json_file_source() {
    let file = write_config(
        r#"{"tags": {"docs": {"shortlist": 30, "topk": 10}}}"#,
        ".json",
    );
    let source = LimitsSource::File(file.path().to_path_buf());
    assert_eq!(
        resolve_limits("docs", &source),
        RetrievalLimits {
            shortlist: 30,
            topk: 10
        }
    );
}

#[test]
fn test_missing_or_malformed_file_falls_back() {
    let missing = LimitsSource::File(PathBuf::from("/nonexistent/limits.yaml"));
    assert_eq!(resolve_limits("x", &missing), RetrievalLimits::default());

    let file = write_config("default: [unterminated", ".yaml");
    let malformed = LimitsSource::File(file.path().to_path_buf());
    assert_eq!(resolve_limits("x", &malformed), RetrievalLimits::default());
}

#[test]
fn test_resolver_memoizes_and_tolerates_staleness() {
    let file = write_config("default:\n  shortlist: 90\n", ".yaml");
    let source = LimitsSource::File(file.path().to_path_buf());
    let resolver = LimitResolver::with_capacity(16);

    let first = resolver.resolve("x", &source);
    assert_eq!(first.shortlist, 90);

    std::fs::write(file.path(), "default:\n  shortlist: 150\n").unwrap();
    assert_eq!(resolver.resolve("x", &source), first);
    resolver.run_pending_tasks();
    assert_eq!(resolver.len(), 1);

    resolver.clear();
    resolver.run_pending_tasks();
    assert_eq!(resolver.resolve("x", &source).shortlist, 150);
}

#[test]
fn test_resolver_keys_by_tag() {
    let source = LimitsSource::Parsed(json!({"tags": {"a": {"topk": 7}}}));
    let resolver = LimitResolver::new();
    assert_eq!(resolver.resolve("a", &source).topk, 7);
    assert_eq!(resolver.resolve("b", &source).topk, 25);
    resolver.run_pending_tasks();
    assert_eq!(resolver.len(), 2);
}

#[test]
fn test_resolver_concurrent_lookups_agree() {
    let source = LimitsSource::Parsed(json!({
        "default": {"shortlist": 80},
        "tags": {"a": {"topk": 7}, "b": {"topk": 12}, "c": {"shortlist": 150}}
    }));
    let resolver = LimitResolver::new();
    let tags = ["a", "b", "c", "d"];

    let results: Vec<(&str, RetrievalLimits)> = (0..400)
        .into_par_iter()
        .map(|i| {
            let tag = tags[i % tags.len()];
            (tag, resolver.resolve(tag, &source))
        })
        .collect();

    for (tag, limits) in &results {
        assert_eq!(*limits, resolve_limits(tag, &source));
    }
    resolver.run_pending_tasks();
    assert_eq!(resolver.len(), tags.len() as u64);
}
