use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::error::GateFileError;

/// Aggregate run metrics: name → value (`None` when the metric was not computed).
pub type Metrics = HashMap<String, Option<f64>>;

/// Soft and hard thresholds, keyed by metric name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Violations produce warnings only.
    pub soft: BTreeMap<String, f64>,
    /// Violations fail the gate.
    pub hard: BTreeMap<String, f64>,
}

impl GateConfig {
    /// Reads a YAML or JSON gate file.
    pub fn from_file(path: &Path) -> Result<Self, GateFileError> {
        read_document(path)
    }
}

/// Reads a metrics mapping from a YAML or JSON file.
pub fn load_metrics(path: &Path) -> Result<Metrics, GateFileError> {
    read_document(path)
}

fn read_document<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, GateFileError> {
    let content = std::fs::read_to_string(path).map_err(|source| GateFileError::Read {
        path: path.display().to_string(),
        source,
    })?;
    serde_yaml::from_str(&content).map_err(|source| GateFileError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Verdict of a gate validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateReport {
    /// `true` iff `errors` is empty.
    pub passed: bool,
    /// Hard-gate violations.
    pub errors: Vec<String>,
    /// Soft-gate violations; never affect `passed`.
    pub warnings: Vec<String>,
}

impl std::fmt::Display for GateReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({} errors, {} warnings)",
            if self.passed { "PASSED" } else { "FAILED" },
            self.errors.len(),
            self.warnings.len()
        )
    }
}

#[derive(Debug, Clone, Copy)]
enum GateKind {
    Soft,
    Hard,
}

impl GateKind {
    fn missing_message(self, name: &str) -> String {
        match self {
            GateKind::Soft => format!("{name}: missing metric for soft gate validation"),
            GateKind::Hard => format!("{name}: missing metric required for hard gate validation"),
        }
    }

    fn below_message(self, name: &str, value: f64, threshold: f64) -> String {
        let kind = match self {
            GateKind::Soft => "soft",
            GateKind::Hard => "hard",
        };
        format!("{name}: {value:.4} below {kind} threshold {threshold:.4}")
    }
}

fn check_gate(
    kind: GateKind,
    thresholds: &BTreeMap<String, f64>,
    metrics: &Metrics,
    out: &mut Vec<String>,
) {
    for (name, threshold) in thresholds {
        match metrics.get(name).copied().flatten() {
            None => out.push(kind.missing_message(name)),
            Some(value) if value.is_nan() || value < *threshold => {
                out.push(kind.below_message(name, value, *threshold))
            }
            Some(_) => {}
        }
    }
}

/// Validates `metrics` against `gates`. Never fails; every problem becomes a
/// report entry.
pub fn validate(metrics: &Metrics, gates: &GateConfig) -> GateReport {
    let mut warnings = Vec::new();
    let mut errors = Vec::new();

    check_gate(GateKind::Soft, &gates.soft, metrics, &mut warnings);
    check_gate(GateKind::Hard, &gates.hard, metrics, &mut errors);

    let report = GateReport {
        passed: errors.is_empty(),
        errors,
        warnings,
    };

    for warning in &report.warnings {
        debug!(%warning, "Soft gate violation");
    }
    if report.passed {
        info!(warnings = report.warnings.len(), "Quality gate passed");
    } else {
        warn!(
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            "Quality gate failed"
        );
    }

    report
}
