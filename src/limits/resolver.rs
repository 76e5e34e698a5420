use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::constants::{DEFAULT_SHORTLIST, DEFAULT_TOPK, MAX_SHORTLIST, MIN_SHORTLIST, MIN_TOPK};

/// Shortlist / top-k sizes for one retrieval tag.
///
/// Always satisfies `10 <= shortlist <= 200` and `5 <= topk <= shortlist`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RetrievalLimits {
    pub shortlist: usize,
    pub topk: usize,
}

impl Default for RetrievalLimits {
    fn default() -> Self {
        Self {
            shortlist: DEFAULT_SHORTLIST,
            topk: DEFAULT_TOPK,
        }
    }
}

impl RetrievalLimits {
    /// Clamps raw values into the valid ranges.
    pub fn clamped(shortlist: i64, topk: i64) -> Self {
        let shortlist = shortlist.clamp(MIN_SHORTLIST as i64, MAX_SHORTLIST as i64);
        let topk = topk.clamp(MIN_TOPK as i64, shortlist);
        Self {
            shortlist: shortlist as usize,
            topk: topk as usize,
        }
    }
}

/// Where tag overrides come from.
///
/// Expected shape (YAML or JSON):
///
/// ```yaml
/// default:
///   shortlist: 80
/// tags:
///   ops:
///     topk: 12
/// ```
#[derive(Debug, Clone, Default)]
pub enum LimitsSource {
    /// No configuration; defaults only.
    #[default]
    Empty,
    /// Already-parsed key/value data.
    Parsed(Value),
    /// A YAML/JSON file, read on resolution.
    File(PathBuf),
}

impl LimitsSource {
    /// Stable identity used for cache keys.
    pub(crate) fn identity(&self) -> String {
        match self {
            Self::Empty => "empty".to_string(),
            Self::Parsed(value) => format!("parsed:{value}"),
            Self::File(path) => format!("file:{}", path.display()),
        }
    }

    /// Returns the parsed document, or `None` when it is unavailable.
    fn load(&self) -> Option<Value> {
        match self {
            Self::Empty => None,
            Self::Parsed(value) => Some(value.clone()),
            Self::File(path) => load_limits_file(path),
        }
    }
}

fn load_limits_file(path: &Path) -> Option<Value> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "Limits config unreadable, using defaults"
            );
            return None;
        }
    };

    match serde_yaml::from_str::<Value>(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "Limits config malformed, using defaults"
            );
            None
        }
    }
}

/// Reads an integer override; non-numeric values are ignored. Out-of-range
/// values (negatives included) are left for [`RetrievalLimits::clamped`].
fn read_limit(block: &Value, key: &str) -> Option<i64> {
    let raw = block.get(key)?;
    let value = raw
        .as_i64()
        .or_else(|| raw.as_f64().filter(|v| v.is_finite()).map(|v| v.trunc() as i64));
    if value.is_none() {
        debug!(key, value = %raw, "Ignoring non-numeric limit override");
    }
    value
}

fn merge(block: Option<&Value>, shortlist: &mut i64, topk: &mut i64) {
    let Some(block) = block.filter(|b| b.is_object()) else {
        return;
    };
    if let Some(v) = read_limit(block, "shortlist") {
        *shortlist = v;
    }
    if let Some(v) = read_limit(block, "topk") {
        *topk = v;
    }
}

/// Resolves limits for `tag`. Never fails: unreadable or malformed sources
/// fall back to the built-in defaults.
pub fn resolve_limits(tag: &str, source: &LimitsSource) -> RetrievalLimits {
    let mut shortlist = DEFAULT_SHORTLIST as i64;
    let mut topk = DEFAULT_TOPK as i64;

    if let Some(doc) = source.load() {
        merge(doc.get("default"), &mut shortlist, &mut topk);
        if !tag.is_empty() {
            merge(
                doc.get("tags").and_then(|tags| tags.get(tag)),
                &mut shortlist,
                &mut topk,
            );
        }
    }

    let limits = RetrievalLimits::clamped(shortlist, topk);
    debug!(
        tag,
        shortlist = limits.shortlist,
        topk = limits.topk,
        "Resolved retrieval limits"
    );
    limits
}
