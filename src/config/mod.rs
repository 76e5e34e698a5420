//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `FUSEGATE_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::PathBuf;

use crate::answer::ExtractorConfig;
use crate::constants::{
    DEFAULT_EMBEDDING_DIM, DEFAULT_LIMIT_CACHE_CAPACITY, DEFAULT_MAX_PASSAGES,
    DEFAULT_MIN_OVERLAP, DimConfig,
};
use crate::features::ValidationPolicy;
use crate::limits::{LimitResolver, LimitsSource};
use crate::scoring::{FusionScorer, ScoringError};

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Embedding dimensionality of every feature vector. Default: `384`.
    pub embedding_dim: usize,

    /// Reject non-finite feature values. Default: `false`.
    pub strict_features: bool,

    /// YAML/JSON file with `default` / `tags` limit overrides.
    pub limits_path: Option<PathBuf>,

    /// JSON fusion model configuration. Default: built-in linear weights.
    pub fusion_config_path: Option<PathBuf>,

    /// Minimum answer/context token overlap. Default: `0.5`.
    pub min_overlap: f32,

    /// Passages joined into the extraction context. Default: `6`.
    pub max_passages: usize,

    /// Max memoized limit resolutions. Default: `1024`.
    pub limit_cache_capacity: u64,

    /// Metrics file validated by the `fusegate` binary.
    pub metrics_path: Option<PathBuf>,

    /// Gate thresholds file used by the `fusegate` binary.
    pub gates_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            strict_features: false,
            limits_path: None,
            fusion_config_path: None,
            min_overlap: DEFAULT_MIN_OVERLAP,
            max_passages: DEFAULT_MAX_PASSAGES,
            limit_cache_capacity: DEFAULT_LIMIT_CACHE_CAPACITY,
            metrics_path: None,
            gates_path: None,
        }
    }
}

impl Config {
    const ENV_EMBEDDING_DIM: &'static str = "FUSEGATE_EMBEDDING_DIM";
    const ENV_STRICT_FEATURES: &'static str = "FUSEGATE_STRICT_FEATURES";
    const ENV_LIMITS_PATH: &'static str = "FUSEGATE_LIMITS_PATH";
    const ENV_FUSION_CONFIG: &'static str = "FUSEGATE_FUSION_CONFIG";
    const ENV_MIN_OVERLAP: &'static str = "FUSEGATE_MIN_OVERLAP";
    const ENV_MAX_PASSAGES: &'static str = "FUSEGATE_MAX_PASSAGES";
    const ENV_LIMIT_CACHE_CAPACITY: &'static str = "FUSEGATE_LIMIT_CACHE_CAPACITY";
    const ENV_METRICS_PATH: &'static str = "FUSEGATE_METRICS_PATH";
    const ENV_GATES_PATH: &'static str = "FUSEGATE_GATES_PATH";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            embedding_dim: Self::parse_usize_from_env(
                Self::ENV_EMBEDDING_DIM,
                defaults.embedding_dim,
            )?,
            strict_features: Self::parse_bool_from_env(
                Self::ENV_STRICT_FEATURES,
                defaults.strict_features,
            )?,
            limits_path: Self::parse_optional_path_from_env(Self::ENV_LIMITS_PATH),
            fusion_config_path: Self::parse_optional_path_from_env(Self::ENV_FUSION_CONFIG),
            min_overlap: Self::parse_overlap_from_env(defaults.min_overlap)?,
            max_passages: Self::parse_usize_from_env(
                Self::ENV_MAX_PASSAGES,
                defaults.max_passages,
            )?,
            limit_cache_capacity: Self::parse_u64_from_env(
                Self::ENV_LIMIT_CACHE_CAPACITY,
                defaults.limit_cache_capacity,
            ),
            metrics_path: Self::parse_optional_path_from_env(Self::ENV_METRICS_PATH),
            gates_path: Self::parse_optional_path_from_env(Self::ENV_GATES_PATH),
        })
    }

    /// Validates ranges and paths (does not read any file).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.embedding_dim == 0 {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_EMBEDDING_DIM,
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.max_passages == 0 {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_MAX_PASSAGES,
                reason: "must be greater than zero".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.min_overlap) {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_MIN_OVERLAP,
                reason: format!("must be between 0.0 and 1.0, got {}", self.min_overlap),
            });
        }

        // limits_path is not checked; resolution falls back to defaults.
        for path in [&self.fusion_config_path, &self.metrics_path, &self.gates_path]
            .into_iter()
            .flatten()
        {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_file() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
        }

        Ok(())
    }

    pub fn dims(&self) -> DimConfig {
        DimConfig::new(self.embedding_dim)
    }

    pub fn validation_policy(&self) -> ValidationPolicy {
        ValidationPolicy::from_dims(self.dims(), self.strict_features)
    }

    pub fn limits_source(&self) -> LimitsSource {
        match &self.limits_path {
            Some(path) => LimitsSource::File(path.clone()),
            None => LimitsSource::Empty,
        }
    }

    /// Builds the scorer from `fusion_config_path`, or the default linear
    /// scorer when unset.
    pub fn fusion_scorer(&self) -> Result<FusionScorer, ScoringError> {
        match &self.fusion_config_path {
            Some(path) => FusionScorer::from_file(path),
            None => Ok(FusionScorer::default()),
        }
    }

    /// Creates the process-scoped limit resolver sized by `limit_cache_capacity`.
    pub fn limit_resolver(&self) -> LimitResolver {
        LimitResolver::with_capacity(self.limit_cache_capacity)
    }

    pub fn extractor_config(&self) -> ExtractorConfig {
        ExtractorConfig {
            max_passages: self.max_passages,
            min_overlap: self.min_overlap,
            ..ExtractorConfig::default()
        }
    }

    fn parse_usize_from_env(var_name: &'static str, default: usize) -> Result<usize, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e| ConfigError::IntParseError {
                    name: var_name,
                    value,
                    source: e,
                }),
            Err(_) => Ok(default),
        }
    }

    fn parse_overlap_from_env(default: f32) -> Result<f32, ConfigError> {
        match env::var(Self::ENV_MIN_OVERLAP) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e| ConfigError::FloatParseError {
                    name: Self::ENV_MIN_OVERLAP,
                    value,
                    source: e,
                }),
            Err(_) => Ok(default),
        }
    }

    fn parse_bool_from_env(var_name: &'static str, default: bool) -> Result<bool, ConfigError> {
        match env::var(var_name) {
            Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" | "" => Ok(false),
                _ => Err(ConfigError::InvalidValue {
                    name: var_name,
                    reason: format!("'{value}' is not a boolean"),
                }),
            },
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> u64 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }
}
