//! # Engine Configuration
//!
//! [`EngineConfig`] gathers every tunable of the pipeline. It is read from
//! YAML, then `ESG_*` environment variables override individual fields,
//! then the whole is validated once. A configuration that fails validation
//! never reaches a scoring request.
//!
//! ```yaml
//! scoring:
//!   weights: { environmental: 0.4, social: 0.3, governance: 0.3 }
//!   recommendation_threshold: 70
//! validation:
//!   report_unknown_metrics: true
//! key_matching: exact_or_alias
//! benchmark:
//!   min_peers: 5
//! catalog_path: reference/catalog.yaml
//! peer_data_path: reference/peers.yaml
//! ```
//!
//! Environment variables:
//! - `ESG_CATALOG_PATH`, `ESG_PEER_DATA_PATH`
//! - `ESG_KEY_MATCHING` (`exact`, `exact_or_alias`, `normalized`)
//! - `ESG_MIN_PEERS`
//! - `ESG_REPORT_UNKNOWN_METRICS` (`true`/`false`/`1`/`0`)
//! - `ESG_RECOMMENDATION_THRESHOLD`, `ESG_MOMENTUM_TOLERANCE`

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use esg_benchmark::BenchmarkConfig;
use esg_mapping::KeyMatching;
use esg_scoring::ScoringConfig;
use esg_validation::ValidationConfig;

use crate::error::EngineError;

/// Pipeline configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Weights, bands and recommendation tunables.
    pub scoring: ScoringConfig,
    /// Validation tunables.
    pub validation: ValidationConfig,
    /// How requirement terms match submitted keys.
    pub key_matching: KeyMatching,
    /// Benchmark tunables.
    pub benchmark: BenchmarkConfig,
    /// Catalog file. The built-in catalog is used when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
    /// Peer table file. The illustrative table is used when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peer_data_path: Option<PathBuf>,
}

impl EngineConfig {
    /// Parse YAML text. Missing sections take their defaults.
    ///
    /// # Errors
    ///
    /// [`EngineError::ConfigParse`] for malformed YAML.
    pub fn from_yaml_str(text: &str) -> Result<Self, EngineError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Read a YAML configuration file.
    ///
    /// # Errors
    ///
    /// [`EngineError::Catalog`] wrapping the file or parse failure.
    pub fn from_file(path: &Path) -> Result<Self, EngineError> {
        let config: Self = esg_catalog::parser::load_yaml_typed(path)?;
        tracing::debug!(path = %path.display(), "loaded engine configuration");
        Ok(config)
    }

    /// Load from an optional file, apply process environment overrides,
    /// and validate.
    ///
    /// # Errors
    ///
    /// Any load, override, or validation failure.
    pub fn load(path: Option<&Path>) -> Result<Self, EngineError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config.with_env_overrides(|var| std::env::var(var).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `ESG_*` overrides read through `lookup`.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidEnv`] when a value does not parse.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, EngineError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("ESG_CATALOG_PATH") {
            self.catalog_path = Some(PathBuf::from(path));
        }
        if let Some(path) = lookup("ESG_PEER_DATA_PATH") {
            self.peer_data_path = Some(PathBuf::from(path));
        }
        if let Some(raw) = lookup("ESG_KEY_MATCHING") {
            self.key_matching = parse_key_matching("ESG_KEY_MATCHING", &raw)?;
        }
        if let Some(raw) = lookup("ESG_MIN_PEERS") {
            self.benchmark.min_peers = parse_number("ESG_MIN_PEERS", &raw)?;
        }
        if let Some(raw) = lookup("ESG_REPORT_UNKNOWN_METRICS") {
            self.validation.report_unknown_metrics =
                parse_flag("ESG_REPORT_UNKNOWN_METRICS", &raw)?;
        }
        if let Some(raw) = lookup("ESG_RECOMMENDATION_THRESHOLD") {
            self.scoring.recommendation_threshold =
                parse_number("ESG_RECOMMENDATION_THRESHOLD", &raw)?;
        }
        if let Some(raw) = lookup("ESG_MOMENTUM_TOLERANCE") {
            self.scoring.momentum_tolerance = parse_number("ESG_MOMENTUM_TOLERANCE", &raw)?;
        }
        Ok(self)
    }

    /// Check the configuration as a whole.
    ///
    /// # Errors
    ///
    /// The first inconsistency found.
    pub fn validate(&self) -> Result<(), EngineError> {
        self.scoring.validate()?;
        if self.benchmark.min_peers == 0 {
            return Err(EngineError::InvalidSetting {
                name: "benchmark.min_peers".to_string(),
                detail: "must be at least 1".to_string(),
            });
        }
        let ratio = self.validation.scope3_ratio;
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(EngineError::InvalidSetting {
                name: "validation.scope3_ratio".to_string(),
                detail: format!("must be a positive number, got {ratio}"),
            });
        }
        Ok(())
    }
}

fn invalid_env(var: &str, value: &str, reason: impl Into<String>) -> EngineError {
    EngineError::InvalidEnv {
        var: var.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

fn parse_number<T>(var: &str, raw: &str) -> Result<T, EngineError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| invalid_env(var, raw, e.to_string()))
}

fn parse_flag(var: &str, raw: &str) -> Result<bool, EngineError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid_env(var, raw, "expected true or false")),
    }
}

fn parse_key_matching(var: &str, raw: &str) -> Result<KeyMatching, EngineError> {
    match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
        "exact" => Ok(KeyMatching::Exact),
        "exact_or_alias" => Ok(KeyMatching::ExactOrAlias),
        "normalized" => Ok(KeyMatching::Normalized),
        _ => Err(invalid_env(var, raw, "expected exact, exact_or_alias, or normalized")),
    }
}
