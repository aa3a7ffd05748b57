//! # Engine Errors
//!
//! [`EngineError`] wraps every lower-layer error so callers of the engine
//! handle one type. Data-quality findings never appear here. They travel
//! inside the returned reports.

use thiserror::Error;

use esg_benchmark::PeerTableError;
use esg_catalog::CatalogError;
use esg_core::CoreError;
use esg_scoring::ConfigError;
use esg_validation::ValidationError;

use crate::store::StoreError;

/// Errors surfaced by the engine context.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Reference catalog failed to load or validate.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Scoring configuration is inconsistent.
    #[error("scoring configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Peer table failed to load or validate.
    #[error("peer table error: {0}")]
    PeerTable(#[from] PeerTableError),

    /// Submission failed input-shape validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Metric store failure.
    #[error("metric store error: {0}")]
    Store(#[from] StoreError),

    /// Metric entries could not be assembled into a set.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Engine configuration text is not valid YAML for [`crate::EngineConfig`].
    #[error("failed to parse engine configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// An `ESG_*` environment override could not be parsed.
    #[error("invalid value {value:?} for {var}: {reason}")]
    InvalidEnv {
        /// Variable name.
        var: String,
        /// Raw value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// An engine setting outside the scoring block is out of range.
    #[error("invalid setting {name}: {detail}")]
    InvalidSetting {
        /// Setting name.
        name: String,
        /// What is wrong with it.
        detail: String,
    },
}
