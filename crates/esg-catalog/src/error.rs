//! Catalog error types.
//!
//! Every variant is a reference-data problem. They surface when the catalog
//! is loaded at process start, never during a scoring request.

use std::path::PathBuf;

use esg_core::Framework;
use thiserror::Error;

/// Errors that can occur while loading or validating the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// YAML parsing failed.
    #[error("failed to parse YAML at {path}: {source}")]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// JSON parsing failed.
    #[error("failed to parse JSON at {path}: {source}")]
    JsonParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A required file was not found.
    #[error("required file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// File extension is neither YAML nor JSON.
    #[error("unsupported catalog format for {path} (expected .yaml, .yml, or .json)")]
    UnsupportedFormat { path: PathBuf },

    /// A framework has no requirements.
    #[error("framework {framework} has no requirements in the catalog")]
    MissingFramework { framework: Framework },

    /// Two requirements share an identifier.
    #[error("duplicate requirement id {requirement_id} in framework {framework}")]
    DuplicateRequirement {
        framework: Framework,
        requirement_id: String,
    },

    /// A requirement lists no metric keys.
    #[error("requirement {requirement_id} in framework {framework} lists no metric keys")]
    EmptyRequirement {
        framework: Framework,
        requirement_id: String,
    },

    /// A threshold rule is internally inconsistent.
    #[error("invalid threshold rule for {metric}: {detail}")]
    InvalidThreshold { metric: String, detail: String },

    /// Two disclosure standards share an identifier.
    #[error("duplicate disclosure standard id {standard_id}")]
    DuplicateStandard { standard_id: String },

    /// An alias points at an empty metric key or at itself.
    #[error("invalid alias {term:?}: {detail}")]
    InvalidAlias { term: String, detail: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic serde_json error (not file-specific).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
