//! # esg-cli — Command-Line Interface
//!
//! Provides the `esg` binary over submission files (JSON or YAML).
//!
//! ## Subcommands
//!
//! - `esg validate`: threshold, cross-field and completeness checks.
//! - `esg map`: framework requirement coverage.
//! - `esg score`: pillar scores, composite and rating.
//! - `esg benchmark`: sector percentile and rank.
//! - `esg assess`: the whole pipeline, optionally as a dashboard view.
//! - `esg catalog`: inspect or export the reference catalog.
//!
//! ```bash
//! esg validate acme-2024.json
//! esg map acme-2024.json --framework GRI
//! esg assess acme-2024.yaml --sector Mining --previous 61 --dashboard
//! esg catalog export --out catalog.yaml
//! ```
//!
//! ## Exit codes
//!
//! - `0`: success, nothing to report.
//! - `1`: the submission was rejected, failed validation, or raised a
//!   compliance-critical alert.
//! - `2`: operational failure (unreadable file, broken configuration).

pub mod assess;
pub mod benchmark;
pub mod catalog;
pub mod map;
pub mod score;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;

use esg_core::{EsgSubmission, InputError, MetricSet};
use esg_engine::{EngineConfig, EngineContext};

/// Success.
pub const EXIT_OK: u8 = 0;
/// Rejected input, failed validation, or critical alert.
pub const EXIT_FINDINGS: u8 = 1;
/// Operational failure.
pub const EXIT_FAILURE: u8 = 2;

/// Serialization format for command output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// YAML.
    Yaml,
}

/// Output options shared by every reporting subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Write to this file instead of stdout.
    #[arg(long, short)]
    pub out: Option<PathBuf>,
}

/// Serialize a value in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(value).context("failed to serialize output as JSON")
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(value).context("failed to serialize output as YAML")
        }
    }
}

/// Render a value and write it to the configured destination.
pub fn emit<T: Serialize>(value: &T, output: &OutputArgs) -> Result<()> {
    let text = render(value, output.format)?;
    match &output.out {
        Some(path) => {
            std::fs::write(path, text.as_bytes())
                .with_context(|| format!("failed to write output: {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote output");
        }
        None => println!("{text}"),
    }
    Ok(())
}

/// Read a submission from a `.json`, `.yaml`, or `.yml` file.
pub fn load_submission(path: &Path) -> Result<EsgSubmission> {
    esg_catalog::parser::load_typed(path)
        .with_context(|| format!("failed to read submission: {}", path.display()))
}

/// Read a submission and resolve it into a metric set.
///
/// The outer `Result` carries operational failures. The inner one carries
/// input-shape rejections, which are findings rather than failures.
pub fn load_metric_set(path: &Path) -> Result<Result<MetricSet, InputError>> {
    let submission = load_submission(path)?;
    Ok(match submission.to_metric_set() {
        Ok(set) => Ok(set),
        Err(esg_core::CoreError::Input(input)) => Err(input),
        Err(other) => {
            return Err(other)
                .with_context(|| format!("failed to assemble metrics from {}", path.display()))
        }
    })
}

/// Report a rejected submission and return the findings exit code.
pub fn reject(path: &Path, error: &InputError) -> u8 {
    tracing::error!(path = %path.display(), "submission rejected: {error}");
    eprintln!("{}: submission rejected: {error}", path.display());
    EXIT_FINDINGS
}

/// Build the engine context from an optional configuration file plus
/// `ESG_*` environment overrides.
pub fn build_context(config: Option<&Path>) -> Result<EngineContext> {
    let config = EngineConfig::load(config).context("invalid engine configuration")?;
    EngineContext::from_config(config).context("failed to initialise engine context")
}
