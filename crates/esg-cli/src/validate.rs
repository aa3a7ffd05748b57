//! # Validate Subcommand
//!
//! Runs threshold, cross-field and completeness checks over one submission
//! and prints the validation report.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use esg_engine::EngineContext;

use crate::{emit, load_metric_set, reject, OutputArgs, EXIT_FINDINGS, EXIT_OK};

/// Arguments for `esg validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Submission file (.json, .yaml, .yml).
    pub submission: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Execute `esg validate`. Exits with findings when the report has errors
/// or critical alerts.
pub fn run_validate(args: &ValidateArgs, ctx: &EngineContext) -> Result<u8> {
    let set = match load_metric_set(&args.submission)? {
        Ok(set) => set,
        Err(e) => return Ok(reject(&args.submission, &e)),
    };
    let report = esg_validation::validate_set(&set, ctx.catalog(), &ctx.config().validation);
    emit(&report, &args.output)?;

    if report.has_critical() || !report.is_valid() {
        tracing::warn!(
            errors = report.summary.total_errors,
            critical = report.summary.total_critical,
            "submission failed validation"
        );
        return Ok(EXIT_FINDINGS);
    }
    Ok(EXIT_OK)
}
