//! # Assess Subcommand
//!
//! Runs the whole pipeline (validation, framework mapping, scoring and the
//! optional benchmark) over one submission. With `--dashboard` the output is
//! the condensed dashboard view stamped with the current time.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use chrono::Utc;

use esg_engine::{AssessRequest, EngineContext};

use crate::{emit, load_metric_set, reject, OutputArgs, EXIT_FINDINGS, EXIT_OK};

/// Arguments for `esg assess`.
#[derive(Args, Debug)]
pub struct AssessArgs {
    /// Submission file (.json, .yaml, .yml).
    pub submission: PathBuf,

    /// Sector peer group to benchmark against.
    #[arg(long)]
    pub sector: Option<String>,

    /// Prior period's composite score, for momentum.
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub previous: Option<u8>,

    /// Emit the dashboard view instead of the full assessment.
    #[arg(long)]
    pub dashboard: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Execute `esg assess`. Exits with findings when validation failed or a
/// compliance-critical alert was raised.
pub fn run_assess(args: &AssessArgs, ctx: &EngineContext) -> Result<u8> {
    let set = match load_metric_set(&args.submission)? {
        Ok(set) => set,
        Err(e) => return Ok(reject(&args.submission, &e)),
    };
    let request = AssessRequest {
        sector: args.sector.clone(),
        previous_composite: args.previous,
    };
    let assessment = ctx.assess_set(&set, &request);

    if args.dashboard {
        emit(&assessment.dashboard(ctx.catalog(), Utc::now()), &args.output)?;
    } else {
        emit(&assessment, &args.output)?;
    }

    if assessment.is_clean() {
        Ok(EXIT_OK)
    } else {
        Ok(EXIT_FINDINGS)
    }
}
