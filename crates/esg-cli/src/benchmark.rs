//! # Benchmark Subcommand
//!
//! Scores a submission and positions the composite within a sector peer
//! group. An insufficient peer group is reported as such and is not a
//! failure.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use esg_benchmark::BenchmarkOutcome;
use esg_engine::EngineContext;

use crate::{emit, load_metric_set, reject, OutputArgs, EXIT_OK};

/// Arguments for `esg benchmark`.
#[derive(Args, Debug)]
pub struct BenchmarkArgs {
    /// Submission file (.json, .yaml, .yml).
    pub submission: PathBuf,

    /// Sector peer group (e.g. "Mining", "Financial Services").
    #[arg(long)]
    pub sector: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Execute `esg benchmark`.
pub fn run_benchmark(args: &BenchmarkArgs, ctx: &EngineContext) -> Result<u8> {
    let set = match load_metric_set(&args.submission)? {
        Ok(set) => set,
        Err(e) => return Ok(reject(&args.submission, &e)),
    };
    let summary = ctx.score(&set, None);
    let outcome = ctx.benchmark(&summary, &args.sector);
    match &outcome {
        BenchmarkOutcome::Ranked(result) if result.illustrative => {
            tracing::warn!(sector = %result.sector, "ranking uses illustrative peer data");
        }
        BenchmarkOutcome::InsufficientPeerData { reason, .. } => {
            tracing::warn!(sector = %args.sector, "{reason}");
        }
        BenchmarkOutcome::Ranked(_) => {}
    }
    emit(&outcome, &args.output)?;
    Ok(EXIT_OK)
}
