//! # Score Subcommand

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use esg_engine::EngineContext;

use crate::{emit, load_metric_set, reject, OutputArgs, EXIT_OK};

/// Arguments for `esg score`.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Submission file (.json, .yaml, .yml).
    pub submission: PathBuf,

    /// Prior period's composite score, for momentum.
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub previous: Option<u8>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Execute `esg score`.
pub fn run_score(args: &ScoreArgs, ctx: &EngineContext) -> Result<u8> {
    let set = match load_metric_set(&args.submission)? {
        Ok(set) => set,
        Err(e) => return Ok(reject(&args.submission, &e)),
    };
    let summary = ctx.score(&set, args.previous);
    emit(&summary, &args.output)?;
    Ok(EXIT_OK)
}
