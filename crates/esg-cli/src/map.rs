//! # Map Subcommand
//!
//! Maps one submission onto a single framework or onto all of them.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use esg_core::Framework;
use esg_engine::EngineContext;

use crate::{emit, load_metric_set, reject, OutputArgs, EXIT_OK};

/// Arguments for `esg map`.
#[derive(Args, Debug)]
pub struct MapArgs {
    /// Submission file (.json, .yaml, .yml).
    pub submission: PathBuf,

    /// Framework to map onto (GRI, SASB, TCFD, BRSR, ICMM). All when omitted.
    #[arg(long, short)]
    pub framework: Option<Framework>,

    /// The company reported in a prior period. Untouched requirements
    /// become NON_COMPLIANT instead of NOT_STARTED.
    #[arg(long)]
    pub prior_period: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Execute `esg map`.
pub fn run_map(args: &MapArgs, ctx: &EngineContext) -> Result<u8> {
    let set = match load_metric_set(&args.submission)? {
        Ok(set) => set,
        Err(e) => return Ok(reject(&args.submission, &e)),
    };
    match args.framework {
        Some(framework) => {
            let report = ctx.map(&set, framework, args.prior_period);
            tracing::info!(
                framework = %framework,
                compliance_score = report.compliance_score,
                met = report.met_requirements,
                total = report.total_requirements,
                "mapped submission"
            );
            emit(&report, &args.output)?;
        }
        None => {
            let reports: BTreeMap<_, _> = Framework::all()
                .iter()
                .map(|fw| (*fw, ctx.map(&set, *fw, args.prior_period)))
                .collect();
            emit(&reports, &args.output)?;
        }
    }
    Ok(EXIT_OK)
}
