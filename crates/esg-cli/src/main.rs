//! # esg CLI entry point
//!
//! Parses command-line arguments, initialises logging and the engine
//! context, and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use esg_cli::assess::{run_assess, AssessArgs};
use esg_cli::benchmark::{run_benchmark, BenchmarkArgs};
use esg_cli::catalog::{run_catalog, CatalogArgs};
use esg_cli::map::{run_map, MapArgs};
use esg_cli::score::{run_score, ScoreArgs};
use esg_cli::validate::{run_validate, ValidateArgs};
use esg_cli::{build_context, EXIT_FAILURE};

/// ESG compliance engine.
///
/// Validates ESG metric submissions, maps them onto GRI, SASB, TCFD, BRSR
/// and ICMM requirements, scores them, and benchmarks the composite against
/// sector peers.
#[derive(Parser, Debug)]
#[command(name = "esg", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    /// Path to the engine configuration file (YAML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check a submission against threshold and cross-field rules.
    Validate(ValidateArgs),

    /// Map a submission onto framework requirements.
    Map(MapArgs),

    /// Score a submission: pillars, composite, rating, recommendations.
    Score(ScoreArgs),

    /// Rank a submission's composite within a sector peer group.
    Benchmark(BenchmarkArgs),

    /// Run the full pipeline and optionally emit a dashboard view.
    Assess(AssessArgs),

    /// Inspect or export the reference catalog.
    Catalog(CatalogArgs),
}

fn init_tracing(verbose: u8, json: bool) {
    // Without -v, RUST_LOG decides; default is warnings only.
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // Logs go to stderr; stdout carries command output.
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "esg CLI starting");

    let ctx = match build_context(cli.config.as_deref()) {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    let result = match &cli.command {
        Commands::Validate(args) => run_validate(args, &ctx),
        Commands::Map(args) => run_map(args, &ctx),
        Commands::Score(args) => run_score(args, &ctx),
        Commands::Benchmark(args) => run_benchmark(args, &ctx),
        Commands::Assess(args) => run_assess(args, &ctx),
        Commands::Catalog(args) => run_catalog(args, &ctx),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
