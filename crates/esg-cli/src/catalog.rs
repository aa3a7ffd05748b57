//! # Catalog Subcommand
//!
//! Inspects the reference catalog the engine was started with.
//!
//! - `esg catalog show` prints version, digest and per-framework counts.
//! - `esg catalog digest` prints only the content digest.
//! - `esg catalog export` writes the full catalog document, which can be
//!   edited and loaded back through `catalog_path` / `ESG_CATALOG_PATH`.

use std::collections::BTreeMap;

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use esg_core::Framework;
use esg_engine::EngineContext;

use crate::{emit, OutputArgs, EXIT_OK};

/// Arguments for `esg catalog`.
#[derive(Args, Debug)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommand,
}

/// Catalog subcommands.
#[derive(Subcommand, Debug)]
pub enum CatalogCommand {
    /// Print a summary of the loaded catalog.
    Show {
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the catalog content digest.
    Digest,
    /// Write the full catalog document.
    Export {
        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Summary printed by `esg catalog show`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogOverview {
    pub version: String,
    pub alias_version: String,
    pub digest: String,
    pub requirements: BTreeMap<Framework, usize>,
    pub thresholds: usize,
    pub standards: Vec<String>,
    pub aliases: usize,
}

/// Build the overview of the context's catalog.
pub fn overview(ctx: &EngineContext) -> CatalogOverview {
    let catalog = ctx.catalog();
    CatalogOverview {
        version: catalog.version().to_string(),
        alias_version: catalog.alias_version().to_string(),
        digest: catalog.digest().to_string(),
        requirements: Framework::all()
            .iter()
            .map(|fw| (*fw, catalog.requirements(*fw).len()))
            .collect(),
        thresholds: catalog.thresholds().len(),
        standards: catalog.standards().iter().map(|s| s.id.clone()).collect(),
        aliases: catalog.aliases().aliases.len(),
    }
}

/// Execute `esg catalog`.
pub fn run_catalog(args: &CatalogArgs, ctx: &EngineContext) -> Result<u8> {
    match &args.command {
        CatalogCommand::Show { output } => emit(&overview(ctx), output)?,
        CatalogCommand::Digest => println!("{}", ctx.catalog().digest()),
        CatalogCommand::Export { output } => emit(ctx.catalog().document(), output)?,
    }
    Ok(EXIT_OK)
}
