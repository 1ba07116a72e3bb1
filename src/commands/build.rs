//! Build command implementation
//!
//! The build command is the primary entry point used by the provisioning
//! pipeline:
//! 1. Load and compile every dataset schema
//! 2. Check the environment against `environments.json`
//! 3. Merge every dataset for the environment
//! 4. Write the merged datasets and `current_environment.json`
//!
//! Any failure stops the run before the output directory is touched.

use anyhow::{Context, Result};
use clap::Args;

use envmeta::config::Layout;
use envmeta::output::{Marker, OutputConfig};
use envmeta::phases::{orchestrator, write};
use envmeta::schema::SchemaCatalog;

/// Arguments for the build command
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Name of the environment to aggregate, as declared in environments.json
    #[arg(value_name = "ENV")]
    pub env: String,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the build command
pub fn execute(args: BuildArgs, layout: &Layout, out: &OutputConfig) -> Result<()> {
    let catalog = SchemaCatalog::load(layout).context("Failed to load dataset schemas")?;

    if !args.quiet {
        println!(
            "{}",
            out.header("Loading definition files from input directories...")
        );
    }
    let aggregated = orchestrator::aggregate(layout, &catalog, &args.env)
        .with_context(|| format!("Failed to aggregate environment {}", args.env))?;

    if !args.quiet {
        for (kind, dataset) in aggregated.iter() {
            println!("   {:<24} {} record(s)", kind.name(), dataset.len());
        }
        println!();
        println!(
            "{}",
            out.header(&format!(
                "Writing files into {}/ directory...",
                layout.output_root.display()
            ))
        );
    }

    write::execute(&aggregated, &layout.output_root).with_context(|| {
        format!(
            "Failed to write datasets into {}",
            layout.output_root.display()
        )
    })?;

    if !args.quiet {
        println!(
            "{} Environment {} written to {}",
            out.marker(Marker::Ok),
            args.env,
            layout.output_root.display()
        );
    }
    Ok(())
}
