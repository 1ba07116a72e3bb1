//! # Validate Command Implementation
//!
//! This module implements the `validate` subcommand: a dry run of `build`.
//! Every schema is loaded, the environment is checked, and every dataset is
//! merged with the same failure rules, but nothing is written.
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::{Context, Result};
use clap::Args;

use envmeta::config::Layout;
use envmeta::output::{Marker, OutputConfig};
use envmeta::phases::orchestrator;
use envmeta::schema::SchemaCatalog;

/// Validate every dataset of an environment without writing output
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Name of the environment to validate
    #[arg(value_name = "ENV")]
    pub env: String,

    /// Print every merged dataset as JSON
    #[arg(long)]
    pub dump: bool,
}

/// Execute the `validate` command.
pub fn execute(args: ValidateArgs, layout: &Layout, out: &OutputConfig) -> Result<()> {
    println!(
        "{} Validating environment {} from {}",
        out.marker(Marker::Scan),
        args.env,
        layout.input_root.display()
    );

    let catalog = SchemaCatalog::load(layout).context("Failed to load dataset schemas")?;
    println!(
        "{} {} schema(s) loaded from {}",
        out.marker(Marker::Ok),
        catalog.len(),
        layout.schemas_root.display()
    );

    let aggregated = orchestrator::aggregate(layout, &catalog, &args.env).map_err(|e| {
        println!("{} Validation failed", out.marker(Marker::Failed));
        anyhow::Error::new(e).context(format!("Environment {} is invalid", args.env))
    })?;

    println!("\n{} Dataset Summary:", out.marker(Marker::Summary));
    for (kind, dataset) in aggregated.iter() {
        println!("   {:<24} {} record(s)", kind.name(), dataset.len());
    }

    if args.dump {
        for (kind, dataset) in aggregated.iter() {
            println!("\n{}", out.header(kind.name()));
            println!("{}", serde_json::to_string_pretty(dataset)?);
        }
    }

    println!(
        "\n{} Environment {} is valid",
        out.marker(Marker::Ok),
        args.env
    );
    Ok(())
}
