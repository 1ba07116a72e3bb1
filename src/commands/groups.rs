//! # Groups Command Implementation
//!
//! Writes the sorted union of directory-group names referenced by the
//! environments to a JSON file. The identity synchronization job reads that
//! file as its list of groups to provision.
//!
//! By default every environment declared in `environments.json` contributes;
//! `--env` narrows the union to one environment.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use envmeta::config::Layout;
use envmeta::groups;
use envmeta::output::{Marker, OutputConfig};
use envmeta::schema::SchemaCatalog;

/// Write the directory groups referenced by the environments
#[derive(Args, Debug)]
pub struct GroupsArgs {
    /// File to write the JSON array of group names to
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Only collect the groups of this environment
    #[arg(long, value_name = "ENV")]
    pub env: Option<String>,
}

/// Execute the `groups` command.
pub fn execute(args: GroupsArgs, layout: &Layout, out: &OutputConfig) -> Result<()> {
    let catalog = SchemaCatalog::load(layout).context("Failed to load dataset schemas")?;

    let names = match &args.env {
        Some(env) => groups::groups_for_environment(layout, &catalog, env)
            .with_context(|| format!("Failed to collect groups for environment {env}"))?,
        None => groups::all_groups(layout, &catalog)
            .context("Failed to collect groups across environments")?,
    };

    groups::write_groups(&names, &args.output)?;
    println!(
        "{} {} group(s) written to {}",
        out.marker(Marker::Ok),
        names.len(),
        args.output.display()
    );
    Ok(())
}
