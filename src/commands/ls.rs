//! # Ls Command Implementation
//!
//! Lists the environments declared in `environments.json`, one name per line
//! or, with `--json`, the full records as a pretty-printed JSON object keyed
//! by name.
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::{Map, Value};

use envmeta::config::Layout;
use envmeta::environment::EnvironmentDirectory;

/// List the declared environments
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Print the full environment records as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the `ls` command.
pub fn execute(args: LsArgs, layout: &Layout) -> Result<()> {
    let directory = EnvironmentDirectory::load(layout).with_context(|| {
        format!(
            "Failed to load environments from {}",
            layout.environments_path().display()
        )
    })?;

    if args.json {
        let records: Map<String, Value> = directory
            .iter()
            .map(|(name, record)| (name.to_string(), record.clone()))
            .collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        for name in directory.names() {
            println!("{name}");
        }
    }
    Ok(())
}
