//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use envmeta::config::Layout;
use envmeta::defaults::{DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR, DEFAULT_SCHEMAS_DIR};
use envmeta::output::OutputConfig;

use crate::commands;

/// Environment metadata - Aggregate per-environment metadata fragments
#[derive(Parser, Debug)]
#[command(name = "envmeta")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    layout: LayoutArgs,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    ///
    /// Defaults to `warn`, or to `RUST_LOG` when that is set.
    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        value_parser = ["off", "error", "warn", "info", "debug", "trace"]
    )]
    log_level: Option<String>,
}

/// Where metadata, schemas, and outputs live.
#[derive(Args, Debug, Clone)]
pub struct LayoutArgs {
    /// Root folder of the metadata fragments.
    #[arg(
        long,
        global = true,
        value_name = "DIR",
        env = "ENVMETA_METADATA_DIR",
        default_value = DEFAULT_INPUT_DIR
    )]
    pub metadata_dir: PathBuf,

    /// Folder holding one JSON Schema per dataset.
    #[arg(
        long,
        global = true,
        value_name = "DIR",
        env = "ENVMETA_SCHEMAS_DIR",
        default_value = DEFAULT_SCHEMAS_DIR
    )]
    pub schemas_dir: PathBuf,

    /// Folder the merged datasets are written to.
    #[arg(
        long,
        global = true,
        value_name = "DIR",
        env = "ENVMETA_OUTPUT_DIR",
        default_value = DEFAULT_OUTPUT_DIR
    )]
    pub output_dir: PathBuf,
}

impl LayoutArgs {
    pub fn layout(&self) -> Layout {
        Layout::new(&self.metadata_dir, &self.schemas_dir, &self.output_dir)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Aggregate an environment and write the merged datasets
    Build(commands::build::BuildArgs),

    /// Aggregate an environment without writing anything
    Validate(commands::validate::ValidateArgs),

    /// Write the directory groups referenced by the environments
    Groups(commands::groups::GroupsArgs),

    /// List the declared environments
    Ls(commands::ls::LsArgs),

    /// Show the fragment files feeding each dataset of an environment
    Tree(commands::tree::TreeArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(self.log_level.as_deref());
        let out = OutputConfig::from_env_and_flag(&self.color);
        let layout = self.layout.layout();

        match self.command {
            Commands::Build(args) => commands::build::execute(args, &layout, &out),
            Commands::Validate(args) => commands::validate::execute(args, &layout, &out),
            Commands::Groups(args) => commands::groups::execute(args, &layout, &out),
            Commands::Ls(args) => commands::ls::execute(args, &layout),
            Commands::Tree(args) => commands::tree::execute(args, &layout),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

fn init_logging(level: Option<&str>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.parse_filters(level);
    }
    builder.format_timestamp(None);
    // A logger may already be installed when commands run inside tests.
    let _ = builder.try_init();
}
