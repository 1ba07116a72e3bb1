//! # CLI Command Implementations
//!
//! One module per `envmeta` subcommand. Each defines a clap `Args` struct and
//! an `execute` function that receives the parsed arguments together with the
//! resolved [`envmeta::config::Layout`]. Commands that print progress also
//! receive the run's [`envmeta::output::OutputConfig`].
//!
//! `build`, `validate`, and `groups` run the aggregation; `ls` and `tree`
//! only read the metadata tree; `completions` needs neither.

pub mod build;
pub mod completions;
pub mod groups;
pub mod ls;
pub mod tree;
pub mod validate;
