//! # Environment Metadata Library
//!
//! This library aggregates per-environment infrastructure metadata fragments,
//! scattered across many small JSON files, into one validated, deduplicated
//! dataset per entity type. It is used by the `envmeta` command-line tool and
//! by anything else that needs the merged view of an environment.
//!
//! ## Quick Example
//!
//! ```no_run
//! use envmeta::config::Layout;
//! use envmeta::phases::orchestrator;
//! use envmeta::schema::SchemaCatalog;
//!
//! let layout = Layout::default();
//! let catalog = SchemaCatalog::load(&layout)?;
//! let aggregated = orchestrator::execute_build(&layout, &catalog, "dev")?;
//! assert!(aggregated.current_environment().is_some());
//! # Ok::<(), envmeta::error::Error>(())
//! ```
//!
//! ## Core Concepts
//!
//! - **Datasets (`dataset`)**: the fixed table of seven datasets, each with a
//!   key field, an optional schema, and a duplicate policy.
//! - **Schemas (`schema`)**: compiled JSON Schema documents, one per dataset.
//! - **Environments (`environment`)**: the declared deployment targets.
//! - **Phases (`phases`)**: discovery of fragment files, merging, and
//!   writing the merged datasets to disk.
//! - **Groups (`groups`)**: directory-group names derived from workspaces and
//!   the group master dataset.
//!
//! ## Execution Flow
//!
//! 1.  **Validate**: the environment name must be declared in
//!     `environments.json`.
//! 2.  **Discover**: find team, environment, and global fragments per dataset.
//! 3.  **Merge**: validate and combine fragments, enforcing key uniqueness.
//! 4.  **Write**: materialize each dataset and the current environment.
//!
//! Every failure is fatal and surfaces before anything is written.

pub mod config;
pub mod dataset;
pub mod defaults;
pub mod environment;
pub mod error;
pub mod groups;
pub mod output;
pub mod phases;
pub mod schema;

pub use config::Layout;
pub use dataset::{DatasetDescriptor, DatasetKind, DuplicatePolicy};
pub use environment::EnvironmentDirectory;
pub use error::{Error, Result};
pub use phases::{AggregatedDatasets, MergedDataset};
pub use schema::SchemaCatalog;
