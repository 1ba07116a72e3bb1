//! Implementation of the phases of the envmeta build operation.
//!
//! ## Overview
//!
//! The build operation follows 3 phases per dataset:
//! 1. Discovery - Find the team, environment, and global fragment files
//! 2. Merging - Validate and combine the fragments into one key-sorted dataset
//! 3. Writing to Disk - Materialize every dataset plus the current environment
//!
//! The [`orchestrator`] drives phases 1 and 2 across the descriptor table and
//! hands the aggregation to phase 3 only when every dataset merged cleanly.

pub mod discovery;
pub mod merge;
pub mod orchestrator;
pub mod write;

pub use discovery::resolve_files;
pub use merge::{MergedDataset, RecordKey};
pub use orchestrator::{aggregate, aggregate_dataset, execute_build, AggregatedDatasets};
