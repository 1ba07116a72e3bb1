//! Default values for envmeta configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

/// Root folder holding the metadata fragments.
pub const DEFAULT_INPUT_DIR: &str = "metadata";

/// Folder holding one JSON Schema document per dataset.
pub const DEFAULT_SCHEMAS_DIR: &str = "metadata.schemas";

/// Folder the merged datasets are materialized into.
pub const DEFAULT_OUTPUT_DIR: &str = ".metadata.tmp";

/// File name of the selected environment record inside the output folder.
pub const CURRENT_ENVIRONMENT_FILENAME: &str = "current_environment.json";

/// Extension shared by every source, schema, and output file.
pub const JSON_EXTENSION: &str = "json";
