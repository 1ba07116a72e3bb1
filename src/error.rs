//! # Error Handling
//!
//! This module defines the centralized error type for the `envmeta` engine.
//! Every failure is fatal for the current invocation: nothing here is caught
//! and retried, and a failed aggregation never reaches the materializer.
//!
//! ## Taxonomy
//!
//! - **`SchemaLoad`**: a declared schema document is missing, malformed, or
//!   does not compile.
//! - **`SourceRead`** / **`SourceParse`**: a source file cannot be read, is not
//!   valid JSON, or is not a top-level array of objects.
//! - **`SchemaValidation`**: a source file violates its dataset schema.
//! - **`MissingKey`** / **`InvalidKey`**: a record has no usable identity.
//! - **`DuplicateKey`**: two records share a key where uniqueness is enforced.
//! - **`UnknownEnvironment`**: the requested environment is not declared in
//!   `environments.json`.
//! - **`Write`**: the materializer could not create or write an output file.
//!
//! Diagnostics always name the dataset, file, and 1-based record ordinal where
//! one applies.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for envmeta operations
#[derive(Error, Debug)]
pub enum Error {
    /// A schema document could not be loaded or compiled.
    #[error("Schema load error for dataset '{dataset}' ({}): {message}", path.display())]
    SchemaLoad {
        dataset: String,
        path: PathBuf,
        message: String,
    },

    /// A source file could not be opened or read.
    #[error("Failed to read source file {}: {source}", path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source file is not valid JSON or not an array of objects.
    #[error("Failed to parse source file {}: {message}", path.display())]
    SourceParse { path: PathBuf, message: String },

    /// A source file violates the schema of its dataset.
    #[error(
        "Failed to validate schema of {} (dataset '{dataset}'):\n{}",
        path.display(),
        violations.join("\n")
    )]
    SchemaValidation {
        dataset: String,
        path: PathBuf,
        violations: Vec<String>,
    },

    /// A record lacks a usable value under the dataset key field.
    #[error("Undefined key_column={key_field} in file {} record {ordinal}", path.display())]
    MissingKey {
        key_field: String,
        path: PathBuf,
        ordinal: usize,
    },

    /// A record carries a key value that cannot serve as an identity.
    #[error(
        "Unsupported value for key_column={key_field} in file {} record {ordinal}: {value}",
        path.display()
    )]
    InvalidKey {
        key_field: String,
        path: PathBuf,
        ordinal: usize,
        value: String,
    },

    /// Two records share a key value in a dataset that forbids it.
    #[error(
        "Double definition of key_column={key_field} ({key}) in file {} record {ordinal}. Previous definition present in file {previous}",
        path.display()
    )]
    DuplicateKey {
        key_field: String,
        key: String,
        path: PathBuf,
        ordinal: usize,
        previous: String,
    },

    /// An environment is declared under a name that is not a string.
    #[error("Environment name {name} in {} is not a string", path.display())]
    InvalidEnvironmentName { name: String, path: PathBuf },

    /// The requested environment is not declared.
    #[error("Environment {name} was not found in {}", path.display())]
    UnknownEnvironment { name: String, path: PathBuf },

    /// An output file or directory could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A glob pattern built from the layout was rejected.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be serialized back to JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
