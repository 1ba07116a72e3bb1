//! # Schema Catalog
//!
//! Loads one JSON Schema document per schema-bearing dataset from the schemas
//! root and compiles it once. A missing, unparsable, or uncompilable document
//! is fatal: no dataset is usable until every declared schema loads.
//!
//! Callers only ever ask a [`DatasetSchema`] to validate a document; the
//! schema internals are never inspected by the engine.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use jsonschema::JSONSchema;
use log::debug;
use serde_json::Value;

use crate::config::Layout;
use crate::dataset::{descriptors, DatasetKind};
use crate::error::{Error, Result};

/// A compiled schema for one dataset.
pub struct DatasetSchema {
    kind: DatasetKind,
    path: PathBuf,
    compiled: JSONSchema,
}

impl DatasetSchema {
    /// Compile `document` as the schema of `kind`.
    ///
    /// `path` is only used for diagnostics.
    pub fn compile(kind: DatasetKind, path: impl Into<PathBuf>, document: &Value) -> Result<Self> {
        let path = path.into();
        let compiled = JSONSchema::compile(document).map_err(|err| Error::SchemaLoad {
            dataset: kind.name().to_string(),
            path: path.clone(),
            message: format!("invalid schema: {err}"),
        })?;
        Ok(Self {
            kind,
            path,
            compiled,
        })
    }

    /// Read and compile the schema document at `path`.
    pub fn load(kind: DatasetKind, path: &Path) -> Result<Self> {
        let schema_load = |message: String| Error::SchemaLoad {
            dataset: kind.name().to_string(),
            path: path.to_path_buf(),
            message,
        };
        let file = File::open(path).map_err(|e| schema_load(format!("cannot open: {e}")))?;
        let document: Value = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| schema_load(format!("invalid JSON: {e}")))?;
        Self::compile(kind, path, &document)
    }

    pub fn kind(&self) -> DatasetKind {
        self.kind
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Validate a whole document, collecting every violation message.
    pub fn validate(&self, document: &Value) -> std::result::Result<(), Vec<String>> {
        self.compiled.validate(document).map_err(|errors| {
            errors
                .map(|err| {
                    let location = err.instance_path.to_string();
                    if location.is_empty() {
                        err.to_string()
                    } else {
                        format!("{location}: {err}")
                    }
                })
                .collect()
        })
    }
}

impl fmt::Debug for DatasetSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatasetSchema")
            .field("kind", &self.kind)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Compiled schemas keyed by dataset.
#[derive(Debug, Default)]
pub struct SchemaCatalog {
    schemas: BTreeMap<DatasetKind, DatasetSchema>,
}

impl SchemaCatalog {
    /// An empty catalog; every dataset skips validation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every schema the descriptor table declares.
    pub fn load(layout: &Layout) -> Result<Self> {
        let mut catalog = Self::new();
        for descriptor in descriptors().filter(|d| d.has_schema) {
            let path = layout.schema_path(descriptor.kind);
            debug!("Loading schema for {} from {}", descriptor.kind, path.display());
            catalog.insert(DatasetSchema::load(descriptor.kind, &path)?);
        }
        Ok(catalog)
    }

    /// Register a schema, replacing any previous one for the same dataset.
    pub fn insert(&mut self, schema: DatasetSchema) {
        self.schemas.insert(schema.kind(), schema);
    }

    /// Schema of `kind`, or `None` when the dataset is not validated.
    pub fn get(&self, kind: DatasetKind) -> Option<&DatasetSchema> {
        self.schemas.get(&kind)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
