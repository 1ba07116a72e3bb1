//! # Layout Configuration
//!
//! The engine never reads process-wide state: every operation receives a
//! [`Layout`] describing where the metadata fragments live, where the schemas
//! live, and where the merged datasets are written.
//!
//! ```text
//! metadata.schemas/<dataset>.json            one schema per dataset
//! metadata/<dataset>.json                    global fragment
//! metadata/<env>/<dataset>.json              environment fragment
//! metadata/<env>/<team>/<dataset>.json       team fragment
//! .metadata.tmp/<dataset>.json               merged output
//! .metadata.tmp/current_environment.json     selected environment
//! ```

use std::path::{Path, PathBuf};

use crate::dataset::DatasetKind;
use crate::defaults::{
    CURRENT_ENVIRONMENT_FILENAME, DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR, DEFAULT_SCHEMAS_DIR,
    JSON_EXTENSION,
};

/// Directory layout for one engine invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Root of the metadata fragments.
    pub input_root: PathBuf,
    /// Root of the per-dataset schema documents.
    pub schemas_root: PathBuf,
    /// Destination of the materialized datasets.
    pub output_root: PathBuf,
}

impl Layout {
    /// Create a layout from explicit roots.
    pub fn new(
        input_root: impl Into<PathBuf>,
        schemas_root: impl Into<PathBuf>,
        output_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input_root: input_root.into(),
            schemas_root: schemas_root.into(),
            output_root: output_root.into(),
        }
    }

    /// Create the default layout relative to `base`.
    pub fn rooted_at(base: &Path) -> Self {
        Self::new(
            base.join(DEFAULT_INPUT_DIR),
            base.join(DEFAULT_SCHEMAS_DIR),
            base.join(DEFAULT_OUTPUT_DIR),
        )
    }

    pub fn with_input_root(mut self, input_root: impl Into<PathBuf>) -> Self {
        self.input_root = input_root.into();
        self
    }

    pub fn with_schemas_root(mut self, schemas_root: impl Into<PathBuf>) -> Self {
        self.schemas_root = schemas_root.into();
        self
    }

    pub fn with_output_root(mut self, output_root: impl Into<PathBuf>) -> Self {
        self.output_root = output_root.into();
        self
    }

    /// Path of the schema document for `kind`.
    pub fn schema_path(&self, kind: DatasetKind) -> PathBuf {
        self.schemas_root.join(json_file_name(kind.name()))
    }

    /// Path of the global `environments.json` file.
    pub fn environments_path(&self) -> PathBuf {
        self.input_root
            .join(json_file_name(DatasetKind::Environments.name()))
    }

    /// Path of the materialized file for `kind`.
    pub fn output_path(&self, kind: DatasetKind) -> PathBuf {
        self.output_root.join(json_file_name(kind.name()))
    }

    /// Path of the materialized current environment record.
    pub fn current_environment_path(&self) -> PathBuf {
        self.output_root.join(CURRENT_ENVIRONMENT_FILENAME)
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT_DIR, DEFAULT_SCHEMAS_DIR, DEFAULT_OUTPUT_DIR)
    }
}

pub(crate) fn json_file_name(stem: &str) -> String {
    format!("{stem}.{JSON_EXTENSION}")
}
