//! # Environment Directory
//!
//! The `environments` dataset lists the deployment targets. It is read only
//! from the global `<input_root>/environments.json` and keyed by `name`; that
//! name is also the token selecting the per-environment fragment folders of
//! every other dataset.
//!
//! An environment that is not declared here is rejected before any other
//! dataset is processed.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde_json::Value;

use crate::config::Layout;
use crate::dataset::DatasetKind;
use crate::error::{Error, Result};
use crate::phases::discovery::resolve_global;
use crate::phases::merge::{merge, MergedDataset, RecordKey};

/// Declared environments keyed by name.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentDirectory {
    source: PathBuf,
    environments: BTreeMap<String, Value>,
}

impl EnvironmentDirectory {
    /// Load the directory from the global `environments.json`.
    ///
    /// A missing file yields an empty directory, in which every lookup fails.
    pub fn load(layout: &Layout) -> Result<Self> {
        let descriptor = DatasetKind::Environments.descriptor();
        let files = resolve_global(layout, DatasetKind::Environments)?;
        let merged = merge(
            &files,
            descriptor.key_field,
            None,
            descriptor.duplicate_policy,
        )?;
        Self::from_dataset(layout.environments_path(), &merged)
    }

    /// Build the directory from an already merged `environments` dataset.
    ///
    /// Names select folders on disk, so every name must be a string.
    pub fn from_dataset(source: impl Into<PathBuf>, dataset: &MergedDataset) -> Result<Self> {
        let source = source.into();
        let mut environments = BTreeMap::new();
        for (key, record) in dataset.keys().zip(dataset.records()) {
            let RecordKey::String(name) = key else {
                return Err(Error::InvalidEnvironmentName {
                    name: key.to_string(),
                    path: source,
                });
            };
            environments.insert(name.clone(), record.clone());
        }
        Ok(Self {
            source,
            environments,
        })
    }

    /// Record of the environment called `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.environments.get(name)
    }

    /// Fail with `UnknownEnvironment` unless `name` is declared.
    pub fn validate_exists(&self, name: &str) -> Result<&Value> {
        self.get(name).ok_or_else(|| Error::UnknownEnvironment {
            name: name.to_string(),
            path: self.source.clone(),
        })
    }

    /// Environment names in ascending order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.environments.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.environments.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.environments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.environments.is_empty()
    }
}
