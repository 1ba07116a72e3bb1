//! Orchestrator for the complete build operation
//!
//! This module coordinates discovery, merging, and writing to provide a clean
//! API for aggregating one environment. Datasets are independent of each
//! other; the first failure aborts the whole aggregation and nothing is
//! written.

use std::collections::BTreeMap;

use log::info;
use serde_json::Value;

use super::{discovery, merge, write};
use crate::config::Layout;
use crate::dataset::{descriptors, DatasetKind};
use crate::environment::EnvironmentDirectory;
use crate::error::Result;
use crate::phases::merge::MergedDataset;
use crate::schema::SchemaCatalog;

/// Every merged dataset of one environment, in descriptor table order.
#[derive(Debug, Clone)]
pub struct AggregatedDatasets {
    environment: String,
    datasets: BTreeMap<DatasetKind, MergedDataset>,
}

impl AggregatedDatasets {
    pub fn new(environment: impl Into<String>) -> Self {
        Self {
            environment: environment.into(),
            datasets: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, kind: DatasetKind, dataset: MergedDataset) {
        self.datasets.insert(kind, dataset);
    }

    /// Name of the environment the datasets were aggregated for.
    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn get(&self, kind: DatasetKind) -> Option<&MergedDataset> {
        self.datasets.get(&kind)
    }

    /// Record of the aggregated environment inside the `environments` dataset.
    pub fn current_environment(&self) -> Option<&Value> {
        self.get(DatasetKind::Environments)?.get(&self.environment)
    }

    pub fn iter(&self) -> impl Iterator<Item = (DatasetKind, &MergedDataset)> {
        self.datasets.iter().map(|(kind, dataset)| (*kind, dataset))
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

/// Merge a single dataset for `env_name`.
pub fn aggregate_dataset(
    layout: &Layout,
    catalog: &SchemaCatalog,
    env_name: &str,
    kind: DatasetKind,
) -> Result<MergedDataset> {
    let descriptor = kind.descriptor();
    let files = discovery::resolve_files(layout, env_name, kind)?;
    merge::merge(
        &files,
        descriptor.key_field,
        catalog.get(kind),
        descriptor.duplicate_policy,
    )
}

/// Aggregate every dataset for `env_name`.
///
/// The environment name is checked against `environments.json` before any
/// other dataset is touched.
pub fn aggregate(
    layout: &Layout,
    catalog: &SchemaCatalog,
    env_name: &str,
) -> Result<AggregatedDatasets> {
    EnvironmentDirectory::load(layout)?.validate_exists(env_name)?;

    info!("Loading definition files for environment {env_name}");
    let mut aggregated = AggregatedDatasets::new(env_name);
    for descriptor in descriptors() {
        info!("Processing dataset {}", descriptor.kind);
        let dataset = aggregate_dataset(layout, catalog, env_name, descriptor.kind)?;
        aggregated.insert(descriptor.kind, dataset);
    }
    Ok(aggregated)
}

/// Execute the complete build: aggregate `env_name` and materialize the
/// result under the layout's output root.
pub fn execute_build(
    layout: &Layout,
    catalog: &SchemaCatalog,
    env_name: &str,
) -> Result<AggregatedDatasets> {
    let aggregated = aggregate(layout, catalog, env_name)?;
    write::execute(&aggregated, &layout.output_root)?;
    Ok(aggregated)
}
