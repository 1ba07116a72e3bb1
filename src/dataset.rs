//! # Dataset Descriptors
//!
//! The engine knows a fixed set of seven datasets. Each one is described by a
//! [`DatasetDescriptor`]: the identity field records are keyed by, whether a
//! schema document is expected, whether repeated keys are an error, and how
//! its source files are discovered.
//!
//! The descriptor table is compiled in and immutable; iterating
//! [`DatasetKind::ALL`] visits the datasets in their canonical order.

use std::fmt;

/// One of the datasets the engine aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DatasetKind {
    Catalogs,
    StorageCredentials,
    StorageLocations,
    Workspaces,
    Metastores,
    WorkspaceGroupMaster,
    Environments,
}

/// Whether repeated key values across source files are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// A repeated key is a fatal `DuplicateKey` error.
    Enforced,
    /// A repeated key silently replaces the earlier record (last write wins).
    Permissive,
}

/// Where the source files of a dataset are looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionScope {
    /// Team, environment, and global tiers for the selected environment.
    Environment,
    /// Only the global `<input_root>/<dataset>.json` file.
    Global,
}

/// Static description of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetDescriptor {
    pub kind: DatasetKind,
    pub key_field: &'static str,
    pub has_schema: bool,
    pub duplicate_policy: DuplicatePolicy,
    pub scope: ResolutionScope,
}

impl DatasetKind {
    /// Every dataset, in descriptor table order.
    pub const ALL: [DatasetKind; 7] = [
        DatasetKind::Catalogs,
        DatasetKind::StorageCredentials,
        DatasetKind::StorageLocations,
        DatasetKind::Workspaces,
        DatasetKind::Metastores,
        DatasetKind::WorkspaceGroupMaster,
        DatasetKind::Environments,
    ];

    /// File stem used for sources, schemas, and outputs.
    pub fn name(self) -> &'static str {
        match self {
            DatasetKind::Catalogs => "catalogs",
            DatasetKind::StorageCredentials => "storage-credentials",
            DatasetKind::StorageLocations => "storage-locations",
            DatasetKind::Workspaces => "workspaces",
            DatasetKind::Metastores => "metastores",
            DatasetKind::WorkspaceGroupMaster => "workspace-group-master",
            DatasetKind::Environments => "environments",
        }
    }

    /// Look a dataset up by its file stem.
    pub fn from_name(name: &str) -> Option<DatasetKind> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn descriptor(self) -> DatasetDescriptor {
        let (key_field, has_schema, duplicate_policy, scope) = match self {
            DatasetKind::Catalogs
            | DatasetKind::StorageCredentials
            | DatasetKind::StorageLocations
            | DatasetKind::Metastores => (
                "name",
                true,
                DuplicatePolicy::Enforced,
                ResolutionScope::Environment,
            ),
            DatasetKind::Workspaces => (
                "workspace_resource_id",
                true,
                DuplicatePolicy::Enforced,
                ResolutionScope::Environment,
            ),
            // Groups are shared across teams; repeating one is not a conflict.
            DatasetKind::WorkspaceGroupMaster => (
                "aad_group_name",
                true,
                DuplicatePolicy::Permissive,
                ResolutionScope::Environment,
            ),
            DatasetKind::Environments => (
                "name",
                false,
                DuplicatePolicy::Enforced,
                ResolutionScope::Global,
            ),
        };
        DatasetDescriptor {
            kind: self,
            key_field,
            has_schema,
            duplicate_policy,
            scope,
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The full descriptor table in canonical order.
pub fn descriptors() -> impl Iterator<Item = DatasetDescriptor> {
    DatasetKind::ALL.into_iter().map(DatasetKind::descriptor)
}
