//! # Directory Group Extraction
//!
//! Derives the set of directory-group names an environment references: every
//! entry of each workspace's `account_groups` plus every `aad_group_name` of
//! the `workspace-group-master` dataset. The identity synchronization tooling
//! consumes the union over all environments as a JSON array.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use log::{info, warn};
use serde_json::Value;

use crate::config::Layout;
use crate::dataset::DatasetKind;
use crate::environment::EnvironmentDirectory;
use crate::error::{Error, Result};
use crate::phases::orchestrator::{aggregate, AggregatedDatasets};
use crate::schema::SchemaCatalog;

const ACCOUNT_GROUPS_FIELD: &str = "account_groups";

/// Sorted, deduplicated group names referenced by `env_name`.
pub fn groups_for_environment(
    layout: &Layout,
    catalog: &SchemaCatalog,
    env_name: &str,
) -> Result<Vec<String>> {
    let aggregated = aggregate(layout, catalog, env_name)?;
    Ok(collect_groups(&aggregated).into_iter().collect())
}

/// Sorted union of the groups of every declared environment.
pub fn all_groups(layout: &Layout, catalog: &SchemaCatalog) -> Result<Vec<String>> {
    let directory = EnvironmentDirectory::load(layout)?;
    let mut groups = BTreeSet::new();
    for env_name in directory.names() {
        info!("Collecting groups for environment {env_name}");
        groups.extend(groups_for_environment(layout, catalog, env_name)?);
    }
    Ok(groups.into_iter().collect())
}

/// Group names referenced by an aggregation.
pub fn collect_groups(aggregated: &AggregatedDatasets) -> BTreeSet<String> {
    let mut groups = BTreeSet::new();

    if let Some(workspaces) = aggregated.get(DatasetKind::Workspaces) {
        for workspace in workspaces.records() {
            let Some(entries) = workspace.get(ACCOUNT_GROUPS_FIELD) else {
                continue;
            };
            match entries.as_array() {
                Some(entries) => groups.extend(entries.iter().filter_map(group_name)),
                None => warn!("Ignoring non-list {ACCOUNT_GROUPS_FIELD} value {entries}"),
            }
        }
    }

    if let Some(masters) = aggregated.get(DatasetKind::WorkspaceGroupMaster) {
        let key_field = DatasetKind::WorkspaceGroupMaster.descriptor().key_field;
        groups.extend(
            masters
                .records()
                .filter_map(|record| record.get(key_field))
                .filter_map(group_name),
        );
    }

    groups
}

fn group_name(value: &Value) -> Option<String> {
    match value.as_str() {
        Some(name) => Some(name.to_string()),
        None => {
            warn!("Ignoring non-string group name {value}");
            None
        }
    }
}

/// Write `groups` to `path` as a pretty-printed JSON array.
pub fn write_groups(groups: &[String], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| Error::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let content = serde_json::to_string_pretty(groups)?;
    fs::write(path, content).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn put(root: &Path, relative: &str, value: Value) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, value.to_string()).unwrap();
    }

    fn fixture() -> (TempDir, Layout) {
        let temp = TempDir::new().unwrap();
        let layout = Layout::rooted_at(temp.path());
        let input = &layout.input_root;
        put(input, "environments.json", json!([{ "name": "dev" }, { "name": "prod" }]));
        put(
            input,
            "dev/workspaces.json",
            json!([
                { "workspace_resource_id": "w1", "account_groups": ["g1", "g2"] },
                { "workspace_resource_id": "w2", "account_groups": ["g2", "g3"] }
            ]),
        );
        put(
            input,
            "dev/workspace-group-master.json",
            json!([{ "aad_group_name": "g4" }]),
        );
        put(
            input,
            "prod/workspaces.json",
            json!([{ "workspace_resource_id": "w3", "account_groups": ["p1"] }]),
        );
        put(
            input,
            "prod/team-x/workspace-group-master.json",
            json!([{ "aad_group_name": "g1" }]),
        );
        (temp, layout)
    }

    #[test]
    fn test_groups_for_environment_union() {
        let (_temp, layout) = fixture();
        let groups = groups_for_environment(&layout, &SchemaCatalog::new(), "dev").unwrap();
        assert_eq!(groups, vec!["g1", "g2", "g3", "g4"]);
    }

    #[test]
    fn test_workspace_without_groups_contributes_nothing() {
        let (_temp, layout) = fixture();
        put(
            &layout.input_root,
            "prod/workspaces.json",
            json!([{ "workspace_resource_id": "w3" }]),
        );
        let groups = groups_for_environment(&layout, &SchemaCatalog::new(), "prod").unwrap();
        assert_eq!(groups, vec!["g1"]);
    }

    #[test]
    fn test_all_groups_spans_environments() {
        let (_temp, layout) = fixture();
        let groups = all_groups(&layout, &SchemaCatalog::new()).unwrap();
        assert_eq!(groups, vec!["g1", "g2", "g3", "g4", "p1"]);
    }

    #[test]
    fn test_unknown_environment() {
        let (_temp, layout) = fixture();
        let err = groups_for_environment(&layout, &SchemaCatalog::new(), "qa").unwrap_err();
        assert!(matches!(err, Error::UnknownEnvironment { .. }));
    }

    #[test]
    fn test_write_groups_pretty_array() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out/groups.json");
        write_groups(&["a".to_string(), "b".to_string()], &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "[\n  \"a\",\n  \"b\"\n]");
    }
}
