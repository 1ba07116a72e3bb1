//! Shared test utilities for integration and E2E tests.
//!
//! This module provides a metadata repository fixture and schema snippets
//! to reduce duplication across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_standard_metadata();
//!     fixture.command().arg("build").arg("dev").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};

use envmeta::config::Layout;
use envmeta::dataset::DatasetKind;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;
    #[allow(unused_imports)]
    pub use serde_json::json;

    #[allow(unused_imports)]
    pub use super::schemas;
    pub use super::TestFixture;
}

/// JSON Schema documents used by the fixture.
#[allow(dead_code)]
pub mod schemas {
    /// Array of objects with a required string `name`.
    pub const NAMED: &str = r#"{
  "type": "array",
  "items": {
    "type": "object",
    "required": ["name"],
    "properties": { "name": { "type": "string" } }
  }
}"#;

    /// Array of workspaces with a required resource id and a group list.
    pub const WORKSPACES: &str = r#"{
  "type": "array",
  "items": {
    "type": "object",
    "required": ["workspace_resource_id"],
    "properties": {
      "workspace_resource_id": { "type": "string" },
      "account_groups": { "type": "array", "items": { "type": "string" } }
    }
  }
}"#;

    /// Array of group master records.
    pub const GROUP_MASTER: &str = r#"{
  "type": "array",
  "items": {
    "type": "object",
    "required": ["aad_group_name"],
    "properties": { "aad_group_name": { "type": "string" } }
  }
}"#;

    /// Catalog schema that also requires an owner.
    pub const CATALOGS_WITH_OWNER: &str = r#"{
  "type": "array",
  "items": {
    "type": "object",
    "required": ["name", "owner"],
    "properties": { "name": { "type": "string" }, "owner": { "type": "string" } }
  }
}"#;
}

/// A temporary metadata repository laid out with the default folder names.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a fixture with every dataset schema in place and no metadata.
    pub fn new() -> Self {
        let fixture = Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        };
        for kind in DatasetKind::ALL {
            let schema = match kind {
                DatasetKind::Environments => continue,
                DatasetKind::Workspaces => schemas::WORKSPACES,
                DatasetKind::WorkspaceGroupMaster => schemas::GROUP_MASTER,
                _ => schemas::NAMED,
            };
            fixture.with_schema(kind, schema);
        }
        fixture
    }

    /// Replace the schema of `kind`.
    pub fn with_schema(&self, kind: DatasetKind, schema: &str) -> &Self {
        self.temp_dir
            .child(format!("metadata.schemas/{}.json", kind.name()))
            .write_str(schema)
            .expect("Failed to write schema");
        self
    }

    /// Write a metadata fragment relative to `metadata/`.
    pub fn with_metadata(&self, path: &str, content: Value) -> &Self {
        self.temp_dir
            .child(format!("metadata/{path}"))
            .write_str(&serde_json::to_string_pretty(&content).unwrap())
            .expect("Failed to write metadata");
        self
    }

    /// Write a raw file relative to the fixture root.
    pub fn with_file(&self, path: &str, content: &str) -> &Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Two environments with team, environment, and global fragments.
    pub fn with_standard_metadata(self) -> Self {
        use serde_json::json;

        self.with_metadata(
            "environments.json",
            json!([
                { "name": "dev", "databricks_account_id": "acc-1", "admin_workspace_url": "https://dev" },
                { "name": "prod", "databricks_account_id": "acc-1", "admin_workspace_url": "https://prod" }
            ]),
        )
        .with_metadata("catalogs.json", json!([{ "name": "shared" }]))
        .with_metadata("dev/catalogs.json", json!([{ "name": "dev_main" }]))
        .with_metadata("dev/team-a/catalogs.json", json!([{ "name": "team_a_sandbox" }]))
        .with_metadata("prod/catalogs.json", json!([{ "name": "prod_main" }]))
        .with_metadata(
            "dev/team-a/workspaces.json",
            json!([
                { "workspace_resource_id": "/ws/a", "account_groups": ["g1", "g2"] },
                { "workspace_resource_id": "/ws/b", "account_groups": ["g2", "g3"] }
            ]),
        )
        .with_metadata(
            "prod/workspaces.json",
            json!([{ "workspace_resource_id": "/ws/p", "account_groups": ["p1"] }]),
        )
        .with_metadata(
            "workspace-group-master.json",
            json!([{ "aad_group_name": "g4" }]),
        )
        .with_metadata("metastores.json", json!([{ "name": "westeurope" }]));
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Default layout rooted at the fixture.
    pub fn layout(&self) -> Layout {
        Layout::rooted_at(self.path())
    }

    /// Path of a materialized output file.
    pub fn output_file(&self, name: &str) -> PathBuf {
        self.path().join(".metadata.tmp").join(name)
    }

    /// Parse a materialized output file.
    pub fn read_output(&self, name: &str) -> Value {
        let content = std::fs::read_to_string(self.output_file(name))
            .unwrap_or_else(|e| panic!("Failed to read output {name}: {e}"));
        serde_json::from_str(&content).expect("Output is not valid JSON")
    }

    /// Create a command configured to run in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("envmeta");
        cmd.current_dir(self.path())
            .env_remove("ENVMETA_METADATA_DIR")
            .env_remove("ENVMETA_SCHEMAS_DIR")
            .env_remove("ENVMETA_OUTPUT_DIR")
            .env("NO_COLOR", "1");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
