//! End-to-end tests for the `ls` and `tree` commands.

mod common;
use common::prelude::*;

#[test]
fn test_ls_lists_environment_names() {
    let fixture = TestFixture::new().with_standard_metadata();

    fixture
        .command()
        .arg("ls")
        .assert()
        .success()
        .stdout("dev\nprod\n");
}

#[test]
fn test_ls_json_keyed_by_name() {
    let fixture = TestFixture::new().with_standard_metadata();

    let output = fixture.command().args(["ls", "--json"]).output().unwrap();
    assert!(output.status.success());

    let records: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(records["prod"]["admin_workspace_url"], json!("https://prod"));
}

#[test]
fn test_ls_without_environments_file_is_empty() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .arg("ls")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_ls_broken_environments_file_fails() {
    let fixture = TestFixture::new();
    fixture.with_file("metadata/environments.json", "{");

    fixture
        .command()
        .arg("ls")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load environments"));
}

#[test]
fn test_tree_shows_fragments_in_merge_order() {
    let fixture = TestFixture::new().with_standard_metadata();

    let output = fixture
        .command()
        .args(["tree", "dev", "--dataset", "catalogs"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let team = stdout.find("team-a").expect("team fragment listed");
    let env = stdout.find("dev/catalogs.json").expect("environment fragment listed");
    assert!(team < env);
    assert!(!stdout.contains("prod/"));
}

#[test]
fn test_tree_rejects_unknown_dataset() {
    let fixture = TestFixture::new().with_standard_metadata();

    fixture
        .command()
        .args(["tree", "dev", "--dataset", "clusters"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown dataset"));
}
