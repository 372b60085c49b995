//! End-to-end tests for the setup command
//!
//! Every test points the release endpoints at a closed local port, so no
//! test touches the network.

mod common;

use common::{TestWorkspace, UNREACHABLE};
use predicates::prelude::*;

#[test]
fn test_local_only_setup() {
    let workspace = TestWorkspace::offline();
    workspace
        .cmd()
        .args(["setup", "--no-extension", "--model", "skip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Setup complete"))
        .stdout(predicate::str::contains("local-only mode"));
}

#[test]
fn test_missing_prerequisite_stops_setup() {
    let workspace = TestWorkspace::new();
    workspace.write_file(
        "sqlite-setup.yaml",
        "prerequisites: [definitely-not-a-real-tool-7f3a]\n",
    );

    workspace
        .cmd()
        .args(["setup", "--model", "skip"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Missing prerequisite: definitely-not-a-real-tool-7f3a",
        ))
        .stdout(predicate::str::contains("Setup complete").not());
}

#[test]
fn test_missing_prerequisite_stops_model_download() {
    let workspace = TestWorkspace::new();
    workspace.write_file(
        "sqlite-setup.yaml",
        "prerequisites: [definitely-not-a-real-tool-7f3a]\n",
    );

    workspace
        .cmd()
        .args(["models", "download", "qwen2.5-0.5b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Missing prerequisite: definitely-not-a-real-tool-7f3a",
        ))
        .stderr(predicate::str::contains("Download failed").not());

    assert!(!workspace.file_exists("models"));
}

#[test]
fn test_failed_downloads_degrade_to_local_only() {
    let workspace = TestWorkspace::offline();
    workspace
        .cmd()
        .args(["setup", "--platform", "linux-x86_64", "--model", "skip"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Failed to fetch release metadata"))
        .stderr(predicate::str::contains("Download it manually from"))
        .stdout(predicate::str::contains("Not installed: sync, ai"))
        .stdout(predicate::str::contains("local-only mode"));

    assert_eq!(workspace.entries(), vec!["sqlite-setup.yaml".to_string()]);
}

#[test]
fn test_installed_libraries_are_not_fetched_again() {
    let workspace = TestWorkspace::offline();
    workspace.write_file("cloudsync.so", "sync library");
    workspace.write_file("ai.dylib", "ai library");

    workspace
        .cmd()
        .args(["setup", "--model", "skip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already present"))
        .stdout(predicate::str::contains("Extensions: sync, ai"))
        .stderr(predicate::str::contains("Failed to fetch").not());

    assert_eq!(workspace.read_file("cloudsync.so"), "sync library");
    assert_eq!(workspace.read_file("ai.dylib"), "ai library");
}

#[test]
fn test_extension_flag_overrides_settings() {
    let workspace = TestWorkspace::offline();
    workspace.write_file("ai.so", "ai library");

    workspace
        .cmd()
        .args(["setup", "--extension", "ai", "--model", "skip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SQLite-Sync").not())
        .stdout(predicate::str::contains("Extensions: ai"));
}

#[test]
fn test_env_overrides_release_endpoints() {
    let workspace = TestWorkspace::new();
    workspace.write_file("sqlite-setup.yaml", "prerequisites: []\n");

    workspace
        .cmd()
        .env("SQLITE_SETUP_RELEASE_API", UNREACHABLE)
        .env("SQLITE_SETUP_RELEASE_HOST", UNREACHABLE)
        .args(["setup", "--extension", "sync", "--platform", "macos", "--model", "skip"])
        .assert()
        .success()
        .stderr(predicate::str::contains(format!(
            "{UNREACHABLE}/sqliteai/sqlite-sync/releases"
        )));
}

#[test]
fn test_unknown_model_is_fatal() {
    let workspace = TestWorkspace::offline();
    workspace
        .cmd()
        .args(["setup", "--no-extension", "--model", "gpt-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown model: gpt-5"));
}

#[test]
fn test_invalid_settings_file_is_fatal() {
    let workspace = TestWorkspace::new();
    workspace.write_file("sqlite-setup.yaml", "prerequisites: []\nmirror: example\n");

    workspace
        .cmd()
        .args(["setup", "--no-extension", "--model", "skip"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse configuration file"));
}

#[test]
fn test_unknown_extension_in_settings_is_fatal() {
    let workspace = TestWorkspace::new();
    workspace.write_file(
        "sqlite-setup.yaml",
        "prerequisites: []\nextensions: [sync, vector]\n",
    );

    workspace
        .cmd()
        .args(["setup", "--model", "skip"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_explicit_config_path() {
    let workspace = TestWorkspace::new();
    workspace.write_file("conf/offline.yaml", common::OFFLINE_SETTINGS);

    workspace
        .cmd()
        .arg("--config")
        .arg(workspace.path.join("conf/offline.yaml"))
        .args(["setup", "--no-extension", "--model", "skip"])
        .assert()
        .success();
}

#[test]
fn test_invalid_platform_tag_is_rejected() {
    let workspace = TestWorkspace::offline();
    workspace
        .cmd()
        .args(["setup", "--platform", "solaris-sparc", "--model", "skip"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("solaris-sparc"));
}
