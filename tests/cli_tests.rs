//! CLI integration tests using the REAL sqlite-setup binary

mod common;

use common::{TestWorkspace, sqlite_setup_cmd};
use predicates::prelude::*;

#[test]
fn test_help_output() {
    sqlite_setup_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("SQLite extensions"))
        .stdout(predicate::str::contains("setup"))
        .stdout(predicate::str::contains("install"))
        .stdout(predicate::str::contains("models"))
        .stdout(predicate::str::contains("status"));
}

#[test]
fn test_version_output() {
    sqlite_setup_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sqlite-setup"))
        .stdout(predicate::str::contains("Build info"));
}

#[test]
fn test_missing_subcommand_fails() {
    sqlite_setup_cmd().assert().failure();
}

#[test]
fn test_platform_command() {
    sqlite_setup_cmd()
        .arg("platform")
        .assert()
        .success()
        .stdout(predicate::str::contains("Host:"));
}

#[test]
fn test_completions_bash() {
    sqlite_setup_cmd()
        .args(["completions", "--shell", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sqlite-setup"));
}

#[test]
fn test_completions_unknown_shell() {
    sqlite_setup_cmd()
        .args(["completions", "--shell", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown shell"));
}

#[test]
fn test_models_list() {
    let workspace = TestWorkspace::offline();
    workspace
        .cmd()
        .args(["models", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tinyllama"))
        .stdout(predicate::str::contains("phi-3.5-mini"))
        .stdout(predicate::str::contains("qwen2.5-0.5b"));
}

#[test]
fn test_models_find_without_models() {
    let workspace = TestWorkspace::offline();
    workspace
        .cmd()
        .args(["models", "find"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No model found"));
}

#[test]
fn test_models_find_prefers_fastest() {
    let workspace = TestWorkspace::offline();
    workspace.write_file("models/tinyllama-1.1b-chat-v1.0.Q4_K_M.gguf", "tiny");
    workspace.write_file("models/qwen2.5-0.5b-instruct-q4_k_m.gguf", "qwen");

    workspace
        .cmd()
        .args(["models", "find"])
        .assert()
        .success()
        .stdout(predicate::str::contains("qwen2.5-0.5b-instruct-q4_k_m.gguf"));
}

#[test]
fn test_models_download_unknown_id_fails() {
    let workspace = TestWorkspace::offline();
    workspace
        .cmd()
        .args(["models", "download", "llama-70b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown model: llama-70b"));
}

#[test]
fn test_status_lists_installed_library() {
    let workspace = TestWorkspace::offline();
    workspace.write_file("cloudsync.so", "library");

    workspace
        .cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("cloudsync.so"))
        .stdout(predicate::str::contains("blake3:"))
        .stdout(predicate::str::contains("not installed"));
}

#[test]
fn test_missing_workspace_is_fatal() {
    let workspace = TestWorkspace::new();
    sqlite_setup_cmd()
        .arg("--workspace")
        .arg(workspace.path.join("does-not-exist"))
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("workspace directory does not exist"));
}

#[test]
fn test_install_unknown_extension_fails() {
    let workspace = TestWorkspace::offline();
    workspace
        .cmd()
        .args(["install", "vector"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown extension 'vector'"));
}

#[test]
fn test_install_with_unreachable_release_still_succeeds() {
    let workspace = TestWorkspace::offline();
    workspace
        .cmd()
        .args(["install", "sync", "--platform", "linux-x86_64"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Failed to fetch release metadata"))
        .stderr(predicate::str::contains(
            "http://127.0.0.1:9/sqliteai/sqlite-sync/releases",
        ));

    assert_eq!(workspace.entries(), vec!["sqlite-setup.yaml".to_string()]);
}
