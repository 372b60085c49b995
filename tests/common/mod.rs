//! Common test utilities for sqlite-setup integration tests

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// Release endpoint that refuses connections immediately
pub const UNREACHABLE: &str = "http://127.0.0.1:9";

/// Settings that require no external tools and never reach the network
pub const OFFLINE_SETTINGS: &str = "prerequisites: []\n\
                                    release_api_base: http://127.0.0.1:9\n\
                                    release_host: http://127.0.0.1:9\n";

/// A test workspace for integration tests
pub struct TestWorkspace {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to workspace root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestWorkspace {
    /// Create a new test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Create a workspace with [`OFFLINE_SETTINGS`] as its settings file
    pub fn offline() -> Self {
        let workspace = Self::new();
        workspace.write_file("sqlite-setup.yaml", OFFLINE_SETTINGS);
        workspace
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from workspace
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists in workspace
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Names of top-level entries, sorted
    pub fn entries(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(&self.path)
            .expect("Failed to read workspace")
            .map(|e| {
                e.expect("Failed to read entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }

    /// Binary invocation bound to this workspace, isolated from the caller's env
    pub fn cmd(&self) -> Command {
        let mut cmd = sqlite_setup_cmd();
        cmd.current_dir(&self.path)
            .arg("--workspace")
            .arg(&self.path)
            .arg("--yes");
        cmd
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// The sqlite-setup binary with every `SQLITE_SETUP_*` variable cleared
// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn sqlite_setup_cmd() -> Command {
    let mut cmd = Command::cargo_bin("sqlite-setup").expect("binary is built");
    for var in [
        "SQLITE_SETUP_WORKSPACE",
        "SQLITE_SETUP_CONFIG",
        "SQLITE_SETUP_RELEASE_API",
        "SQLITE_SETUP_RELEASE_HOST",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_creation() {
        let workspace = TestWorkspace::new();
        assert!(workspace.path.exists());
    }

    #[test]
    fn test_workspace_file_operations() {
        let workspace = TestWorkspace::new();
        workspace.write_file("models/file.txt", "hello");
        assert!(workspace.file_exists("models/file.txt"));
        assert_eq!(workspace.read_file("models/file.txt"), "hello");
        assert_eq!(workspace.entries(), vec!["models".to_string()]);
    }

    #[test]
    fn test_offline_workspace_has_settings() {
        let workspace = TestWorkspace::offline();
        assert!(workspace.read_file("sqlite-setup.yaml").contains(UNREACHABLE));
    }
}
