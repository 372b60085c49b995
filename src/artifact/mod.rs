//! Extension artifact definitions
//!
//! Each artifact is a prebuilt SQLite extension published as GitHub release
//! archives named `{artifact}-{platform}-{version}.zip`.

use std::path::{Path, PathBuf};

use crate::platform::LIBRARY_EXTENSIONS;

/// A released extension library and how to find it inside its archive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactSpec {
    /// Short key used on the command line and in the settings file
    pub key: &'static str,
    /// `owner/repo` on the release host
    pub repository: &'static str,
    /// Archive name prefix and canonical library stem
    pub artifact_name: &'static str,
    /// Substring the recursive archive search looks for
    pub keyword: &'static str,
    pub description: &'static str,
}

pub const SQLITE_SYNC: ArtifactSpec = ArtifactSpec {
    key: "sync",
    repository: "sqliteai/sqlite-sync",
    artifact_name: "cloudsync",
    keyword: "cloudsync",
    description: "SQLite-Sync (CRDT sync extension)",
};

pub const SQLITE_AI: ArtifactSpec = ArtifactSpec {
    key: "ai",
    repository: "sqliteai/sqlite-ai",
    artifact_name: "ai",
    keyword: "ai",
    description: "SQLite-AI (on-device inference extension)",
};

/// Every artifact this tool knows how to install
pub const ARTIFACTS: &[ArtifactSpec] = &[SQLITE_SYNC, SQLITE_AI];

/// Look an artifact up by its key
pub fn find(key: &str) -> Option<&'static ArtifactSpec> {
    let key = key.trim().to_lowercase();
    ARTIFACTS.iter().find(|a| a.key == key)
}

impl ArtifactSpec {
    /// Canonical installed filename, e.g. `cloudsync.so`
    pub fn target_filename(&self, extension: &str) -> String {
        format!("{}.{}", self.artifact_name, extension)
    }

    /// Name patterns checked at the archive root, in priority order
    pub fn candidate_names(&self, extension: &str) -> [String; 2] {
        [
            self.target_filename(extension),
            format!("lib{}", self.target_filename(extension)),
        ]
    }

    /// Canonical filenames for every platform
    pub fn all_target_filenames(&self) -> Vec<String> {
        LIBRARY_EXTENSIONS
            .iter()
            .map(|ext| self.target_filename(ext))
            .collect()
    }

    /// The first canonical file already present under `root`, if any
    ///
    /// Presence alone marks the artifact as installed; contents are not checked.
    pub fn find_installed(&self, root: &Path) -> Option<PathBuf> {
        self.all_target_filenames()
            .into_iter()
            .map(|name| root.join(name))
            .find(|path| path.is_file())
    }

    /// Release page operators can download from by hand
    pub fn manual_download_url(&self, release_host: &str) -> String {
        format!("{}/{}/releases", release_host, self.repository)
    }
}
