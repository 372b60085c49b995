//! Installation pipeline for SQLite extensions
//!
//! This module handles:
//! - Orchestration of installation stages (Probe → Platform → Release → Fetch → Extract → Locate → Install)
//! - Progress reporting during the download
//! - Cleanup of the archive and scratch tree on every exit path

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, info, warn};

use crate::artifact::ArtifactSpec;
use crate::config::Settings;
use crate::error::{Result, fs as fs_error, release as release_error};
use crate::installer::extract::extract_archive;
use crate::installer::file_ops::install_file;
use crate::installer::locate::locate;
use crate::platform::detection::{detect_host, resolve_or_choose};
use crate::platform::{Platform, PlatformChoice, Resolution};
use crate::prompt::Prompter;
use crate::release::{DownloadRequest, latest_version};
use crate::transport::Transport;
use crate::ui::ProgressReporter;

/// Installation pipeline stages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Probe,
    Platform,
    Release,
    Fetch,
    Extract,
    Locate,
    Install,
}

/// How an extension run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// A canonical library file was already in the root; nothing was fetched
    AlreadyInstalled(PathBuf),
    Installed {
        path: PathBuf,
        version: String,
        platform: Platform,
    },
    /// The operator chose to skip platform selection
    Skipped,
}

/// Installation pipeline for one extension at a time
pub struct InstallationPipeline<'a> {
    settings: &'a Settings,
    transport: &'a dyn Transport,
    prompter: &'a mut dyn Prompter,
    progress: &'a mut dyn ProgressReporter,
    platform_override: Option<Platform>,
    host: Option<Resolution>,
}

impl<'a> InstallationPipeline<'a> {
    pub fn new(
        settings: &'a Settings,
        transport: &'a dyn Transport,
        prompter: &'a mut dyn Prompter,
        progress: &'a mut dyn ProgressReporter,
    ) -> Self {
        Self {
            settings,
            transport,
            prompter,
            progress,
            platform_override: None,
            host: None,
        }
    }

    /// Install for this platform instead of the detected one
    pub fn with_platform(mut self, platform: Option<Platform>) -> Self {
        self.platform_override = platform;
        self
    }

    /// Use a fixed host resolution instead of probing the running machine
    #[cfg(test)]
    pub fn with_host(mut self, host: Resolution) -> Self {
        self.host = Some(host);
        self
    }

    /// Run every stage for `spec`
    pub fn run(&mut self, spec: &ArtifactSpec) -> Result<InstallOutcome> {
        let root = self.settings.root.as_path();

        stage(PipelineStage::Probe, spec);
        if let Some(existing) = spec.find_installed(root) {
            info!(artifact = spec.key, path = %existing.display(), "already installed");
            return Ok(InstallOutcome::AlreadyInstalled(existing));
        }
        sweep_stale(root, spec);

        stage(PipelineStage::Platform, spec);
        let resolution = self.host.clone().unwrap_or_else(detect_host);
        let platform =
            match resolve_or_choose(&mut *self.prompter, self.platform_override, resolution)? {
                PlatformChoice::Platform(platform) => platform,
                PlatformChoice::Skip => {
                    info!(artifact = spec.key, "platform selection skipped");
                    return Ok(InstallOutcome::Skipped);
                }
            };

        stage(PipelineStage::Release, spec);
        let release = latest_version(
            self.transport,
            &self.settings.release_api_base,
            spec.repository,
        )?;

        stage(PipelineStage::Fetch, spec);
        let request = DownloadRequest::new(
            &self.settings.release_host,
            spec,
            &release,
            platform,
            root,
        );
        let mut scratch = Scratch::new(request.destination.clone());
        info!(url = %request.url, "downloading archive");
        self.transport
            .download_to(&request.url, &request.destination, &mut *self.progress)
            .map_err(|e| release_error::download_failed(&request.url, e.to_string()))?;

        stage(PipelineStage::Extract, spec);
        let tree = scratch.tree(root, spec)?;
        extract_archive(&request.destination, &tree)?;

        stage(PipelineStage::Locate, spec);
        let extension = platform.library_extension();
        let located = locate(&tree, spec, extension)?;

        stage(PipelineStage::Install, spec);
        let target = root.join(spec.target_filename(extension));
        let path = install_file(&located.path, &target)?;
        info!(artifact = spec.key, path = %path.display(), version = %release.version, "installed");

        Ok(InstallOutcome::Installed {
            path,
            version: release.version,
            platform,
        })
    }
}

fn stage(stage: PipelineStage, spec: &ArtifactSpec) {
    debug!(?stage, artifact = spec.key, "pipeline stage");
}

/// Temporary files of one run, removed when dropped
struct Scratch {
    archive: PathBuf,
    tree: Option<TempDir>,
}

impl Scratch {
    fn new(archive: PathBuf) -> Self {
        Self {
            archive,
            tree: None,
        }
    }

    /// Create the extraction directory inside `root`
    fn tree(&mut self, root: &Path, spec: &ArtifactSpec) -> Result<PathBuf> {
        let dir = tempfile::Builder::new()
            .prefix(&scratch_prefix(spec))
            .tempdir_in(root)
            .map_err(|e| fs_error::write_failed(root, &e))?;
        let path = dir.path().to_path_buf();
        self.tree = Some(dir);
        Ok(path)
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        if self.archive.exists() {
            if let Err(e) = fs::remove_file(&self.archive) {
                warn!(path = %self.archive.display(), "could not remove archive: {e}");
            }
        }
        if let Some(tree) = self.tree.take() {
            if let Err(e) = tree.close() {
                warn!("could not remove extraction directory: {e}");
            }
        }
    }
}

fn scratch_prefix(spec: &ArtifactSpec) -> String {
    format!(".{}-extract-", spec.artifact_name)
}

/// Whether `name` is an archive this pipeline would have downloaded for `spec`
fn is_own_archive(name: &str, spec: &ArtifactSpec) -> bool {
    Platform::ALL.iter().any(|platform| {
        name.strip_prefix(spec.artifact_name)
            .and_then(|rest| rest.strip_prefix('-'))
            .and_then(|rest| rest.strip_prefix(platform.tag()))
            .is_some_and(|rest| rest.starts_with('-') && rest.ends_with(".zip"))
    })
}

/// Remove archives and scratch trees left behind by an interrupted run
pub fn sweep_stale(root: &Path, spec: &ArtifactSpec) -> usize {
    let Ok(entries) = fs::read_dir(root) else {
        return 0;
    };
    let prefix = scratch_prefix(spec);
    let mut removed = 0;

    for entry in entries.filter_map(|e| e.ok()) {
        let name = entry.file_name().to_string_lossy().into_owned();
        let path = entry.path();
        let result = if path.is_dir() && name.starts_with(&prefix) {
            fs::remove_dir_all(&path)
        } else if path.is_file() && is_own_archive(&name, spec) {
            fs::remove_file(&path)
        } else {
            continue;
        };
        match result {
            Ok(()) => {
                debug!(path = %path.display(), "removed leftover from interrupted run");
                removed += 1;
            }
            Err(e) => warn!(path = %path.display(), "could not remove leftover: {e}"),
        }
    }
    removed
}
