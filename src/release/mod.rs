//! Release metadata and download URLs
//!
//! Queries `GET {api}/repos/{owner}/{repo}/releases/latest` for the version
//! tag, then derives the archive URL from it. A single attempt is made; both
//! failure kinds are non-fatal to the caller.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::artifact::ArtifactSpec;
use crate::error::{Result, release as release_error};
use crate::platform::Platform;
use crate::transport::Transport;

/// Resolved latest release of an artifact repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseMetadata {
    pub repository: String,
    /// Never empty
    pub version: String,
}

#[derive(Debug, Deserialize)]
struct LatestRelease {
    tag_name: Option<String>,
}

/// Metadata endpoint for the latest release of `owner/repo`
pub fn latest_release_url(api_base: &str, repository: &str) -> String {
    format!("{api_base}/repos/{repository}/releases/latest")
}

/// Look up the latest version tag of a repository
pub fn latest_version(
    transport: &dyn Transport,
    api_base: &str,
    repository: &str,
) -> Result<ReleaseMetadata> {
    let url = latest_release_url(api_base, repository);
    debug!(%url, "querying latest release");

    let body = transport
        .get_text(&url)
        .map_err(|e| release_error::metadata_fetch_failed(repository, e.to_string()))?;

    let version = parse_version_tag(&body)
        .ok_or_else(|| release_error::version_parse_failed(repository))?;

    info!(repository, %version, "resolved latest release");
    Ok(ReleaseMetadata {
        repository: repository.to_string(),
        version,
    })
}

/// Extract a non-empty `tag_name` from a release document
pub fn parse_version_tag(body: &str) -> Option<String> {
    let release: LatestRelease = serde_json::from_str(body).ok()?;
    release
        .tag_name
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
}

/// Archive file name: `{artifact}-{platform}-{version}.zip`
pub fn archive_name(artifact_name: &str, platform: &str, version: &str) -> String {
    format!("{artifact_name}-{platform}-{version}.zip")
}

/// Download URL for a release archive
///
/// Pure: the version and platform segments are inserted verbatim.
pub fn build_url(
    release_host: &str,
    repository: &str,
    artifact_name: &str,
    version: &str,
    platform: &str,
) -> String {
    format!(
        "{release_host}/{repository}/releases/download/{version}/{}",
        archive_name(artifact_name, platform, version)
    )
}

/// Where an archive comes from and where it lands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    pub destination: PathBuf,
}

impl DownloadRequest {
    pub fn new(
        release_host: &str,
        spec: &ArtifactSpec,
        release: &ReleaseMetadata,
        platform: Platform,
        root: &Path,
    ) -> Self {
        let platform = platform.tag();
        Self {
            url: build_url(
                release_host,
                &release.repository,
                spec.artifact_name,
                &release.version,
                platform,
            ),
            destination: root.join(archive_name(
                spec.artifact_name,
                platform,
                &release.version,
            )),
        }
    }
}
