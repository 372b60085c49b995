//! Release metadata, download and archive errors

use std::path::Path;

use super::SetupError;

/// Creates a metadata fetch failed error
pub fn metadata_fetch_failed(repository: &str, reason: impl Into<String>) -> SetupError {
    SetupError::MetadataFetchFailed {
        repository: repository.to_string(),
        reason: reason.into(),
    }
}

/// Creates a version parse failed error
pub fn version_parse_failed(repository: &str) -> SetupError {
    SetupError::VersionParseFailed {
        repository: repository.to_string(),
    }
}

/// Creates a download failed error
pub fn download_failed(url: &str, reason: impl Into<String>) -> SetupError {
    SetupError::DownloadFailed {
        url: url.to_string(),
        reason: reason.into(),
    }
}

/// Creates an extraction failed error
pub fn extraction_failed(archive: &Path, reason: impl Into<String>) -> SetupError {
    SetupError::ExtractionFailed {
        archive: archive.display().to_string(),
        reason: reason.into(),
    }
}

/// Creates an artifact not found error carrying the archive listing
pub fn artifact_not_found(target: impl Into<String>, listing: Vec<String>) -> SetupError {
    SetupError::ArtifactNotFound {
        target: target.into(),
        listing,
    }
}
