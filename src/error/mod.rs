//! Error types and handling for sqlite-setup
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`config`]: Settings file errors
//! - [`fs`]: File system errors
//! - [`model`]: Model catalog errors
//! - [`platform`]: Platform resolution errors
//! - [`release`]: Release metadata, download and archive errors
//!
//! Only a few variants stop the whole run (see [`SetupError::is_fatal`]).
//! Everything else degrades the setup to local-only mode and is reported
//! as a warning by the caller.

pub mod config;
pub mod fs;
pub mod model;
pub mod platform;
pub mod release;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for setup operations
#[derive(Error, Diagnostic, Debug)]
pub enum SetupError {
    // Prerequisite errors
    #[error("Missing prerequisite: {tools}")]
    #[diagnostic(
        code(sqlite_setup::prereq::missing),
        help("Install the listed tools and make sure they are on your PATH, then re-run setup")
    )]
    MissingPrerequisite { tools: String },

    // Platform errors
    #[error("Unknown platform: {os}/{arch}")]
    #[diagnostic(
        code(sqlite_setup::platform::unknown),
        help("Pick a platform from the menu or pass --platform (macos, linux-x86_64, linux-arm64, windows-x86_64)")
    )]
    UnknownPlatform { os: String, arch: String },

    #[error("Invalid platform tag: {tag}")]
    #[diagnostic(
        code(sqlite_setup::platform::invalid_tag),
        help("Supported tags: macos, linux-x86_64, linux-arm64, windows-x86_64")
    )]
    InvalidPlatformTag { tag: String },

    // Release errors
    #[error("Failed to fetch release metadata for {repository}: {reason}")]
    #[diagnostic(code(sqlite_setup::release::metadata_fetch_failed))]
    MetadataFetchFailed { repository: String, reason: String },

    #[error("Release metadata for {repository} has no version tag")]
    #[diagnostic(code(sqlite_setup::release::version_parse_failed))]
    VersionParseFailed { repository: String },

    #[error("Download failed: {url}: {reason}")]
    #[diagnostic(
        code(sqlite_setup::release::download_failed),
        help("Check your network connection and re-run the command to retry")
    )]
    DownloadFailed { url: String, reason: String },

    #[error("Failed to extract archive {archive}: {reason}")]
    #[diagnostic(code(sqlite_setup::release::extraction_failed))]
    ExtractionFailed { archive: String, reason: String },

    #[error("No {target} library found in the release archive")]
    #[diagnostic(
        code(sqlite_setup::release::artifact_not_found),
        help("The archive layout may have changed; download the library manually")
    )]
    ArtifactNotFound {
        target: String,
        listing: Vec<String>,
    },

    #[error("Failed to install {path}: {reason}")]
    #[diagnostic(code(sqlite_setup::install::failed))]
    InstallFailed { path: String, reason: String },

    // Model errors
    #[error("Unknown model: {id}")]
    #[diagnostic(
        code(sqlite_setup::model::unknown),
        help("Run 'sqlite-setup models list' to see the available models")
    )]
    UnknownModel { id: String },

    // Configuration errors
    #[error("Failed to read configuration file: {path}: {reason}")]
    #[diagnostic(code(sqlite_setup::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(sqlite_setup::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(sqlite_setup::config::invalid))]
    ConfigInvalid { message: String },

    // File system errors
    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(sqlite_setup::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(sqlite_setup::fs::io_error))]
    IoError { message: String },

    // Prompt errors
    #[error("Prompt failed: {message}")]
    #[diagnostic(code(sqlite_setup::prompt::failed))]
    PromptFailed { message: String },
}

impl SetupError {
    /// Whether this error terminates the whole run.
    ///
    /// Acquisition failures never do: the operator is always left with a
    /// working local-only environment.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SetupError::MissingPrerequisite { .. }
                | SetupError::InvalidPlatformTag { .. }
                | SetupError::UnknownModel { .. }
                | SetupError::ConfigReadFailed { .. }
                | SetupError::ConfigParseFailed { .. }
                | SetupError::ConfigInvalid { .. }
                | SetupError::PromptFailed { .. }
        )
    }
}

impl From<std::io::Error> for SetupError {
    fn from(err: std::io::Error) -> Self {
        SetupError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for SetupError {
    fn from(err: inquire::InquireError) -> Self {
        SetupError::PromptFailed {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, SetupError>;
