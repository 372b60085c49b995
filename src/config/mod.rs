//! Settings for a setup run
//!
//! Settings come from three layers, highest precedence first:
//! 1. command-line flags and their environment variables
//! 2. the optional YAML settings file (`sqlite-setup.yaml` in the workspace)
//! 3. built-in defaults

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::artifact::{self, ArtifactSpec};
use crate::error::{Result, config as config_error};

/// Settings file looked up in the workspace root when `--config` is not given
pub const CONFIG_FILE_NAME: &str = "sqlite-setup.yaml";

pub const DEFAULT_RELEASE_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_RELEASE_HOST: &str = "https://github.com";
pub const DEFAULT_MODELS_DIR: &str = "models";
pub const DEFAULT_PREREQUISITES: &[&str] = &["python3", "pip3", "sqlite3"];

/// On-disk settings file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    pub release_api_base: Option<String>,
    pub release_host: Option<String>,
    pub prerequisites: Option<Vec<String>>,
    pub extensions: Option<Vec<String>>,
    pub models_dir: Option<PathBuf>,
}

impl SettingsFile {
    /// Read and parse a settings file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| config_error::read_failed(path.display().to_string(), e.to_string()))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content)
            .map_err(|e| config_error::parse_failed(path.display().to_string(), e.to_string()))
    }
}

/// Values given on the command line (or through their environment variables)
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub release_api_base: Option<String>,
    pub release_host: Option<String>,
}

/// Fully resolved settings
#[derive(Debug, Clone)]
pub struct Settings {
    /// Filesystem root every component works in
    pub root: PathBuf,
    pub release_api_base: String,
    pub release_host: String,
    pub prerequisites: Vec<String>,
    pub extensions: Vec<&'static ArtifactSpec>,
    pub models_dir: PathBuf,
}

impl Settings {
    /// Resolve settings for a workspace root
    pub fn load(root: &Path, overrides: &Overrides) -> Result<Self> {
        if !root.is_dir() {
            return Err(config_error::invalid(format!(
                "workspace directory does not exist: {}",
                root.display()
            )));
        }
        let root = dunce::canonicalize(root).map_err(|e| {
            config_error::invalid(format!("cannot resolve workspace {}: {e}", root.display()))
        })?;

        let file = match overrides.config.as_ref() {
            Some(path) => {
                debug!(path = %path.display(), "loading settings file");
                SettingsFile::load(path)?
            }
            None => {
                let default_path = root.join(CONFIG_FILE_NAME);
                if default_path.is_file() {
                    debug!(path = %default_path.display(), "loading settings file");
                    SettingsFile::load(&default_path)?
                } else {
                    SettingsFile::default()
                }
            }
        };

        Self::from_layers(root, file, overrides)
    }

    fn from_layers(root: PathBuf, file: SettingsFile, overrides: &Overrides) -> Result<Self> {
        let release_api_base = normalize_base_url(
            "release_api_base",
            overrides
                .release_api_base
                .clone()
                .or(file.release_api_base)
                .unwrap_or_else(|| DEFAULT_RELEASE_API_BASE.to_string()),
        )?;
        let release_host = normalize_base_url(
            "release_host",
            overrides
                .release_host
                .clone()
                .or(file.release_host)
                .unwrap_or_else(|| DEFAULT_RELEASE_HOST.to_string()),
        )?;

        let prerequisites = file.prerequisites.unwrap_or_else(|| {
            DEFAULT_PREREQUISITES
                .iter()
                .map(|s| (*s).to_string())
                .collect()
        });
        if prerequisites.iter().any(|tool| tool.trim().is_empty()) {
            return Err(config_error::invalid(
                "prerequisites must not contain empty entries",
            ));
        }

        let extensions = match file.extensions {
            Some(keys) => parse_extension_keys(&keys)?,
            None => artifact::ARTIFACTS.iter().collect(),
        };

        let models_dir = match file.models_dir {
            Some(dir) if dir.is_absolute() => dir,
            Some(dir) => root.join(dir),
            None => root.join(DEFAULT_MODELS_DIR),
        };

        Ok(Self {
            root,
            release_api_base,
            release_host,
            prerequisites,
            extensions,
            models_dir,
        })
    }
}

/// Map extension keys onto artifact definitions, rejecting unknown keys
pub fn parse_extension_keys(keys: &[String]) -> Result<Vec<&'static ArtifactSpec>> {
    let mut specs: Vec<&'static ArtifactSpec> = Vec::new();
    for key in keys {
        let spec = artifact::find(key).ok_or_else(|| {
            config_error::invalid(format!(
                "unknown extension '{key}' (expected one of: {})",
                artifact::ARTIFACTS
                    .iter()
                    .map(|a| a.key)
                    .collect::<Vec<_>>()
                    .join(", ")
            ))
        })?;
        if !specs.contains(&spec) {
            specs.push(spec);
        }
    }
    Ok(specs)
}

fn normalize_base_url(field: &str, value: String) -> Result<String> {
    let trimmed = value.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(config_error::invalid(format!(
            "{field} must be an http(s) URL, got '{value}'"
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SetupError;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_settings_file() {
        let temp = TempDir::new().unwrap();
        let settings = Settings::load(temp.path(), &Overrides::default()).unwrap();

        assert_eq!(settings.release_api_base, DEFAULT_RELEASE_API_BASE);
        assert_eq!(settings.release_host, DEFAULT_RELEASE_HOST);
        assert_eq!(settings.prerequisites, vec!["python3", "pip3", "sqlite3"]);
        assert_eq!(settings.extensions.len(), 2);
        assert_eq!(settings.models_dir, settings.root.join("models"));
    }

    #[test]
    fn test_settings_file_in_workspace() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "release_host: http://mirror.local/\nextensions: [sync]\nprerequisites: [sh]\nmodels_dir: weights\n",
        )
        .unwrap();

        let settings = Settings::load(temp.path(), &Overrides::default()).unwrap();

        assert_eq!(settings.release_host, "http://mirror.local");
        assert_eq!(settings.extensions, vec![&artifact::SQLITE_SYNC]);
        assert_eq!(settings.prerequisites, vec!["sh"]);
        assert_eq!(settings.models_dir, settings.root.join("weights"));
    }

    #[test]
    fn test_overrides_win_over_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "release_api_base: http://file.local\n",
        )
        .unwrap();
        let overrides = Overrides {
            release_api_base: Some("http://flag.local".to_string()),
            ..Overrides::default()
        };

        let settings = Settings::load(temp.path(), &overrides).unwrap();
        assert_eq!(settings.release_api_base, "http://flag.local");
    }

    #[test]
    fn test_explicit_config_path() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("custom.yaml");
        std::fs::write(&config, "extensions: [ai, ai]\n").unwrap();
        let overrides = Overrides {
            config: Some(config),
            ..Overrides::default()
        };

        let settings = Settings::load(temp.path(), &overrides).unwrap();
        assert_eq!(settings.extensions, vec![&artifact::SQLITE_AI]);
    }

    #[test]
    fn test_empty_settings_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(CONFIG_FILE_NAME), "\n").unwrap();
        let settings = Settings::load(temp.path(), &Overrides::default()).unwrap();
        assert_eq!(settings.extensions.len(), 2);
    }

    #[test]
    fn test_unknown_key_is_fatal() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(CONFIG_FILE_NAME), "colour: blue\n").unwrap();
        let err = Settings::load(temp.path(), &Overrides::default()).unwrap_err();
        assert!(matches!(err, SetupError::ConfigParseFailed { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_unknown_extension_is_fatal() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(CONFIG_FILE_NAME), "extensions: [vector]\n").unwrap();
        let err = Settings::load(temp.path(), &Overrides::default()).unwrap_err();
        assert!(matches!(err, SetupError::ConfigInvalid { .. }));
    }

    #[test]
    fn test_non_http_base_is_rejected() {
        let temp = TempDir::new().unwrap();
        let overrides = Overrides {
            release_host: Some("ftp://example.com".to_string()),
            ..Overrides::default()
        };
        let err = Settings::load(temp.path(), &overrides).unwrap_err();
        assert!(matches!(err, SetupError::ConfigInvalid { .. }));
    }

    #[test]
    fn test_empty_prerequisite_is_rejected() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "prerequisites: [python3, '']\n",
        )
        .unwrap();
        let err = Settings::load(temp.path(), &Overrides::default()).unwrap_err();
        assert!(matches!(err, SetupError::ConfigInvalid { .. }));
    }

    #[test]
    fn test_missing_workspace_is_fatal() {
        let temp = TempDir::new().unwrap();
        let err =
            Settings::load(&temp.path().join("nope"), &Overrides::default()).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_missing_explicit_config_is_fatal() {
        let temp = TempDir::new().unwrap();
        let overrides = Overrides {
            config: Some(temp.path().join("absent.yaml")),
            ..Overrides::default()
        };
        let err = Settings::load(temp.path(), &overrides).unwrap_err();
        assert!(matches!(err, SetupError::ConfigReadFailed { .. }));
    }
}
