//! Setup command implementation
//!
//! The full bootstrap: prerequisites, one extension pipeline per configured
//! extension, an optional model download and a summary. Only a missing
//! prerequisite or a configuration error makes it fail; anything that goes
//! wrong while downloading leaves a local-only setup behind.

use tracing::debug;

use crate::artifact::{ArtifactSpec, SQLITE_AI};
use crate::cli::{GlobalArgs, SetupArgs};
use crate::commands::helpers::{http_transport, load_settings, prompter};
use crate::commands::install::install_extension;
use crate::commands::models::fetch_model;
use crate::config::{Settings, parse_extension_keys};
use crate::error::Result;
use crate::models::{ModelChoice, choose_model};
use crate::prereq::check_prerequisites;
use crate::prompt::Prompter;
use crate::transport::Transport;
use crate::ui::{ProgressReporter, display, progress_reporter};

/// What a setup run ended up with
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SetupSummary {
    pub installed: Vec<&'static str>,
    pub missing: Vec<&'static str>,
    pub model_ready: bool,
}

impl SetupSummary {
    pub fn local_only(&self) -> bool {
        self.installed.is_empty()
    }
}

/// Run setup command
pub fn run(global: GlobalArgs, args: SetupArgs) -> Result<()> {
    let settings = load_settings(&global)?;
    let extensions = requested_extensions(&settings, &args)?;
    // Parse before any work so a typo fails fast.
    let model = args.model.as_deref().map(ModelChoice::parse).transpose()?;

    display::heading("Checking prerequisites");
    let found = check_prerequisites(&settings.prerequisites)?;
    for path in &found {
        display::success(&path.display().to_string());
    }

    let transport = http_transport()?;
    let mut prompter = prompter(global.yes);
    let mut progress = progress_reporter();

    let summary = bootstrap(
        &settings,
        &transport,
        prompter.as_mut(),
        progress.as_mut(),
        &args,
        &extensions,
        model,
    )?;

    print_summary(&settings, &summary);
    Ok(())
}

/// Extensions to install: none, the command-line list, or the settings
fn requested_extensions(
    settings: &Settings,
    args: &SetupArgs,
) -> Result<Vec<&'static ArtifactSpec>> {
    if args.no_extension {
        Ok(Vec::new())
    } else if args.extensions.is_empty() {
        Ok(settings.extensions.clone())
    } else {
        parse_extension_keys(&args.extensions)
    }
}

/// Everything after the prerequisite check
pub fn bootstrap(
    settings: &Settings,
    transport: &dyn Transport,
    prompter: &mut dyn Prompter,
    progress: &mut dyn ProgressReporter,
    args: &SetupArgs,
    extensions: &[&'static ArtifactSpec],
    model: Option<ModelChoice>,
) -> Result<SetupSummary> {
    let mut summary = SetupSummary::default();

    for spec in extensions {
        if install_extension(settings, transport, prompter, progress, spec, args.platform)? {
            summary.installed.push(spec.key);
        } else {
            summary.missing.push(spec.key);
        }
    }

    let model = match model {
        Some(choice) => choice,
        // The model is only useful to the AI extension.
        None if extensions.iter().any(|spec| spec.key == SQLITE_AI.key) => {
            if prompter.confirm("Download a model for SQLite-AI now?", true)? {
                choose_model(prompter)?
            } else {
                ModelChoice::Skip
            }
        }
        None => ModelChoice::Skip,
    };

    match model {
        ModelChoice::Model(descriptor) => {
            summary.model_ready = fetch_model(settings, transport, progress, descriptor);
        }
        ModelChoice::Skip => debug!("model download skipped"),
    }

    Ok(summary)
}

fn print_summary(settings: &Settings, summary: &SetupSummary) {
    display::heading("Setup complete");
    display::display_field!("Workspace:", settings.root.display());
    if !summary.installed.is_empty() {
        display::display_field!("Extensions:", summary.installed.join(", "));
    }
    if !summary.missing.is_empty() {
        display::display_field!("Not installed:", summary.missing.join(", "));
    }
    display::display_field!("Models:", settings.models_dir.display());

    if summary.local_only() {
        println!();
        display::info("No extension is installed; the quickstarts will run in local-only mode.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::SQLITE_SYNC;
    use crate::installer::tests::build_zip;
    use crate::models::QWEN_2_5_0_5B;
    use crate::platform::Platform;
    use crate::prompt::ScriptedPrompter;
    use crate::release::{build_url, latest_release_url};
    use crate::transport::fake::FakeTransport;
    use crate::ui::SilentProgressReporter;
    use tempfile::TempDir;

    const API: &str = "https://api.example.test";
    const HOST: &str = "https://releases.example.test";

    fn settings(root: &std::path::Path) -> Settings {
        Settings {
            root: root.to_path_buf(),
            release_api_base: API.to_string(),
            release_host: HOST.to_string(),
            prerequisites: Vec::new(),
            extensions: vec![&SQLITE_SYNC, &SQLITE_AI],
            models_dir: root.join("models"),
        }
    }

    fn linux_args() -> SetupArgs {
        SetupArgs {
            platform: Some(Platform::LinuxX86_64),
            ..SetupArgs::default()
        }
    }

    #[test]
    fn test_all_downloads_failing_still_completes() {
        let temp = TempDir::new().unwrap();
        let settings = settings(temp.path());
        let transport = FakeTransport::new();
        // Accept the model download, take the first catalog entry.
        let mut prompter = ScriptedPrompter::new(["", ""]);

        let summary = bootstrap(
            &settings,
            &transport,
            &mut prompter,
            &mut SilentProgressReporter,
            &linux_args(),
            &settings.extensions,
            None,
        )
        .unwrap();

        assert!(summary.local_only());
        assert_eq!(summary.missing, vec!["sync", "ai"]);
        assert!(!summary.model_ready);
        assert_eq!(prompter.asked(), 2);
        assert_eq!(transport.calls(), 3);
    }

    #[test]
    fn test_installs_sync_and_skips_model() {
        let temp = TempDir::new().unwrap();
        let settings = settings(temp.path());
        let transport = FakeTransport::new()
            .with_body(
                &latest_release_url(API, SQLITE_SYNC.repository),
                r#"{"tag_name":"v1.2.0"}"#,
            )
            .with_body(
                &build_url(
                    HOST,
                    SQLITE_SYNC.repository,
                    "cloudsync",
                    "v1.2.0",
                    "linux-x86_64",
                ),
                build_zip(&[("libcloudsync.so", b"elf")]),
            );
        let mut prompter = ScriptedPrompter::new(Vec::<String>::new());

        let summary = bootstrap(
            &settings,
            &transport,
            &mut prompter,
            &mut SilentProgressReporter,
            &linux_args(),
            &[&SQLITE_SYNC],
            Some(ModelChoice::Skip),
        )
        .unwrap();

        assert_eq!(summary.installed, vec!["sync"]);
        assert!(!summary.local_only());
        assert!(temp.path().join("cloudsync.so").is_file());
        assert_eq!(prompter.asked(), 0);
    }

    #[test]
    fn test_no_model_prompt_without_ai_extension() {
        let temp = TempDir::new().unwrap();
        let settings = settings(temp.path());
        let transport = FakeTransport::new();
        let mut prompter = ScriptedPrompter::new(Vec::<String>::new());

        let summary = bootstrap(
            &settings,
            &transport,
            &mut prompter,
            &mut SilentProgressReporter,
            &linux_args(),
            &[],
            None,
        )
        .unwrap();

        assert!(summary.local_only());
        assert_eq!(transport.calls(), 0);
        assert_eq!(prompter.asked(), 0);
    }

    #[test]
    fn test_explicit_model_is_downloaded() {
        let temp = TempDir::new().unwrap();
        let settings = settings(temp.path());
        let transport =
            FakeTransport::new().with_body(QWEN_2_5_0_5B.source_url, b"gguf".to_vec());
        let mut prompter = ScriptedPrompter::new(Vec::<String>::new());

        let summary = bootstrap(
            &settings,
            &transport,
            &mut prompter,
            &mut SilentProgressReporter,
            &linux_args(),
            &[],
            Some(ModelChoice::Model(&QWEN_2_5_0_5B)),
        )
        .unwrap();

        assert!(summary.model_ready);
        assert!(
            settings
                .models_dir
                .join(QWEN_2_5_0_5B.filename)
                .is_file()
        );
    }

    #[test]
    fn test_declined_model_prompt() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("ai.so"), b"elf").unwrap();
        let settings = settings(temp.path());
        let transport = FakeTransport::new();
        let mut prompter = ScriptedPrompter::new(["maybe", "n"]);

        let summary = bootstrap(
            &settings,
            &transport,
            &mut prompter,
            &mut SilentProgressReporter,
            &linux_args(),
            &[&SQLITE_AI],
            None,
        )
        .unwrap();

        assert_eq!(summary.installed, vec!["ai"]);
        assert!(!summary.model_ready);
        assert_eq!(transport.calls(), 0);
        assert_eq!(prompter.asked(), 2);
    }

    #[test]
    fn test_requested_extensions() {
        let temp = TempDir::new().unwrap();
        let settings = settings(temp.path());

        let none = SetupArgs {
            no_extension: true,
            ..SetupArgs::default()
        };
        assert!(requested_extensions(&settings, &none).unwrap().is_empty());

        let from_settings = requested_extensions(&settings, &SetupArgs::default()).unwrap();
        assert_eq!(from_settings.len(), 2);

        let only_ai = SetupArgs {
            extensions: vec!["ai".to_string()],
            ..SetupArgs::default()
        };
        assert_eq!(
            requested_extensions(&settings, &only_ai).unwrap(),
            vec![&SQLITE_AI]
        );

        let unknown = SetupArgs {
            extensions: vec!["vector".to_string()],
            ..SetupArgs::default()
        };
        assert!(
            requested_extensions(&settings, &unknown)
                .unwrap_err()
                .is_fatal()
        );
    }
}
