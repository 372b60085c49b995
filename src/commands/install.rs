//! Install command implementation
//!
//! Runs the extension pipeline for a single artifact. Acquisition failures
//! are reported as warnings and the command still succeeds.

use crate::artifact::{self, ArtifactSpec};
use crate::cli::{GlobalArgs, InstallArgs};
use crate::commands::helpers::{http_transport, load_settings, prompter, report_failure};
use crate::config::Settings;
use crate::error::{Result, config as config_error};
use crate::installer::{InstallOutcome, InstallationPipeline};
use crate::platform::Platform;
use crate::prereq::check_prerequisites;
use crate::prompt::Prompter;
use crate::transport::Transport;
use crate::ui::{ProgressReporter, display, progress_reporter};

/// Run install command
pub fn run(global: GlobalArgs, args: InstallArgs) -> Result<()> {
    let settings = load_settings(&global)?;
    let spec = artifact::find(&args.extension).ok_or_else(|| {
        config_error::invalid(format!(
            "unknown extension '{}' (expected one of: {})",
            args.extension,
            artifact::ARTIFACTS
                .iter()
                .map(|a| a.key)
                .collect::<Vec<_>>()
                .join(", ")
        ))
    })?;

    check_prerequisites(&settings.prerequisites)?;

    let transport = http_transport()?;
    let mut prompter = prompter(global.yes);
    let mut progress = progress_reporter();
    install_extension(
        &settings,
        &transport,
        prompter.as_mut(),
        progress.as_mut(),
        spec,
        args.platform,
    )?;
    Ok(())
}

/// Install one extension and report how it went
///
/// Returns whether the library is in place afterwards. Only fatal errors
/// are returned; everything else is printed with a manual-download hint.
pub fn install_extension(
    settings: &Settings,
    transport: &dyn Transport,
    prompter: &mut dyn Prompter,
    progress: &mut dyn ProgressReporter,
    spec: &ArtifactSpec,
    platform: Option<Platform>,
) -> Result<bool> {
    display::heading(spec.description);

    let outcome = InstallationPipeline::new(settings, transport, prompter, progress)
        .with_platform(platform)
        .run(spec);

    match outcome {
        Ok(InstallOutcome::AlreadyInstalled(path)) => {
            display::success(&format!(
                "{} already present, skipping download",
                path.display()
            ));
            Ok(true)
        }
        Ok(InstallOutcome::Installed {
            path,
            version,
            platform,
        }) => {
            display::success(&format!(
                "Installed {} ({version}, {platform})",
                path.display()
            ));
            Ok(true)
        }
        Ok(InstallOutcome::Skipped) => {
            display::warning(&format!("Skipped the {} extension", spec.key));
            display::detail(&format!(
                "Download it manually from {}",
                spec.manual_download_url(&settings.release_host)
            ));
            Ok(false)
        }
        Err(e) if e.is_fatal() => Err(e),
        Err(e) => {
            report_failure(&e, &spec.manual_download_url(&settings.release_host));
            Ok(false)
        }
    }
}
