//! Host platform detection and operator fallback

use tracing::debug;

use crate::error::Result;
use crate::prompt::Prompter;

use super::{Platform, PlatformChoice, Resolution, resolve};

/// OS name of the running host, in `uname -s` form
pub fn host_os_name() -> &'static str {
    match std::env::consts::OS {
        "macos" => "Darwin",
        "linux" => "Linux",
        "windows" => "Windows_NT",
        other => other,
    }
}

/// CPU architecture of the running host, in `uname -m` form
pub fn host_arch_name() -> &'static str {
    std::env::consts::ARCH
}

/// Resolve the host platform without asking anything
pub fn detect_host() -> Resolution {
    let os = host_os_name();
    let arch = host_arch_name();
    let resolution = resolve(os, arch);
    debug!(os, arch, ?resolution, "detected host platform");
    resolution
}

/// Ask the operator to pick a platform from the enumerated menu
///
/// The default answer is `Skip`, so non-interactive runs on unknown hosts
/// never download a library built for the wrong platform.
pub fn choose_platform(prompter: &mut dyn Prompter, os: &str, arch: &str) -> Result<PlatformChoice> {
    let menu = PlatformChoice::menu();
    let labels: Vec<String> = menu.iter().map(|c| c.label().to_string()).collect();
    let default = menu.len() - 1;

    let message = format!("Could not detect a supported platform for {os}/{arch}. Select one:");
    let index = prompter.select(&message, &labels, default)?;

    Ok(menu.get(index).copied().unwrap_or(PlatformChoice::Skip))
}

/// Use the override when given, otherwise detect and fall back to the menu
pub fn resolve_or_choose(
    prompter: &mut dyn Prompter,
    override_platform: Option<Platform>,
    resolution: Resolution,
) -> Result<PlatformChoice> {
    if let Some(platform) = override_platform {
        return Ok(PlatformChoice::Platform(platform));
    }

    match resolution {
        Resolution::Resolved(platform) => Ok(PlatformChoice::Platform(platform)),
        Resolution::NeedsOperatorChoice { os, arch } => choose_platform(prompter, &os, &arch),
    }
}
