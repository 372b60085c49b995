//! Command helper utilities

use std::io::IsTerminal;
use std::path::PathBuf;

use miette::Diagnostic;

use crate::cli::GlobalArgs;
use crate::config::{Overrides, Settings};
use crate::error::{Result, SetupError, fs as fs_error};
use crate::prompt::{NonInteractivePrompter, Prompter, TerminalPrompter};
use crate::transport::HttpTransport;
use crate::ui::display;

/// Resolve workspace path from optional argument
///
/// If a workspace path is provided, use it. Otherwise,
/// resolve to the current directory.
pub fn resolve_workspace_path(workspace: Option<PathBuf>) -> Result<PathBuf> {
    match workspace {
        Some(path) => Ok(path),
        None => std::env::current_dir()
            .map_err(|e| fs_error::io_error(format!("Failed to get current directory: {e}"))),
    }
}

/// Load settings for the workspace named by the global options
pub fn load_settings(global: &GlobalArgs) -> Result<Settings> {
    let root = resolve_workspace_path(global.workspace.clone())?;
    Settings::load(
        &root,
        &Overrides {
            config: global.config.clone(),
            release_api_base: global.release_api.clone(),
            release_host: global.release_host.clone(),
        },
    )
}

/// Terminal prompts unless `--yes` was given or stdin is not a terminal
pub fn prompter(yes: bool) -> Box<dyn Prompter> {
    if yes || !std::io::stdin().is_terminal() {
        Box::new(NonInteractivePrompter)
    } else {
        Box::new(TerminalPrompter)
    }
}

pub fn http_transport() -> Result<HttpTransport> {
    HttpTransport::new().map_err(|e| fs_error::io_error(format!("cannot start HTTP client: {e}")))
}

/// Print a non-fatal failure with a pointer to the manual download
pub fn report_failure(err: &SetupError, manual_url: &str) {
    display::warning(&err.to_string());
    if let SetupError::ArtifactNotFound { listing, .. } = err {
        if !listing.is_empty() {
            display::detail(&format!("Archive contents: {}", listing.join(", ")));
        }
    }
    if let Some(help) = err.help() {
        display::detail(&help.to_string());
    }
    display::detail(&format!("Download it manually from {manual_url}"));
}
