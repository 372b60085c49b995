//! Required external tools
//!
//! Checked before any network action; a missing tool ends the run.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, SetupError};

/// Verify every tool is on the process `PATH`
pub fn check_prerequisites(tools: &[String]) -> Result<Vec<PathBuf>> {
    let cwd = std::env::current_dir().unwrap_or_default();
    check_prerequisites_in(tools, std::env::var_os("PATH"), &cwd)
}

/// Verify every tool is on the given search path
///
/// All missing tools are reported together.
pub fn check_prerequisites_in<P: AsRef<OsStr>>(
    tools: &[String],
    search_path: Option<P>,
    cwd: &Path,
) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    let mut missing = Vec::new();

    for tool in tools {
        match which::which_in(tool, search_path.as_ref(), cwd) {
            Ok(path) => {
                debug!(tool = %tool, path = %path.display(), "found prerequisite");
                found.push(path);
            }
            Err(_) => missing.push(tool.clone()),
        }
    }

    if missing.is_empty() {
        Ok(found)
    } else {
        Err(SetupError::MissingPrerequisite {
            tools: missing.join(", "),
        })
    }
}
