//! Basic file operations for extension installation
//!
//! This module handles:
//! - Moving the located library to its canonical name
//! - Setting the executable bit on the installed file

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, fs as fs_error};

/// Put `located` at `target` and mark it executable
///
/// The executable bit is set even though the file is a shared library;
/// the quickstart tooling has always expected it.
pub fn install_file(located: &Path, target: &Path) -> Result<PathBuf> {
    if located != target {
        move_file(located, target)?;
        debug!(from = %located.display(), to = %target.display(), "moved library");
    }
    set_executable(target)?;
    Ok(target.to_path_buf())
}

fn move_file(source: &Path, target: &Path) -> Result<()> {
    if fs::rename(source, target).is_ok() {
        return Ok(());
    }
    // Rename fails across filesystems; fall back to copy + remove.
    fs::copy(source, target).map_err(|e| fs_error::install_failed(target, &e))?;
    fs::remove_file(source).map_err(|e| fs_error::install_failed(source, &e))?;
    Ok(())
}

#[cfg(unix)]
fn set_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = fs::metadata(path)
        .map_err(|e| fs_error::install_failed(path, &e))?
        .permissions();
    permissions.set_mode(permissions.mode() | 0o111);
    fs::set_permissions(path, permissions).map_err(|e| fs_error::install_failed(path, &e))
}

#[cfg(not(unix))]
fn set_executable(path: &Path) -> Result<()> {
    let mut permissions = fs::metadata(path)
        .map_err(|e| fs_error::install_failed(path, &e))?
        .permissions();
    #[allow(clippy::permissions_set_readonly_false)]
    permissions.set_readonly(false);
    fs::set_permissions(path, permissions).map_err(|e| fs_error::install_failed(path, &e))
}

/// Whether the file has any executable bit set
#[cfg(all(test, unix))]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path).is_ok_and(|m| m.permissions().mode() & 0o111 != 0)
}

#[cfg(all(test, not(unix)))]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}
