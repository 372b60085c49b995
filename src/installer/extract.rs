//! Archive extraction
//!
//! Unpacks a release zip into a scratch directory. Entries whose paths would
//! escape the destination are rejected.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use tracing::debug;
use zip::read::ZipArchive;

use crate::error::{Result, release as release_error};

/// Extract every entry of `archive` below `dest`, returning the entry count
pub fn extract_archive(archive: &Path, dest: &Path) -> Result<usize> {
    let fail = |reason: String| release_error::extraction_failed(archive, reason);

    let file = File::open(archive).map_err(|e| fail(format!("open archive: {e}")))?;
    let mut zip = ZipArchive::new(file).map_err(|e| fail(format!("read zip archive: {e}")))?;
    fs::create_dir_all(dest).map_err(|e| fail(format!("create {}: {e}", dest.display())))?;

    for i in 0..zip.len() {
        let mut entry = zip
            .by_index(i)
            .map_err(|e| fail(format!("read entry {i}: {e}")))?;
        let Some(relative) = entry.enclosed_name().map(Path::to_path_buf) else {
            return Err(fail(format!("unsafe entry path '{}'", entry.name())));
        };
        let target = dest.join(&relative);

        if entry.is_dir() {
            fs::create_dir_all(&target)
                .map_err(|e| fail(format!("create {}: {e}", target.display())))?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| fail(format!("create {}: {e}", parent.display())))?;
        }
        let mut out = File::create(&target)
            .map_err(|e| fail(format!("create {}: {e}", target.display())))?;
        io::copy(&mut entry, &mut out)
            .map_err(|e| fail(format!("write {}: {e}", target.display())))?;
        debug!(entry = %relative.display(), "extracted");
    }

    Ok(zip.len())
}
