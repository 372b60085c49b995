//! Model downloads with a coarse size check
//!
//! The transfer goes to `<filename>.part` and is renamed only once complete,
//! so an interrupted download never looks like an installed model.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::ModelDescriptor;
use crate::error::{Result, fs as fs_error, release as release_error};
use crate::transport::Transport;
use crate::ui::ProgressReporter;

/// Result of comparing a file size against its floor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    Passed,
    /// The file was kept; it is probably incomplete
    BelowFloor { actual: u64, floor: u64 },
}

/// How a model download ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelOutcome {
    AlreadyPresent(PathBuf),
    Downloaded {
        path: PathBuf,
        size: u64,
        verification: Verification,
    },
}

/// `size >= floor` passes
pub fn verify_size(size: u64, floor: u64) -> Verification {
    if size >= floor {
        Verification::Passed
    } else {
        Verification::BelowFloor {
            actual: size,
            floor,
        }
    }
}

/// Where an in-flight download is written
pub fn partial_path(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".part");
    target.with_file_name(name)
}

/// Download `descriptor` into `models_dir` unless it is already there
pub fn download_model(
    transport: &dyn Transport,
    descriptor: &ModelDescriptor,
    models_dir: &Path,
    progress: &mut dyn ProgressReporter,
) -> Result<ModelOutcome> {
    let target = descriptor.path_in(models_dir);
    if target.is_file() {
        info!(model = descriptor.id, path = %target.display(), "model already present");
        return Ok(ModelOutcome::AlreadyPresent(target));
    }

    fs::create_dir_all(models_dir).map_err(|e| fs_error::write_failed(models_dir, &e))?;

    let partial = partial_path(&target);
    if partial.exists() {
        debug!(path = %partial.display(), "removing partial download from an earlier run");
        fs::remove_file(&partial).map_err(|e| fs_error::write_failed(&partial, &e))?;
    }

    info!(model = descriptor.id, url = descriptor.source_url, "downloading model");
    if let Err(e) = transport.download_to(descriptor.source_url, &partial, progress) {
        if partial.exists() {
            if let Err(remove_err) = fs::remove_file(&partial) {
                warn!(path = %partial.display(), "could not remove partial download: {remove_err}");
            }
        }
        return Err(release_error::download_failed(
            descriptor.source_url,
            e.to_string(),
        ));
    }

    fs::rename(&partial, &target).map_err(|e| fs_error::write_failed(&target, &e))?;
    let size = fs::metadata(&target)
        .map_err(|e| fs_error::io_error(format!("{}: {e}", target.display())))?
        .len();

    let verification = verify_size(size, descriptor.size_verification_floor);
    if let Verification::BelowFloor { actual, floor } = verification {
        warn!(
            model = descriptor.id,
            actual, floor, "model file is smaller than expected"
        );
    }

    Ok(ModelOutcome::Downloaded {
        path: target,
        size,
        verification,
    })
}
