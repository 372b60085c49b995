//! Finding the library inside an extracted archive
//!
//! Release archives are not laid out consistently: some ship `cloudsync.so`
//! at the root, some `libcloudsync.so`, some bury the file in a subdirectory.
//! The strategies below are tried in priority order and the first hit wins.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;
use wax::{CandidatePath, Glob, Pattern};

use crate::artifact::ArtifactSpec;
use crate::error::{Result, release as release_error};

/// Number of top-level entries reported when nothing matches
pub const LISTING_LIMIT: usize = 20;

type Strategy = fn(&Path, &ArtifactSpec, &str) -> Option<PathBuf>;

const STRATEGIES: &[(&str, Strategy)] = &[
    ("exact name", exact_name),
    ("lib-prefixed name", lib_prefixed_name),
    ("keyword search", keyword_search),
];

/// A library file found in the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    pub path: PathBuf,
    /// Name of the strategy that matched
    pub strategy: &'static str,
}

/// Find the library for `spec` under `root`
///
/// Fails with `ArtifactNotFound` carrying the first [`LISTING_LIMIT`]
/// top-level entries of the extracted tree.
pub fn locate(root: &Path, spec: &ArtifactSpec, extension: &str) -> Result<Located> {
    for (strategy, find) in STRATEGIES {
        if let Some(path) = find(root, spec, extension) {
            debug!(strategy, path = %path.display(), "located artifact");
            return Ok(Located {
                path,
                strategy,
            });
        }
    }

    Err(release_error::artifact_not_found(
        spec.target_filename(extension),
        top_level_listing(root, LISTING_LIMIT),
    ))
}

fn file_at_root(root: &Path, name: &str) -> Option<PathBuf> {
    let path = root.join(name);
    path.is_file().then_some(path)
}

fn exact_name(root: &Path, spec: &ArtifactSpec, extension: &str) -> Option<PathBuf> {
    let [exact, _] = spec.candidate_names(extension);
    file_at_root(root, &exact)
}

fn lib_prefixed_name(root: &Path, spec: &ArtifactSpec, extension: &str) -> Option<PathBuf> {
    let [_, prefixed] = spec.candidate_names(extension);
    file_at_root(root, &prefixed)
}

/// Recursive search for `*<keyword>*.<ext>`, first hit in sorted traversal order
fn keyword_search(root: &Path, spec: &ArtifactSpec, extension: &str) -> Option<PathBuf> {
    let expression = format!("*{}*.{}", spec.keyword, extension);
    let glob = Glob::new(&expression).ok()?;

    WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .find(|e| {
            let name = e.file_name().to_string_lossy();
            glob.matched(&CandidatePath::from(name.as_ref())).is_some()
        })
        .map(walkdir::DirEntry::into_path)
}

/// Sorted names of the entries directly under `root`; directories end in `/`
pub fn top_level_listing(root: &Path, limit: usize) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(root) else {
        return Vec::new();
    };

    let mut names: Vec<String> = entries
        .filter_map(|e| e.ok())
        .map(|e| {
            let name = e.file_name().to_string_lossy().into_owned();
            if e.path().is_dir() {
                format!("{name}/")
            } else {
                name
            }
        })
        .collect();
    names.sort();
    names.truncate(limit);
    names
}
