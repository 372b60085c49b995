//! Status command implementation
//!
//! Shows which extension libraries and models are present in the workspace.
//! Nothing is downloaded or changed.

use std::path::{Path, PathBuf};

use console::Style;

use crate::artifact::{ARTIFACTS, ArtifactSpec};
use crate::cli::GlobalArgs;
use crate::commands::helpers::load_settings;
use crate::config::Settings;
use crate::error::Result;
use crate::hash;
use crate::models::download::{Verification, partial_path, verify_size};
use crate::models::{CATALOG, ModelDescriptor};
use crate::ui::display::{self, format_bytes};

/// An installed extension library
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionStatus {
    pub spec: &'static ArtifactSpec,
    pub path: Option<PathBuf>,
    pub fingerprint: Option<String>,
}

/// State of a catalog model in the models directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelState {
    Missing,
    /// Only a `.part` file from an interrupted download
    Partial,
    Present { size: u64, verification: Verification },
}

/// Run status command
pub fn run(global: GlobalArgs) -> Result<()> {
    let settings = load_settings(&global)?;

    display::heading("Extensions");
    for status in extension_statuses(&settings.root) {
        print_extension(&status);
    }

    display::heading("Models");
    for model in CATALOG {
        print_model(model, &model_state(model, &settings.models_dir));
    }
    print_footer(&settings);
    Ok(())
}

pub fn extension_statuses(root: &Path) -> Vec<ExtensionStatus> {
    ARTIFACTS
        .iter()
        .map(|spec| {
            let path = spec.find_installed(root);
            let fingerprint = path.as_deref().and_then(|p| hash::hash_file(p).ok());
            ExtensionStatus {
                spec,
                path,
                fingerprint,
            }
        })
        .collect()
}

pub fn model_state(model: &ModelDescriptor, models_dir: &Path) -> ModelState {
    let path = model.path_in(models_dir);
    match std::fs::metadata(&path) {
        Ok(meta) if meta.is_file() => ModelState::Present {
            size: meta.len(),
            verification: verify_size(meta.len(), model.size_verification_floor),
        },
        _ if partial_path(&path).is_file() => ModelState::Partial,
        _ => ModelState::Missing,
    }
}

fn print_extension(status: &ExtensionStatus) {
    let name = Style::new().cyan().bold().apply_to(format!("{:<6}", status.spec.key));
    match (&status.path, &status.fingerprint) {
        (Some(path), fingerprint) => println!(
            "  {name} {} {}",
            path.display(),
            Style::new()
                .dim()
                .apply_to(fingerprint.as_deref().map_or("", hash::short))
        ),
        (None, _) => println!(
            "  {name} {}",
            Style::new().yellow().apply_to("not installed")
        ),
    }
}

fn print_model(model: &ModelDescriptor, state: &ModelState) {
    let name = Style::new().cyan().bold().apply_to(format!("{:<14}", model.id));
    let state = match state {
        ModelState::Missing => Style::new().dim().apply_to("not downloaded".to_string()),
        ModelState::Partial => {
            Style::new().yellow().apply_to("interrupted download (.part)".to_string())
        }
        ModelState::Present {
            size,
            verification: Verification::Passed,
        } => Style::new().green().apply_to(format_bytes(*size)),
        ModelState::Present {
            size,
            verification: Verification::BelowFloor { .. },
        } => Style::new()
            .yellow()
            .apply_to(format!("{} (smaller than expected)", format_bytes(*size))),
    };
    println!("  {name} {state}");
}

fn print_footer(settings: &Settings) {
    println!();
    println!("  Workspace: {}", settings.root.display());
    println!("  Models:    {}", settings.models_dir.display());
}
