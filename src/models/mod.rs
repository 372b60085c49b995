//! Downloadable model catalog
//!
//! A fixed list of GGUF weights the AI quickstart can run, plus a "skip"
//! entry. Downloads land in the models directory under the descriptor's
//! filename (see [`download`]).

pub mod download;

use std::path::{Path, PathBuf};

use crate::error::{Result, model as model_error};
use crate::prompt::Prompter;

/// A downloadable model weights file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelDescriptor {
    /// Short identifier used on the command line
    pub id: &'static str,
    pub display_name: &'static str,
    pub filename: &'static str,
    pub source_url: &'static str,
    pub approx_size_bytes: u64,
    /// Smallest file size accepted as a complete download (inclusive)
    pub size_verification_floor: u64,
}

pub const TINYLLAMA: ModelDescriptor = ModelDescriptor {
    id: "tinyllama",
    display_name: "TinyLlama 1.1B Chat (good balance)",
    filename: "tinyllama-1.1b-chat-v1.0.Q4_K_M.gguf",
    source_url: "https://huggingface.co/TheBloke/TinyLlama-1.1B-Chat-v1.0-GGUF/resolve/main/tinyllama-1.1b-chat-v1.0.Q4_K_M.gguf",
    approx_size_bytes: 668_788_096,
    size_verification_floor: 600_000_000,
};

pub const PHI_3_5_MINI: ModelDescriptor = ModelDescriptor {
    id: "phi-3.5-mini",
    display_name: "Phi-3.5 Mini Instruct (highest quality)",
    filename: "Phi-3.5-mini-instruct-Q4_K_M.gguf",
    source_url: "https://huggingface.co/bartowski/Phi-3.5-mini-instruct-GGUF/resolve/main/Phi-3.5-mini-instruct-Q4_K_M.gguf",
    approx_size_bytes: 2_393_232_672,
    size_verification_floor: 2_000_000_000,
};

pub const QWEN_2_5_0_5B: ModelDescriptor = ModelDescriptor {
    id: "qwen2.5-0.5b",
    display_name: "Qwen2.5 0.5B Instruct (fastest)",
    filename: "qwen2.5-0.5b-instruct-q4_k_m.gguf",
    source_url: "https://huggingface.co/Qwen/Qwen2.5-0.5B-Instruct-GGUF/resolve/main/qwen2.5-0.5b-instruct-q4_k_m.gguf",
    approx_size_bytes: 413_138_944,
    size_verification_floor: 350_000_000,
};

/// Catalog in menu order
pub const CATALOG: &[ModelDescriptor] = &[TINYLLAMA, PHI_3_5_MINI, QWEN_2_5_0_5B];

/// Order in which an installed model is picked up, fastest first
const PREFERENCE: &[&str] = &["qwen2.5-0.5b", "tinyllama", "phi-3.5-mini"];

/// Look a model up by id
pub fn find(id: &str) -> Result<&'static ModelDescriptor> {
    let wanted = id.trim().to_lowercase();
    CATALOG
        .iter()
        .find(|m| m.id == wanted)
        .ok_or_else(|| model_error::unknown(id))
}

impl ModelDescriptor {
    /// Final location of the weights in `models_dir`
    pub fn path_in(&self, models_dir: &Path) -> PathBuf {
        models_dir.join(self.filename)
    }

    /// The weights file, if it exists
    pub fn installed_path(&self, models_dir: &Path) -> Option<PathBuf> {
        let path = self.path_in(models_dir);
        path.is_file().then_some(path)
    }
}

/// Operator's answer to the model menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelChoice {
    Model(&'static ModelDescriptor),
    Skip,
}

impl ModelChoice {
    /// Parse a command-line value: a catalog id or `skip`
    pub fn parse(value: &str) -> Result<Self> {
        if value.trim().eq_ignore_ascii_case("skip") {
            return Ok(ModelChoice::Skip);
        }
        find(value).map(ModelChoice::Model)
    }
}

/// Ask which model to download; defaults to the first catalog entry
pub fn choose_model(prompter: &mut dyn Prompter) -> Result<ModelChoice> {
    let mut labels: Vec<String> = CATALOG
        .iter()
        .map(|m| {
            format!(
                "{} (~{})",
                m.display_name,
                crate::ui::display::format_bytes(m.approx_size_bytes)
            )
        })
        .collect();
    labels.push("Skip model download".to_string());

    let index = prompter.select("Select a model to download:", &labels, 0)?;
    Ok(CATALOG
        .get(index)
        .map_or(ModelChoice::Skip, ModelChoice::Model))
}

/// The preferred model already present in `models_dir`
pub fn preferred_installed(models_dir: &Path) -> Option<(&'static ModelDescriptor, PathBuf)> {
    PREFERENCE.iter().find_map(|id| {
        let descriptor = CATALOG.iter().find(|m| m.id == *id)?;
        descriptor
            .installed_path(models_dir)
            .map(|path| (descriptor, path))
    })
}
