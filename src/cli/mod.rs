//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - setup: Setup command arguments
//! - install: Install command arguments
//! - models: Models command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod completions;
pub mod install;
pub mod models;
pub mod setup;

pub use completions::CompletionsArgs;
pub use install::InstallArgs;
pub use models::{ModelsArgs, ModelsSubcommand};
pub use setup::SetupArgs;

/// sqlite-setup - quickstart bootstrapper for SQLite extensions
///
/// Installs prebuilt SQLite-Sync and SQLite-AI libraries for the current platform
/// and downloads models for on-device inference.
#[derive(Parser, Debug)]
#[command(
    name = "sqlite-setup",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Quickstart bootstrapper for SQLite extensions",
    long_about = "sqlite-setup prepares a quickstart directory: it checks the required tools, \
                  installs the prebuilt SQLite-Sync and SQLite-AI libraries for this platform \
                  and optionally downloads a GGUF model. Failed downloads never stop the setup; \
                  the quickstarts then run in local-only mode.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  sqlite-setup setup                         \x1b[90m# Full interactive setup\x1b[0m\n   \
                  sqlite-setup setup -y --model skip         \x1b[90m# Unattended, no model\x1b[0m\n   \
                  sqlite-setup install sync --platform macos \x1b[90m# Only the sync extension\x1b[0m\n   \
                  sqlite-setup models download tinyllama     \x1b[90m# Fetch one model\x1b[0m\n   \
                  sqlite-setup status                        \x1b[90m# What is installed\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Workspace directory (defaults to current directory)
    #[arg(long, short = 'w', global = true, env = "SQLITE_SETUP_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    /// Settings file (defaults to sqlite-setup.yaml in the workspace)
    #[arg(long, short = 'c', global = true, env = "SQLITE_SETUP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base URL of the release metadata API
    #[arg(long, global = true, env = "SQLITE_SETUP_RELEASE_API", hide = true)]
    pub release_api: Option<String>,

    /// Base URL release archives are downloaded from
    #[arg(long, global = true, env = "SQLITE_SETUP_RELEASE_HOST", hide = true)]
    pub release_host: Option<String>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Answer every prompt with its default
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check prerequisites, install extensions and offer a model download
    Setup(SetupArgs),

    /// Install a single extension
    Install(InstallArgs),

    /// List, download and find models
    Models(ModelsArgs),

    /// Show the detected platform
    Platform,

    /// Show installed extensions and models
    Status,

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
