//! sqlite-setup - quickstart bootstrapper for SQLite extensions
//!
//! Checks the tools the quickstarts need, installs the prebuilt SQLite-Sync and
//! SQLite-AI libraries for the current platform and downloads GGUF models.
//! Network failures never fail the setup; the quickstarts fall back to
//! local-only mode.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod artifact;
mod cli;
mod commands;
mod config;
mod error;
mod hash;
mod installer;
mod models;
mod platform;
mod prereq;
mod prompt;
mod release;
mod transport;
mod ui;

use cli::{Cli, Commands};

/// Diagnostics go to stderr; `RUST_LOG` wins over `--verbose`
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    let global = cli.global;
    let result = match cli.command {
        Commands::Setup(args) => commands::setup::run(global, args),
        Commands::Install(args) => commands::install::run(global, args),
        Commands::Models(args) => commands::models::run(global, args),
        Commands::Platform => commands::platform::run(),
        Commands::Status => commands::status::run(global),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        if let Some(help) = miette::Diagnostic::help(&e) {
            eprintln!("  {help}");
        }
        std::process::exit(1);
    }
}
