use clap::Parser;

use crate::platform::Platform;

/// Arguments for the setup command
#[derive(Parser, Debug, Default)]
#[command(after_help = "EXAMPLES:\n  \
                   Full interactive setup:\n    sqlite-setup setup\n\n\
                   Only the sync extension, no model:\n    sqlite-setup setup --extension sync --model skip\n\n\
                   Unknown host, force a platform:\n    sqlite-setup setup --platform linux-arm64\n\n\
                   Local-only setup:\n    sqlite-setup setup --no-extension --model skip")]
pub struct SetupArgs {
    /// Platform tag to install for instead of detecting it
    /// (macos, linux-x86_64, linux-arm64, windows-x86_64)
    #[arg(long, value_name = "TAG")]
    pub platform: Option<Platform>,

    /// Extension to install (sync, ai); repeat for several. Overrides the settings file
    #[arg(long = "extension", short = 'e', value_name = "KEY", conflicts_with = "no_extension")]
    pub extensions: Vec<String>,

    /// Do not install any extension
    #[arg(long)]
    pub no_extension: bool,

    /// Model to download (catalog id) or `skip`
    #[arg(long, value_name = "ID")]
    pub model: Option<String>,
}
