use clap::Parser;

use crate::platform::Platform;

/// Arguments for the install command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Install the sync extension for this machine:\n    sqlite-setup install sync\n\n\
                   Install the AI extension for another platform:\n    sqlite-setup install ai --platform windows-x86_64")]
pub struct InstallArgs {
    /// Extension to install (sync, ai)
    #[arg(value_name = "EXTENSION")]
    pub extension: String,

    /// Platform tag to install for instead of detecting it
    #[arg(long, value_name = "TAG")]
    pub platform: Option<Platform>,
}

#[cfg(test)]
mod tests {
    use crate::cli::{Cli, Commands};
    use crate::platform::Platform;
    use clap::Parser;

    #[test]
    fn test_cli_parsing_install() {
        let cli = Cli::try_parse_from(["sqlite-setup", "install", "sync"]).unwrap();
        match cli.command {
            Commands::Install(args) => {
                assert_eq!(args.extension, "sync");
                assert_eq!(args.platform, None);
            }
            _ => panic!("Expected Install command"),
        }
    }

    #[test]
    fn test_cli_parsing_install_with_platform() {
        let cli = Cli::try_parse_from(["sqlite-setup", "install", "ai", "--platform", "MacOS"])
            .unwrap();
        match cli.command {
            Commands::Install(args) => {
                assert_eq!(args.extension, "ai");
                assert_eq!(args.platform, Some(Platform::MacOs));
            }
            _ => panic!("Expected Install command"),
        }
    }

    #[test]
    fn test_cli_install_requires_extension() {
        assert!(Cli::try_parse_from(["sqlite-setup", "install"]).is_err());
    }
}
