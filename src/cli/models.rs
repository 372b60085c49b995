use clap::{Parser, Subcommand};

/// Arguments for models command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List the catalog:\n    sqlite-setup models list\n\n\
                  Download a model:\n    sqlite-setup models download qwen2.5-0.5b\n\n\
                  Print the model the quickstart will use:\n    sqlite-setup models find")]
pub struct ModelsArgs {
    #[command(subcommand)]
    pub command: ModelsSubcommand,
}

/// Models subcommands
#[derive(Subcommand, Debug)]
pub enum ModelsSubcommand {
    /// List catalog models and whether they are downloaded
    List,

    /// Download a model (asks which one when no id is given)
    Download {
        /// Catalog id
        id: Option<String>,
    },

    /// Print the preferred downloaded model
    Find,
}
