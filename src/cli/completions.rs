use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    sqlite-setup completions --shell bash > ~/.bash_completion.d/sqlite-setup\n\n\
                  Generate zsh completions:\n    sqlite-setup completions --shell zsh > ~/.zfunc/_sqlite-setup\n\n\
                  Generate fish completions:\n    sqlite-setup completions --shell fish > ~/.config/fish/completions/sqlite-setup.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}
