use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    winstage completions bash > ~/.bash_completion.d/winstage\n\n\
                  Generate PowerShell completions:\n    winstage completions powershell >> $PROFILE")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
