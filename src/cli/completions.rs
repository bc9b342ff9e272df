use clap::Parser;
use clap_complete::Shell;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    armory completions bash > ~/.bash_completion.d/armory\n\n\
                  Generate zsh completions:\n    armory completions zsh > ~/.zfunc/_armory\n\n\
                  Generate fish completions:\n    armory completions fish > ~/.config/fish/completions/armory.fish\n\n\
                  Generate PowerShell completions:\n    armory completions powershell")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(value_enum, ignore_case = true)]
    pub shell: Shell,
}
