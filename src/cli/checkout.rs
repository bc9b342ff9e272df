use clap::Parser;

use crate::mode::{Mode, parse_mode_arg};
use crate::script::DialectKind;

/// Arguments for the checkout command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Pick tools interactively:\n    armory checkout\n\n\
                  Approve and write the default installer:\n    armory checkout remedy chronicle --yes\n\n\
                  Print a Bash installer to stdout:\n    armory checkout remedy --dialect bash --out - --yes")]
pub struct CheckoutArgs {
    /// Tool ids to select (prompted for when omitted on a terminal)
    pub ids: Vec<String>,

    /// Installer dialect (defaults to powershell on Windows, bash elsewhere)
    #[arg(long, value_enum)]
    pub dialect: Option<DialectKind>,

    /// Output file, or '-' for stdout (default: armory-loadout-installer.<ext>)
    #[arg(long, short = 'o')]
    pub out: Option<String>,

    /// Mode the installer falls back to when nothing else decides
    #[arg(long, value_parser = parse_mode_arg)]
    pub mode: Option<Mode>,

    /// Approve the loadout without prompting
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Do not send the installer_generated event
    #[arg(long)]
    pub no_telemetry: bool,
}
