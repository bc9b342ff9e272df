use clap::Parser;

use crate::mode::{Mode, parse_mode_arg};

/// Arguments for the resolve command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Preview a loadout:\n    armory resolve remedy\n\n\
                  Several tools, as JSON:\n    armory resolve remedy chronicle --json")]
pub struct ResolveArgs {
    /// Tool ids to select
    #[arg(required = true)]
    pub ids: Vec<String>,

    /// Presentation mode (saga or civ)
    #[arg(long, value_parser = parse_mode_arg)]
    pub mode: Option<Mode>,

    /// Print the loadout as JSON
    #[arg(long)]
    pub json: bool,
}
