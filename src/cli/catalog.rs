use clap::Parser;

use crate::mode::{Mode, parse_mode_arg};

/// Arguments for the catalog command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List every entry:\n    armory catalog\n\n\
                  Search names, descriptions and tags:\n    armory catalog potion\n\n\
                  Only active spells, as JSON:\n    armory catalog --class spell --status active --json")]
pub struct CatalogArgs {
    /// Case-insensitive search text
    pub query: Option<String>,

    /// Only entries of this class (e.g. item, spell, summon)
    #[arg(long)]
    pub class: Option<String>,

    /// Only entries with this status (e.g. active)
    #[arg(long)]
    pub status: Option<String>,

    /// Presentation mode (saga or civ)
    #[arg(long, value_parser = parse_mode_arg)]
    pub mode: Option<Mode>,

    /// Print matching entries as JSON
    #[arg(long)]
    pub json: bool,
}
