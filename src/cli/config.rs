use clap::{Parser, Subcommand, ValueEnum};

use crate::mode::{Mode, parse_mode_arg};

/// Arguments for config command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show configuration:\n    armory config show\n\n\
                  Use civilian wording everywhere:\n    armory config set-mode civ\n\n\
                  Opt out of telemetry:\n    armory config telemetry off\n\n\
                  Preview the mode an installer would pick:\n    armory config mode")]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Show config file locations and values
    Show,

    /// Persist the mode in config.json and the CLI preferences
    SetMode {
        /// saga or civ
        #[arg(value_parser = parse_mode_arg)]
        mode: Mode,
    },

    /// Turn telemetry on or off for this user
    Telemetry {
        #[arg(value_enum)]
        state: TelemetrySwitch,
    },

    /// Preview the mode a generated installer would resolve here
    Mode(ModePreviewArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TelemetrySwitch {
    On,
    Off,
}

/// Installer flags to simulate
#[derive(Parser, Debug)]
pub struct ModePreviewArgs {
    /// Simulate -Civ / --civ
    #[arg(long)]
    pub civ: bool,

    /// Simulate -Saga / --saga
    #[arg(long)]
    pub saga: bool,

    /// Simulate -Mode / --mode
    #[arg(long, value_parser = parse_mode_arg)]
    pub mode: Option<Mode>,

    /// Default baked into the installer
    #[arg(long, value_parser = parse_mode_arg, default_value = "saga")]
    pub default: Mode,
}
