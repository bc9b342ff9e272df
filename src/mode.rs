//! Presentation mode (`saga` or `civ`) and its resolution rules
//!
//! Two resolvers live here. [`Mode::from_loose`] is the forgiving normalization the CLI
//! uses for its own output. [`resolve_installer_mode`] is the layered precedence chain a
//! generated installer executes at install time; the script backends emit the same chain
//! as code and are tested against this function.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ArmoryError, config as config_err};

/// Environment variable selecting civ mode in a generated installer
pub const MODE_ENV: &str = "ARMORY_MODE";

/// Legacy alias of [`MODE_ENV`]
pub const LEGACY_MODE_ENV: &str = "SOVEREIGN_MODE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Saga,
    Civ,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Saga => "saga",
            Mode::Civ => "civ",
        }
    }

    /// Map a recognised literal to a mode.
    ///
    /// Trims and lowercases first. `civ` is civ; `saga`, `lore` and `crystal` are saga.
    /// Anything else is `None` so callers can fall through to the next source.
    pub fn normalize(raw: &str) -> Option<Mode> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "civ" => Some(Mode::Civ),
            "saga" | "lore" | "crystal" => Some(Mode::Saga),
            _ => None,
        }
    }

    /// Normalize, defaulting anything unrecognised (or missing) to saga
    pub fn from_loose(raw: Option<&str>) -> Mode {
        raw.and_then(Mode::normalize).unwrap_or_default()
    }

    pub fn tone(self) -> ToneCopy {
        match self {
            Mode::Civ => ToneCopy {
                title: "Armory Tool Catalog",
                subtitle: "Scout, approve, install, and return to work.",
                cart_hint: "Select tools to build your install plan.",
                summary_heading: "Install complete. Tooling is ready.",
                summary_label: "Installed",
            },
            Mode::Saga => ToneCopy {
                title: "The Armory Shopfront",
                subtitle: "Scout, approve, equip, and return to the fight.",
                cart_hint: "Select tools to build your loadout.",
                summary_heading: "Loadout equipped. The party is battle-ready.",
                summary_label: "Equipped materia",
            },
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ArmoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::normalize(s).ok_or_else(|| config_err::invalid_mode(s))
    }
}

/// User-facing wording for one mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneCopy {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub cart_hint: &'static str,
    /// First line printed by a finished installer
    pub summary_heading: &'static str,
    /// Label in front of the sorted tool id list
    pub summary_label: &'static str,
}

/// clap value parser for `--mode`
pub fn parse_mode_arg(raw: &str) -> Result<Mode, String> {
    Mode::normalize(raw).ok_or_else(|| format!("invalid mode '{raw}' (expected saga or civ)"))
}

/// Precedence layer that decided an installer mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeSource {
    Flag,
    UserConfig,
    ProjectConfig,
    Environment,
    Default,
}

impl fmt::Display for ModeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ModeSource::Flag => "installer flag",
            ModeSource::UserConfig => "user config (~/.armory/config.json)",
            ModeSource::ProjectConfig => "project config (.sovereign.json)",
            ModeSource::Environment => "environment (ARMORY_MODE / SOVEREIGN_MODE)",
            ModeSource::Default => "compiled-in default",
        };
        f.write_str(label)
    }
}

/// Everything an installer consults when resolving its mode
#[derive(Debug, Clone, Default)]
pub struct InstallerModeInputs<'a> {
    pub civ_flag: bool,
    pub saga_flag: bool,
    pub mode_arg: Option<Mode>,
    /// Parsed `~/.armory/config.json`; `None` when missing or malformed
    pub user_config: Option<&'a Value>,
    /// Parsed `./.sovereign.json`; `None` when missing or malformed
    pub project_config: Option<&'a Value>,
    pub env_mode: Option<&'a str>,
    pub env_legacy_mode: Option<&'a str>,
    pub default_mode: Mode,
}

/// Resolve the mode a generated installer would pick, and which layer decided it
pub fn resolve_installer_mode(inputs: &InstallerModeInputs<'_>) -> (Mode, ModeSource) {
    if inputs.civ_flag {
        return (Mode::Civ, ModeSource::Flag);
    }
    if inputs.saga_flag {
        return (Mode::Saga, ModeSource::Flag);
    }
    if let Some(mode) = inputs.mode_arg {
        return (mode, ModeSource::Flag);
    }

    if let Some(config) = inputs.user_config {
        if let Some(mode) = config_mode(config) {
            return (mode, ModeSource::UserConfig);
        }
        if config.get("civilianAliases") == Some(&Value::Bool(true)) {
            return (Mode::Civ, ModeSource::UserConfig);
        }
    }

    if let Some(mode) = inputs.project_config.and_then(config_mode) {
        return (mode, ModeSource::ProjectConfig);
    }

    let env_selects_civ = |value: Option<&str>| value.and_then(Mode::normalize) == Some(Mode::Civ);
    if env_selects_civ(inputs.env_mode) || env_selects_civ(inputs.env_legacy_mode) {
        return (Mode::Civ, ModeSource::Environment);
    }

    (inputs.default_mode, ModeSource::Default)
}

/// The recognised `mode` string of a config object, if any
fn config_mode(config: &Value) -> Option<Mode> {
    config.get("mode").and_then(Value::as_str).and_then(Mode::normalize)
}
