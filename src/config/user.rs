//! `~/.armory/config.json`, the install configuration generated installers read
//!
//! The file is kept as a JSON object so keys this crate does not know about survive a
//! rewrite untouched.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Result, config as config_err};
use crate::mode::Mode;

pub const MODE_KEY: &str = "mode";
pub const CIVILIAN_ALIASES_KEY: &str = "civilianAliases";
pub const COMMAND_WORD_KEY: &str = "commandWord";
pub const INSTALL_DIR_KEY: &str = "installDir";
pub const REPO_ROOT_KEY: &str = "repoRoot";

pub const DEFAULT_COMMAND_WORD: &str = "armory";
pub const DEFAULT_INSTALL_DIR: &str = "~/.local/bin";

#[derive(Debug, Clone)]
pub struct UserConfig {
    path: PathBuf,
    data: Map<String, Value>,
}

impl UserConfig {
    /// Best-effort read: a missing or malformed file yields an empty config
    pub fn load(path: &Path) -> Self {
        let data = match read_object(path) {
            Ok(Some(data)) => data,
            Ok(None) => Map::new(),
            Err(e) => {
                debug!("Ignoring unreadable user config: {}", e);
                Map::new()
            }
        };
        Self {
            path: path.to_path_buf(),
            data,
        }
    }

    /// Strict read used before rewriting, so a malformed file is never clobbered
    pub fn load_for_update(path: &Path) -> Result<Self> {
        let data = read_object(path)?.unwrap_or_default();
        Ok(Self {
            path: path.to_path_buf(),
            data,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The parsed object, as a generated installer would see it
    pub fn as_value(&self) -> Option<Value> {
        if self.data.is_empty() && !self.path.exists() {
            return None;
        }
        Some(Value::Object(self.data.clone()))
    }

    pub fn mode(&self) -> Option<Mode> {
        self.data
            .get(MODE_KEY)
            .and_then(Value::as_str)
            .and_then(Mode::normalize)
    }

    pub fn civilian_aliases(&self) -> bool {
        self.data.get(CIVILIAN_ALIASES_KEY) == Some(&Value::Bool(true))
    }

    pub fn command_word(&self) -> &str {
        self.string(COMMAND_WORD_KEY).unwrap_or(DEFAULT_COMMAND_WORD)
    }

    pub fn install_dir(&self) -> &str {
        self.string(INSTALL_DIR_KEY).unwrap_or(DEFAULT_INSTALL_DIR)
    }

    pub fn repo_root(&self) -> Option<&str> {
        self.string(REPO_ROOT_KEY)
    }

    /// Set `mode`, filling in the install defaults when absent
    pub fn set_mode(&mut self, mode: Mode) {
        self.data
            .insert(MODE_KEY.to_string(), Value::String(mode.as_str().to_string()));
        self.data
            .entry(COMMAND_WORD_KEY.to_string())
            .or_insert_with(|| Value::String(DEFAULT_COMMAND_WORD.to_string()));
        self.data
            .entry(INSTALL_DIR_KEY.to_string())
            .or_insert_with(|| Value::String(DEFAULT_INSTALL_DIR.to_string()));
    }

    pub fn save(&self) -> Result<()> {
        let json = super::to_pretty_json(&self.data)?;
        super::write_atomic(&self.path, &json)?;
        debug!("Wrote user config to {}", self.path.display());
        Ok(())
    }

    fn string(&self, key: &str) -> Option<&str> {
        self.data
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }
}

/// Read a JSON object; `Ok(None)` when the file is absent
pub(crate) fn read_object(path: &Path) -> Result<Option<Map<String, Value>>> {
    let display = path.display().to_string();
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(config_err::read_failed(display, e.to_string())),
    };

    match serde_json::from_str::<Value>(content.trim_start_matches('\u{feff}')) {
        Ok(Value::Object(map)) => Ok(Some(map)),
        Ok(_) => Err(config_err::parse_failed(display, "expected a JSON object")),
        Err(e) => Err(config_err::parse_failed(display, e.to_string())),
    }
}
