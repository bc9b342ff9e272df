//! Configuration file handling for Armory
//!
//! Everything per-user lives under `~/.armory/`:
//! - `config.json` - install configuration read by generated installers
//! - `preferences.json` - CLI preferences (mode, telemetry opt-out)
//! - `install-id.txt` - telemetry install identifier
//!
//! Per-project settings come from `.sovereign.json` in the working directory.

pub mod preferences;
pub mod project;
pub mod user;

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{ArmoryError, Result, fs as fs_err};

pub use preferences::Preferences;
pub use user::UserConfig;

/// Per-user directory name under the home directory
pub const ARMORY_DIR: &str = ".armory";

pub const USER_CONFIG_FILE: &str = "config.json";
pub const PREFERENCES_FILE: &str = "preferences.json";
pub const INSTALL_ID_FILE: &str = "install-id.txt";

/// Per-project configuration file, read from the working directory
pub const PROJECT_CONFIG_FILE: &str = ".sovereign.json";

/// Locations of the per-user files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArmoryPaths {
    root: PathBuf,
}

impl ArmoryPaths {
    /// `~/.armory` of the current user
    pub fn from_home() -> Result<Self> {
        let home = dirs::home_dir().ok_or(ArmoryError::HomeDirUnavailable)?;
        Ok(Self::under(&home))
    }

    /// `.armory` beneath an arbitrary home directory
    pub fn under(home: &Path) -> Self {
        Self {
            root: home.join(ARMORY_DIR),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn user_config(&self) -> PathBuf {
        self.root.join(USER_CONFIG_FILE)
    }

    pub fn preferences(&self) -> PathBuf {
        self.root.join(PREFERENCES_FILE)
    }

    pub fn install_id(&self) -> PathBuf {
        self.root.join(INSTALL_ID_FILE)
    }
}

/// Serialize `value` as pretty JSON with a trailing newline
pub fn to_pretty_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}

/// Replace `path` atomically with `contents`, creating parent directories
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let display = path.display().to_string();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    std::fs::create_dir_all(&parent).map_err(|e| fs_err::write_failed(&display, e.to_string()))?;

    let mut temp =
        NamedTempFile::new_in(&parent).map_err(|e| fs_err::write_failed(&display, e.to_string()))?;
    temp.write_all(contents.as_bytes())
        .map_err(|e| fs_err::write_failed(&display, e.to_string()))?;
    temp.persist(path)
        .map_err(|e| fs_err::write_failed(&display, e.error.to_string()))?;

    Ok(())
}
