//! `~/.armory/preferences.json`: mode and telemetry opt-out remembered by the CLI

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::mode::Mode;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Stored verbatim; normalized on read
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    #[serde(default)]
    pub telemetry_opt_out: bool,
}

impl Preferences {
    /// Best-effort read; anything unreadable yields the defaults
    pub fn load(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(content.trim_start_matches('\u{feff}')).unwrap_or_else(|e| {
            debug!("Ignoring malformed preferences {}: {}", path.display(), e);
            Self::default()
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        super::write_atomic(path, &super::to_pretty_json(self)?)
    }

    pub fn stored_mode(&self) -> Option<Mode> {
        self.mode.as_deref().and_then(Mode::normalize)
    }

    /// CLI mode: explicit argument, then the stored preference, then saga
    pub fn resolve_mode(&self, explicit: Option<Mode>) -> Mode {
        explicit.unwrap_or_else(|| Mode::from_loose(self.mode.as_deref()))
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode.as_str().to_string());
        self
    }

    pub fn with_telemetry_opt_out(mut self, opt_out: bool) -> Self {
        self.telemetry_opt_out = opt_out;
        self
    }
}
