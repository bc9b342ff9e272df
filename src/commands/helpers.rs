//! Command helper utilities

use std::path::PathBuf;

use tracing::debug;

use crate::config::{ArmoryPaths, Preferences};
use crate::error::{Result, fs as fs_err};
use crate::manifest::Manifest;
use crate::mode::Mode;
use crate::telemetry::{Emitter, HttpSink, TelemetryGate};

/// Resolve the current directory
pub fn current_dir() -> Result<PathBuf> {
    std::env::current_dir()
        .map_err(|e| fs_err::io_error(format!("Failed to get current directory: {e}")))
}

/// Per-user state every dashboard command consults
pub struct UserContext {
    /// `None` when no home directory can be determined
    pub paths: Option<ArmoryPaths>,
    pub preferences: Preferences,
}

impl UserContext {
    /// Best-effort load; a missing home directory leaves everything at defaults
    pub fn load() -> Self {
        let paths = match ArmoryPaths::from_home() {
            Ok(paths) => Some(paths),
            Err(e) => {
                debug!("Per-user files unavailable: {}", e);
                None
            }
        };
        let preferences = paths
            .as_ref()
            .map(|p| Preferences::load(&p.preferences()))
            .unwrap_or_default();
        Self { paths, preferences }
    }

    /// Paths, or an error for commands that must write per-user files
    pub fn require_paths(&self) -> Result<&ArmoryPaths> {
        self.paths
            .as_ref()
            .ok_or(crate::error::ArmoryError::HomeDirUnavailable)
    }

    pub fn mode(&self, explicit: Option<Mode>) -> Mode {
        self.preferences.resolve_mode(explicit)
    }

    pub fn telemetry_gate(&self, flag_opt_out: bool) -> TelemetryGate {
        TelemetryGate::from_env(self.preferences.telemetry_opt_out, flag_opt_out)
    }

    /// HTTP emitter for dashboard events against `manifest`
    pub fn emitter(&self, manifest: &Manifest, flag_opt_out: bool) -> Emitter<HttpSink> {
        Emitter::new(
            HttpSink::new(),
            self.telemetry_gate(flag_opt_out),
            manifest.telemetry.events_url(),
            self.paths.as_ref().map(ArmoryPaths::install_id),
            manifest.git_ref.clone(),
        )
    }
}
