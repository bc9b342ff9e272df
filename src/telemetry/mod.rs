//! Best-effort anonymous telemetry
//!
//! Events are POSTed as JSON to `{endpoint}/v1/events`. Nothing here can fail the
//! caller: [`Emitter::emit`] swallows every error and logs it at debug level.
//!
//! The opt-out gate ([`TelemetryGate`]) is evaluated before the payload is built or the
//! install-id file is touched, so an opted-out run performs no I/O at all.

pub mod install_id;
pub mod sink;

use std::path::PathBuf;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::mode::Mode;

pub use sink::{HttpSink, TelemetrySink};

/// Environment variable that disables telemetry when set to `off`
pub const TELEMETRY_ENV: &str = "ARMORY_TELEMETRY";

pub const DASHBOARD_LOADED: &str = "dashboard_loaded";
pub const INSTALLER_GENERATED: &str = "installer_generated";
pub const INSTALL_COMPLETED: &str = "install_completed";

/// `source` value of events sent by the CLI
pub const SOURCE_DASHBOARD: &str = "dashboard";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryEvent {
    pub event_name: String,
    pub install_id: String,
    pub session_id: String,
    pub source: String,
    pub tool_ids: Vec<String>,
    pub mode: Mode,
    pub manifest_ref: String,
    pub timestamp: String,
}

/// Opt-out sources, checked before anything is sent
#[derive(Debug, Clone, Default)]
pub struct TelemetryGate {
    /// Persisted preference (`telemetryOptOut` in preferences.json)
    pub preference_opt_out: bool,
    /// `--no-telemetry`
    pub flag_opt_out: bool,
    /// Raw value of `ARMORY_TELEMETRY`
    pub env_value: Option<String>,
}

impl TelemetryGate {
    pub fn from_env(preference_opt_out: bool, flag_opt_out: bool) -> Self {
        Self {
            preference_opt_out,
            flag_opt_out,
            env_value: std::env::var(TELEMETRY_ENV).ok(),
        }
    }

    pub fn env_opt_out(&self) -> bool {
        self.env_value
            .as_deref()
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("off"))
    }

    /// Whether an event may be sent to `events_url`
    pub fn allows(&self, events_url: Option<&str>) -> bool {
        !self.preference_opt_out
            && !self.flag_opt_out
            && !self.env_opt_out()
            && events_url.is_some_and(|url| !url.is_empty())
    }
}

/// Sends dashboard-side events through a [`TelemetrySink`]
pub struct Emitter<S: TelemetrySink> {
    sink: S,
    gate: TelemetryGate,
    events_url: Option<String>,
    install_id_path: Option<PathBuf>,
    manifest_ref: String,
}

impl<S: TelemetrySink> Emitter<S> {
    pub fn new(
        sink: S,
        gate: TelemetryGate,
        events_url: Option<String>,
        install_id_path: Option<PathBuf>,
        manifest_ref: impl Into<String>,
    ) -> Self {
        Self {
            sink,
            gate,
            events_url,
            install_id_path,
            manifest_ref: manifest_ref.into(),
        }
    }

    /// Send one event; returns whether a send was attempted
    pub fn emit(&self, event_name: &str, tool_ids: &[String], mode: Mode) -> bool {
        let Some(url) = self.events_url.as_deref() else {
            debug!(event = event_name, "Telemetry skipped: no endpoint");
            return false;
        };
        if !self.gate.allows(Some(url)) {
            debug!(event = event_name, "Telemetry skipped: opted out");
            return false;
        }

        let install_id = self
            .install_id_path
            .as_deref()
            .map_or_else(|| Uuid::new_v4().to_string(), install_id::load_or_create);

        let event = TelemetryEvent {
            event_name: event_name.to_string(),
            install_id,
            session_id: Uuid::new_v4().to_string(),
            source: SOURCE_DASHBOARD.to_string(),
            tool_ids: tool_ids.to_vec(),
            mode,
            manifest_ref: self.manifest_ref.clone(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        if let Err(reason) = self.sink.send(url, &event) {
            debug!(event = event_name, %reason, "Telemetry send failed");
        }
        true
    }

    #[cfg(test)]
    pub fn sink(&self) -> &S {
        &self.sink
    }
}
