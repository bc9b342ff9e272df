//! Installer script generation
//!
//! Generation happens in two steps. [`InstallerScript::plan`] flattens the loadout and
//! manifest into dialect-agnostic data plus an ordered list of [`Statement`]s. A
//! [`ScriptDialect`] backend then renders each statement in its own syntax, routing
//! every manifest-derived value through its single `quote` function.
//!
//! Backends:
//! - [`powershell`]: `.ps1`, the default on Windows
//! - [`bash`]: `.sh`, the default elsewhere

pub mod bash;
pub mod dialect;
pub mod powershell;

use crate::error::{ArmoryError, Result};
use crate::manifest::{Manifest, ToolEntry};
use crate::mode::Mode;

pub use dialect::{DialectKind, ScriptDialect};

/// One downloadable artifact of a loadout entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    pub tool_id: String,
    /// Repository-relative path, also the destination under the install root
    pub path: String,
    pub url: String,
    /// Declared hex SHA-256; empty means unverified
    pub sha256: String,
}

/// Values embedded into a generated installer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptData {
    pub generated_at: String,
    pub repo: String,
    pub git_ref: String,
    pub bundles: Vec<Bundle>,
    /// Loadout ids in resolution order
    pub tool_ids: Vec<String>,
    /// Loadout ids in byte order, for the final summary
    pub sorted_tool_ids: Vec<String>,
    /// `{endpoint}/v1/events`, or `None` when the manifest has no endpoint
    pub events_url: Option<String>,
    /// Mode used when no configuration layer decides
    pub default_mode: Mode,
}

impl ScriptData {
    pub fn from_loadout(loadout: &[&ToolEntry], manifest: &Manifest, default_mode: Mode) -> Self {
        let bundles = loadout
            .iter()
            .flat_map(|entry| {
                entry.install.bundle_paths.iter().map(|path| Bundle {
                    tool_id: entry.id.clone(),
                    path: path.clone(),
                    url: manifest.raw_url(path),
                    sha256: entry
                        .install
                        .checksums
                        .get(path)
                        .cloned()
                        .unwrap_or_default(),
                })
            })
            .collect();

        let tool_ids: Vec<String> = loadout.iter().map(|entry| entry.id.clone()).collect();
        let mut sorted_tool_ids = tool_ids.clone();
        sorted_tool_ids.sort();

        Self {
            generated_at: manifest.generated_at.clone(),
            repo: manifest.repo.clone(),
            git_ref: manifest.git_ref.clone(),
            bundles,
            tool_ids,
            sorted_tool_ids,
            events_url: manifest.telemetry.events_url(),
            default_mode,
        }
    }

    /// Loadout ids as a compact JSON array, embedded for the telemetry payload
    pub fn tool_ids_json(&self) -> String {
        serde_json::to_string(&self.tool_ids).unwrap_or_else(|_| "[]".to_string())
    }

    /// Manifest ref as a JSON string literal, embedded for the telemetry payload
    pub fn manifest_ref_json(&self) -> String {
        serde_json::to_string(&self.git_ref).unwrap_or_else(|_| "\"\"".to_string())
    }
}

/// Dialect-agnostic building blocks of an installer, in emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statement {
    /// Header comments and argument parsing
    Prelude,
    /// Bundle list, tool ids, ref, events URL and default mode
    DeclareData,
    /// The layered mode precedence chain, assigned to the resolved mode
    ResolveMode,
    /// SHA-256 helper that aborts on a declared-checksum mismatch
    VerifyChecksum,
    /// Sequential fetch of every bundle under the install root
    DownloadLoop,
    /// Best-effort `install_completed` event
    EmitTelemetry,
    /// Mode-dependent closing lines with the sorted ids
    PrintSummary,
}

impl Statement {
    pub const ORDER: [Statement; 7] = [
        Statement::Prelude,
        Statement::DeclareData,
        Statement::ResolveMode,
        Statement::VerifyChecksum,
        Statement::DownloadLoop,
        Statement::EmitTelemetry,
        Statement::PrintSummary,
    ];
}

/// A planned installer, ready to render in any dialect
#[derive(Debug, Clone)]
pub struct InstallerScript {
    pub data: ScriptData,
    pub statements: Vec<Statement>,
}

impl InstallerScript {
    pub fn plan(loadout: &[&ToolEntry], manifest: &Manifest, default_mode: Mode) -> Self {
        Self {
            data: ScriptData::from_loadout(loadout, manifest, default_mode),
            statements: Statement::ORDER.to_vec(),
        }
    }

    pub fn render(&self, dialect: &dyn ScriptDialect) -> String {
        dialect.render(self)
    }
}

/// Generate a complete installer for a loadout
pub fn generate(
    loadout: &[&ToolEntry],
    manifest: &Manifest,
    kind: DialectKind,
    default_mode: Mode,
) -> Result<String> {
    if loadout.is_empty() {
        return Err(ArmoryError::EmptyLoadout);
    }

    let script = InstallerScript::plan(loadout, manifest, default_mode);
    tracing::debug!(
        dialect = %kind,
        bundles = script.data.bundles.len(),
        tools = script.data.tool_ids.len(),
        "Rendering installer"
    );
    Ok(script.render(kind.backend()))
}
