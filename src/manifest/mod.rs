//! Armory manifest model (`armory-manifest.v1.json`)
//!
//! The manifest is produced by `armory manifest build` and consumed read-only by every
//! other command. Required fields are plain values; everything the catalog may omit is
//! `Option` or defaulted, so the resolver and generator never probe loosely typed JSON.

pub mod build;
pub mod index;
pub mod load;
pub mod validate;

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::mode::Mode;

pub use index::EntryIndex;

/// Status value of entries that may be added to the cart
pub const ACTIVE_STATUS: &str = "active";

/// Path appended to the telemetry endpoint
pub const EVENTS_PATH: &str = "/v1/events";

/// Fallback description for entries without display text in the active mode
pub const NO_DESCRIPTION: &str = "No description available.";

/// Root manifest document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest_version: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_version: Option<serde_json::Value>,

    /// Timestamp of the commit the manifest was generated from
    pub generated_at: String,

    /// GitHub slug (`owner/name`) bundles are downloaded from
    pub repo: String,

    /// Branch, tag or commit bundles are downloaded at
    #[serde(rename = "ref")]
    pub git_ref: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode_contract: Option<serde_json::Value>,

    #[serde(default)]
    pub telemetry: TelemetryConfig,

    pub entries: Vec<ToolEntry>,
}

impl Manifest {
    /// Build the id -> entry index (last write wins on duplicate ids)
    pub fn index(&self) -> EntryIndex<'_> {
        EntryIndex::from_entries(&self.entries)
    }

    /// Raw content URL for a repository-relative path at the manifest ref
    pub fn raw_url(&self, path: &str) -> String {
        raw_url(&self.repo, &self.git_ref, path)
    }
}

/// Treat an explicit JSON `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Build `https://raw.githubusercontent.com/{repo}/{ref}/{path}`
pub fn raw_url(repo: &str, git_ref: &str, path: &str) -> String {
    format!("https://raw.githubusercontent.com/{repo}/{git_ref}/{path}")
}

/// Telemetry settings declared by the manifest
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_by_default: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opt_out: Option<serde_json::Value>,
}

impl TelemetryConfig {
    /// The endpoint, treating an empty or blank string as absent
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }

    /// Full events URL: endpoint without trailing slashes plus `/v1/events`
    pub fn events_url(&self) -> Option<String> {
        self.endpoint()
            .map(|e| format!("{}{}", e.trim_end_matches('/'), EVENTS_PATH))
    }
}

/// One catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolEntry {
    pub id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub class: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_on: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,

    /// Display text keyed by mode name (`saga`, `civ`)
    #[serde(default, deserialize_with = "null_as_default")]
    pub display: BTreeMap<String, DisplayText>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub install: InstallSpec,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceLinks>,
}

impl ToolEntry {
    /// Whether the entry may be selected into the cart
    pub fn is_active(&self) -> bool {
        self.status == ACTIVE_STATUS
    }

    /// Display name in the given mode, falling back to the id
    pub fn display_name(&self, mode: Mode) -> &str {
        self.display
            .get(mode.as_str())
            .and_then(|d| d.name.as_deref())
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.id)
    }

    /// Display description in the given mode, falling back to a placeholder
    pub fn display_description(&self, mode: Mode) -> &str {
        self.display
            .get(mode.as_str())
            .and_then(|d| d.description.as_deref())
            .filter(|d| !d.is_empty())
            .unwrap_or(NO_DESCRIPTION)
    }
}

/// Display text for one mode
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayText {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Install metadata for an entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entrypoint_path: Option<String>,

    /// Ids of entries this one depends on (may reference ids that do not exist)
    #[serde(default, deserialize_with = "null_as_default")]
    pub dependencies: Vec<String>,

    /// Repository-relative paths of downloadable bundles
    #[serde(default, deserialize_with = "null_as_default")]
    pub bundle_paths: Vec<String>,

    /// Bundle path -> hex SHA-256
    #[serde(default, deserialize_with = "null_as_default")]
    pub checksums: BTreeMap<String, String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub platforms: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub bundle_urls: Vec<String>,
}

/// Links to the entry's script and readme
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceLinks {
    pub script_path: Option<String>,
    pub readme_path: Option<String>,
    pub script_url: Option<String>,
    pub readme_url: Option<String>,
}
