//! Build `armory-manifest.v1.json` from a shop catalog
//!
//! The catalog is the hand-edited source of truth. Building adds what can be derived:
//! SHA-256 checksums of bundle files present in the checkout, raw download URLs at the
//! target ref, and the fixed mode contract and telemetry blocks. Entries are sorted by
//! id and the output is pretty JSON with sorted keys, so identical inputs produce
//! identical bytes.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value, json};
use tracing::debug;

use super::validate::validate;
use super::{EVENTS_PATH, Manifest, raw_url};
use crate::error::{Result, manifest as manifest_err};
use crate::progress::ProgressDisplay;
use crate::{git, hash};

/// Default catalog location, relative to the repository root
pub const DEFAULT_CATALOG_PATH: &str = "shop/catalog.json";

/// Manifest format version written by this builder
pub const MANIFEST_VERSION: u32 = 1;

/// Inputs of a manifest build
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub catalog: PathBuf,
    /// Repository root bundle paths are relative to
    pub root: PathBuf,
    pub repo: Option<String>,
    pub git_ref: Option<String>,
    pub generated_at: Option<String>,
}

/// Repository metadata stamped into the manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMetadata {
    pub repo: String,
    pub git_ref: String,
    pub generated_at: String,
}

impl SourceMetadata {
    /// Fill missing values from the git repository at `root`
    ///
    /// The repository is opened only when something was not given explicitly.
    pub fn resolve(options: &BuildOptions) -> Result<Self> {
        let explicit = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        };
        let (repo, git_ref, generated_at) = (
            explicit(&options.repo),
            explicit(&options.git_ref),
            explicit(&options.generated_at),
        );

        if let (Some(repo), Some(git_ref), Some(generated_at)) = (&repo, &git_ref, &generated_at) {
            return Ok(Self {
                repo: repo.clone(),
                git_ref: git_ref.clone(),
                generated_at: generated_at.clone(),
            });
        }

        let repository = git::open(&options.root)?;
        let metadata = Self {
            repo: match repo {
                Some(repo) => repo,
                None => git::origin_slug(&repository)?,
            },
            git_ref: match git_ref {
                Some(git_ref) => git_ref,
                None => git::head_sha(&repository)?,
            },
            generated_at: match generated_at {
                Some(ts) => ts,
                None => git::head_commit_time(&repository)?,
            },
        };
        debug!(?metadata, "Resolved manifest metadata from git");
        Ok(metadata)
    }
}

/// Read and parse the catalog JSON
pub fn read_catalog(path: &Path) -> Result<Value> {
    let display = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            manifest_err::catalog_invalid(&display, "missing catalog")
        } else {
            manifest_err::catalog_invalid(&display, e.to_string())
        }
    })?;
    serde_json::from_str(&content)
        .map_err(|e| manifest_err::catalog_invalid(&display, format!("invalid catalog JSON: {e}")))
}

/// Build the manifest document for `catalog`
pub fn build_manifest(
    catalog: &Value,
    metadata: &SourceMetadata,
    root: &Path,
    progress: &ProgressDisplay,
) -> Result<Value> {
    let mut entries_in: Vec<&Map<String, Value>> = Vec::new();
    for (n, entry) in catalog_entries(catalog)?.iter().enumerate() {
        let object = entry.as_object().ok_or_else(|| {
            manifest_err::catalog_invalid("catalog", format!("entry #{} is not an object", n + 1))
        })?;
        entries_in.push(object);
    }
    entries_in.sort_by(|a, b| field_str(a, "id").cmp(field_str(b, "id")));

    let mut entries_out = Vec::with_capacity(entries_in.len());
    for entry in entries_in {
        progress.update_entry(field_str(entry, "id"));
        entries_out.push(build_entry(entry, metadata, root)?);
        progress.inc_entry();
    }

    Ok(json!({
        "manifestVersion": MANIFEST_VERSION,
        "catalogVersion": catalog.get("version").cloned().unwrap_or(Value::Null),
        "generatedAt": metadata.generated_at,
        "repo": metadata.repo,
        "ref": metadata.git_ref,
        "modeContract": mode_contract(),
        "agentFlow": agent_flow(),
        "telemetry": {
            "endpoint": "",
            "eventsPath": EVENTS_PATH,
            "enabledByDefault": true,
            "optOut": {
                "installerFlag": "-NoTelemetry",
                "env": "ARMORY_TELEMETRY=off",
                "dashboardSetting": "telemetryOptOut=true",
            },
        },
        "entries": entries_out,
    }))
}

/// Check that a built document loads as a valid manifest
pub fn check_loadable(document: &Value) -> Result<Manifest> {
    let mut manifest: Manifest = serde_json::from_value(document.clone())
        .map_err(|e| manifest_err::invalid(format!("built manifest does not load: {e}")))?;
    validate(&mut manifest)?;
    Ok(manifest)
}

/// Pretty JSON with sorted keys and a trailing newline
pub fn render(document: &Value) -> Result<String> {
    let mut json = serde_json::to_string_pretty(document)?;
    json.push('\n');
    Ok(json)
}

/// Run a complete build and return the rendered manifest
pub fn run(options: &BuildOptions, progress_enabled: bool) -> Result<(String, usize)> {
    let catalog = read_catalog(&options.catalog)?;
    let metadata = SourceMetadata::resolve(options)?;
    let total = catalog_entries(&catalog)?.len();

    let progress = if progress_enabled {
        ProgressDisplay::new(total as u64)
    } else {
        ProgressDisplay::hidden()
    };

    let document = match build_manifest(&catalog, &metadata, &options.root, &progress) {
        Ok(document) => {
            progress.finish();
            document
        }
        Err(e) => {
            progress.abandon();
            return Err(e);
        }
    };

    check_loadable(&document)?;
    Ok((render(&document)?, total))
}

fn catalog_entries(catalog: &Value) -> Result<&[Value]> {
    let object = catalog
        .as_object()
        .ok_or_else(|| manifest_err::catalog_invalid("catalog", "expected a JSON object"))?;
    match object.get("entries") {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(entries)) => Ok(entries),
        Some(_) => Err(manifest_err::catalog_invalid(
            "catalog",
            "'entries' must be an array",
        )),
    }
}

fn build_entry(entry: &Map<String, Value>, metadata: &SourceMetadata, root: &Path) -> Result<Value> {
    let install = entry.get("install").and_then(Value::as_object);
    let install_field = |key: &str| install.and_then(|i| i.get(key)).cloned();

    let bundle_paths: Vec<String> = install
        .and_then(|i| i.get("bundlePaths"))
        .and_then(Value::as_array)
        .map(|paths| paths.iter().filter_map(Value::as_str).map(String::from).collect())
        .unwrap_or_default();

    let mut checksums = Map::new();
    let mut bundle_urls = Vec::with_capacity(bundle_paths.len());
    for rel in &bundle_paths {
        let full = root.join(rel);
        if full.is_file() {
            checksums.insert(rel.clone(), Value::String(hash::sha256_file(&full)?));
        } else {
            debug!("Bundle {} not present under {}; no checksum", rel, root.display());
        }
        bundle_urls.push(Value::String(raw_url(&metadata.repo, &metadata.git_ref, rel)));
    }

    let link = |key: &str| -> (Value, Value) {
        match entry.get(key).and_then(Value::as_str) {
            Some(path) => (
                Value::String(path.to_string()),
                Value::String(raw_url(&metadata.repo, &metadata.git_ref, path)),
            ),
            None => (Value::Null, Value::Null),
        }
    };
    let (script_path, script_url) = link("scriptPath");
    let (readme_path, readme_url) = link("readmePath");

    let passthrough = |key: &str| entry.get(key).cloned().unwrap_or(Value::Null);

    Ok(json!({
        "id": passthrough("id"),
        "class": passthrough("class"),
        "status": passthrough("status"),
        "owner": passthrough("owner"),
        "addedOn": passthrough("addedOn"),
        "display": entry.get("display").cloned().unwrap_or_else(|| json!({})),
        "tags": entry.get("tags").cloned().unwrap_or_else(|| json!([])),
        "install": {
            "entrypointPath": install_field("entrypointPath").unwrap_or(Value::Null),
            "bundlePaths": bundle_paths,
            "dependencies": install_field("dependencies").unwrap_or_else(|| json!([])),
            "platforms": install_field("platforms").unwrap_or_else(|| json!([])),
            "bundleUrls": bundle_urls,
            "checksums": checksums,
        },
        "source": {
            "scriptPath": script_path,
            "readmePath": readme_path,
            "scriptUrl": script_url,
            "readmeUrl": readme_url,
        },
    }))
}

fn field_str<'a>(entry: &'a Map<String, Value>, key: &str) -> &'a str {
    entry.get(key).and_then(Value::as_str).unwrap_or("")
}

fn mode_contract() -> Value {
    json!({
        "key": "mode",
        "allowed": ["saga", "civ"],
        "default": "saga",
        "normalization": {"lore": "saga", "crystal": "saga"},
        "aliases": {"saga": "Crystal Saga Mode", "civ": "Civilian Mode"},
    })
}

fn agent_flow() -> Value {
    json!({
        "requiredSequence": [
            "refresh_armory_clone",
            "scout_and_shortlist",
            "request_approval",
            "equip_selected_loadout",
            "report_in_active_mode",
        ],
        "refreshCommand": "git -C <armoryRepoRoot> pull --ff-only",
        "approvalRequired": true,
    })
}
