//! Manifest loading from a file or an HTTP(S) URL

use std::path::Path;
use std::time::Duration;

use tracing::{debug, info};

use super::Manifest;
use super::validate::validate;
use crate::error::{Result, manifest as manifest_err};

/// Default manifest location, relative to the current directory
pub const DEFAULT_MANIFEST_PATH: &str = "docs/data/armory-manifest.v1.json";

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Whether a manifest source names a remote URL rather than a local path
pub fn is_url(source: &str) -> bool {
    source.starts_with("https://") || source.starts_with("http://")
}

/// Load, parse and validate a manifest
///
/// Any failure to obtain or parse the body is fatal (`ManifestLoadFailed`); a body that
/// parses but breaks an invariant is `ManifestInvalid`.
pub fn load(source: &str) -> Result<Manifest> {
    let body = if is_url(source) {
        fetch(source)?
    } else {
        read(Path::new(source))?
    };

    let mut manifest = parse(source, &body)?;
    validate(&mut manifest)?;
    Ok(manifest)
}

/// Parse a manifest body, attributing errors to `source`
pub fn parse(source: &str, body: &str) -> Result<Manifest> {
    serde_json::from_str(body)
        .map_err(|e| manifest_err::load_failed(source, format!("malformed manifest JSON: {e}")))
}

fn read(path: &Path) -> Result<String> {
    debug!("Reading manifest from {}", path.display());
    std::fs::read_to_string(path)
        .map_err(|e| manifest_err::load_failed(path.display().to_string(), e.to_string()))
}

fn fetch(url: &str) -> Result<String> {
    info!("Fetching manifest {}", url);

    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|e| manifest_err::load_failed(url, e.to_string()))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| manifest_err::load_failed(url, e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(manifest_err::load_failed(url, format!("HTTP {status}")));
    }

    response
        .text()
        .map_err(|e| manifest_err::load_failed(url, e.to_string()))
}
