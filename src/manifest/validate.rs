//! Manifest validation
//!
//! Run once after parsing. Everything the resolver and script generator later embed
//! or join into paths is checked here, so they can trust the model.

use tracing::debug;

use super::Manifest;
use crate::error::{Result, manifest as manifest_err};
use crate::hash::is_sha256_hex;
use crate::path_utils::is_safe_relative_path;

/// Validate a parsed manifest, normalizing checksums to lowercase
pub fn validate(manifest: &mut Manifest) -> Result<()> {
    check_embeddable("repo", &manifest.repo)?;
    if manifest.repo.trim().is_empty() || !manifest.repo.contains('/') {
        return Err(manifest_err::invalid(format!(
            "repo must be 'owner/name', got '{}'",
            manifest.repo
        )));
    }

    check_embeddable("ref", &manifest.git_ref)?;
    if manifest.git_ref.trim().is_empty() {
        return Err(manifest_err::invalid("ref must not be empty"));
    }

    if let Some(endpoint) = &manifest.telemetry.endpoint {
        check_embeddable("telemetry.endpoint", endpoint)?;
    }

    for (position, entry) in manifest.entries.iter_mut().enumerate() {
        if entry.id.trim().is_empty() {
            return Err(manifest_err::invalid(format!(
                "entry #{} has an empty id",
                position + 1
            )));
        }
        check_embeddable("entry id", &entry.id)?;

        for path in &entry.install.bundle_paths {
            check_embeddable("bundle path", path)?;
            if !is_safe_relative_path(path) {
                return Err(manifest_err::invalid(format!(
                    "entry '{}' has unsafe bundle path '{}'",
                    entry.id, path
                )));
            }
        }

        for (path, checksum) in &mut entry.install.checksums {
            if !is_sha256_hex(checksum) {
                return Err(manifest_err::invalid(format!(
                    "entry '{}' declares a malformed checksum for '{}'",
                    entry.id, path
                )));
            }
            checksum.make_ascii_lowercase();
        }
    }

    debug!(
        entries = manifest.entries.len(),
        repo = %manifest.repo,
        git_ref = %manifest.git_ref,
        "Manifest validated"
    );

    Ok(())
}

fn check_embeddable(field: &str, value: &str) -> Result<()> {
    if value.contains('\0') {
        return Err(manifest_err::invalid(format!(
            "{field} contains a NUL character"
        )));
    }
    Ok(())
}
