//! Persisted per-user install identifier

use std::path::Path;

use tracing::debug;
use uuid::Uuid;

/// Read the install id from `path`, creating it on first use
///
/// Only `[A-Za-z0-9-]` survive from the stored value. An empty or unreadable file is
/// replaced by a fresh v4 UUID. Write failures are ignored: the freshly generated id is
/// still returned.
pub fn load_or_create(path: &Path) -> String {
    if let Ok(raw) = std::fs::read_to_string(path) {
        let id = sanitize(&raw);
        if !id.is_empty() {
            return id;
        }
    }

    let id = Uuid::new_v4().to_string();
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Err(e) = std::fs::write(path, format!("{id}\n")) {
        debug!("Could not persist install id to {}: {}", path.display(), e);
    }
    id
}

fn sanitize(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_then_reuses() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".armory").join("install-id.txt");

        let first = load_or_create(&path);
        assert!(Uuid::parse_str(&first).is_ok());
        assert!(path.exists());

        let second = load_or_create(&path);
        assert_eq!(first, second);
    }

    #[test]
    fn test_existing_id_is_trimmed_and_sanitized() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("install-id.txt");
        std::fs::write(&path, "\u{feff}abc-123\r\n").unwrap();

        assert_eq!(load_or_create(&path), "abc-123");
    }

    #[test]
    fn test_empty_file_regenerates() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("install-id.txt");
        std::fs::write(&path, "  \n").unwrap();

        let id = load_or_create(&path);
        assert!(Uuid::parse_str(&id).is_ok());
        assert_eq!(std::fs::read_to_string(&path).unwrap().trim(), id);
    }
}
