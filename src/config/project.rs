//! Per-project `.sovereign.json`

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use super::PROJECT_CONFIG_FILE;
use super::user::read_object;

/// Parsed `.sovereign.json` in `dir`, or `None` when absent or malformed
pub fn load(dir: &Path) -> Option<Value> {
    let path = dir.join(PROJECT_CONFIG_FILE);
    match read_object(&path) {
        Ok(map) => map.map(Value::Object),
        Err(e) => {
            debug!("Ignoring project config: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_absent_and_malformed() {
        let temp = TempDir::new().unwrap();
        assert!(load(temp.path()).is_none());

        std::fs::write(temp.path().join(PROJECT_CONFIG_FILE), "[1, 2]").unwrap();
        assert!(load(temp.path()).is_none());
    }

    #[test]
    fn test_reads_object() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(PROJECT_CONFIG_FILE), r#"{"mode": "civ"}"#).unwrap();
        assert_eq!(load(temp.path()).unwrap()["mode"], "civ");
    }
}
