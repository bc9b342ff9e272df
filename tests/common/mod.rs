//! Common test utilities for Armory integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Raw URL prefix of the fixture manifest's repo and ref
pub const RAW_PREFIX: &str = "https://raw.githubusercontent.com/owner/armory/main/";

/// File name of the manifest written by [`TestWorkspace::write_manifest`]
pub const MANIFEST_FILE: &str = "armory-manifest.json";

/// Body of `tools/remedy/remedy.py` in the served tree
pub const REMEDY_BODY: &str = "print('remedy')\n";

/// SHA-256 of [`REMEDY_BODY`]
pub const REMEDY_SHA: &str = "278a4c84371a71e1c406c4ab9c6616e7adedebfab254b59dc9217beb79dcaa77";

/// A test workspace: a project directory (the cwd) and a separate home
pub struct TestWorkspace {
    pub temp: TempDir,
    /// Project directory, used as the working directory
    pub path: PathBuf,
    /// Stand-in for `$HOME`
    pub home: PathBuf,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().join("project");
        let home = temp.path().join("home");
        std::fs::create_dir_all(&path).expect("Failed to create project directory");
        std::fs::create_dir_all(&home).expect("Failed to create home directory");
        Self { temp, path, home }
    }

    /// Write a file relative to the project directory
    pub fn write_file(&self, path: &str, content: &str) {
        write(&self.path.join(path), content);
    }

    /// Write a file relative to the home directory
    pub fn write_home_file(&self, path: &str, content: &str) {
        write(&self.home.join(path), content);
    }

    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    pub fn read_home_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.home.join(path)).expect("Failed to read home file")
    }

    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    pub fn home_file_exists(&self, path: &str) -> bool {
        self.home.join(path).exists()
    }

    /// Write [`fixture_manifest`] with the given telemetry endpoint
    pub fn write_manifest(&self, endpoint: &str) -> PathBuf {
        self.write_file(MANIFEST_FILE, &fixture_manifest(endpoint).to_string());
        self.path.join(MANIFEST_FILE)
    }

    /// `armory` running in the project directory with an isolated home and no
    /// mode, telemetry or manifest overrides from the outer environment
    ///
    /// Loopback is exempt from any proxy so local listeners are reachable.
    pub fn armory_cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("armory").expect("Failed to find armory binary");
        cmd.current_dir(&self.path)
            .env("HOME", &self.home)
            .env("USERPROFILE", &self.home)
            .env("NO_PROXY", "127.0.0.1,localhost")
            .env("no_proxy", "127.0.0.1,localhost")
            .env_remove("ARMORY_TELEMETRY")
            .env_remove("ARMORY_MODE")
            .env_remove("SOVEREIGN_MODE")
            .env_remove("ARMORY_MANIFEST")
            .env_remove("ARMORY_LOG");
        cmd
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    std::fs::write(path, content).expect("Failed to write file");
}

/// Four entries: `remedy` needs `chronicle`, `scout` is standalone with two
/// bundles, `alexander` is retired
pub fn fixture_manifest(endpoint: &str) -> serde_json::Value {
    serde_json::json!({
        "manifestVersion": 1,
        "generatedAt": "2026-01-01T00:00:00+00:00",
        "repo": "owner/armory",
        "ref": "main",
        "telemetry": { "endpoint": endpoint, "eventsPath": "/v1/events" },
        "entries": [
            {
                "id": "remedy",
                "class": "item",
                "status": "active",
                "tags": ["repair", "ci"],
                "display": {
                    "saga": { "name": "Remedy Potion", "description": "Cures broken builds." },
                    "civ": { "name": "Build Fixer", "description": "Repairs failing CI runs." }
                },
                "install": {
                    "dependencies": ["chronicle"],
                    "bundlePaths": ["tools/remedy/remedy.py"],
                    "checksums": { "tools/remedy/remedy.py": REMEDY_SHA }
                }
            },
            {
                "id": "chronicle",
                "class": "scroll",
                "status": "active",
                "display": {
                    "saga": { "name": "Chronicle Scroll", "description": "Remembers every battle." },
                    "civ": { "name": "Changelog Writer", "description": "Drafts release notes." }
                },
                "install": {
                    "bundlePaths": ["tools/chronicle/chronicle.py"]
                }
            },
            {
                "id": "scout",
                "class": "summon",
                "status": "active",
                "install": {
                    "bundlePaths": ["summons/scout/scout.py", "summons/scout/README.md"]
                }
            },
            {
                "id": "alexander",
                "class": "summon",
                "status": "retired",
                "install": {
                    "bundlePaths": ["summons/alexander/alexander.py"]
                }
            }
        ]
    })
}
