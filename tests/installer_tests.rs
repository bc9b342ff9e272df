//! Runs generated Bash installers against a local bundle tree
//!
//! A fake `curl` on `PATH` copies raw URLs from the tree and appends every POST body
//! to a log, so downloads and telemetry are observable without a network.

#![cfg(unix)]

mod common;

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

use common::{MANIFEST_FILE, RAW_PREFIX, REMEDY_BODY, TestWorkspace};

const ENDPOINT: &str = "https://telemetry.example.test";
const INSTALLER: &str = "install.sh";

const SAGA_HEADING: &str = "Loadout equipped. The party is battle-ready.";
const CIV_HEADING: &str = "Install complete. Tooling is ready.";

fn fake_curl(prefix: &str) -> String {
    format!(
        r#"#!/usr/bin/env bash
out=""
data=""
url=""
while [ "$#" -gt 0 ]; do
  case "$1" in
    -o) out="$2"; shift ;;
    --data) data="$2"; shift ;;
    --max-time | -X | -H) shift ;;
    -*) ;;
    *) url="$1" ;;
  esac
  shift
done
if [ -n "$data" ]; then
  printf '%s %s\n' "$url" "$data" >>"$FAKE_CURL_LOG"
  exit 0
fi
rel="${{url#{prefix}}}"
[ -f "$FAKE_CURL_ROOT/$rel" ] || exit 22
cp "$FAKE_CURL_ROOT/$rel" "$out"
"#
    )
}

fn bash_available() -> bool {
    tool_available("bash")
}

fn tool_available(tool: &str) -> bool {
    std::process::Command::new(tool)
        .arg("--version")
        .output()
        .is_ok_and(|o| o.status.success())
}

/// A workspace with a generated installer for `remedy` and `scout`, a served
/// bundle tree and the fake `curl`
struct InstallerFixture {
    workspace: TestWorkspace,
    served: PathBuf,
    bin: PathBuf,
    log: PathBuf,
}

impl InstallerFixture {
    fn new() -> Self {
        let workspace = TestWorkspace::new();
        workspace.write_manifest(ENDPOINT);
        workspace
            .armory_cmd()
            .args(["-m", MANIFEST_FILE, "checkout", "remedy", "scout", "-y"])
            .args(["--dialect", "bash", "-o", INSTALLER, "--no-telemetry"])
            .assert()
            .success();

        let root = workspace.temp.path();
        let served = root.join("served");
        for (rel, body) in [
            ("tools/remedy/remedy.py", REMEDY_BODY),
            ("tools/chronicle/chronicle.py", "print('chronicle')\n"),
            ("summons/scout/scout.py", "print('scout')\n"),
            ("summons/scout/README.md", "# Scout\n"),
        ] {
            write(&served.join(rel), body);
        }

        let bin = root.join("bin");
        write(&bin.join("curl"), &fake_curl(RAW_PREFIX));
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(bin.join("curl"), std::fs::Permissions::from_mode(0o755))
                .unwrap();
        }

        let log = root.join("telemetry.log");
        Self {
            workspace,
            served,
            bin,
            log,
        }
    }

    fn run(&self) -> Command {
        self.run_on(&std::env::var("PATH").unwrap_or_default())
    }

    /// Run with the host's tools except `hidden`
    fn run_without(&self, hidden: &[&str]) -> Command {
        let shim = self.workspace.temp.path().join(format!("shim-{}", hidden.join("-")));
        std::fs::create_dir_all(&shim).unwrap();
        let host_path = std::env::var("PATH").unwrap_or_default();
        for dir in std::env::split_paths(&host_path) {
            let Ok(entries) = std::fs::read_dir(&dir) else { continue };
            for entry in entries.flatten() {
                let name = entry.file_name();
                if hidden.iter().any(|h| name == *h) || shim.join(&name).exists() {
                    continue;
                }
                let _ = std::os::unix::fs::symlink(entry.path(), shim.join(&name));
            }
        }
        self.run_on(&shim.display().to_string())
    }

    fn run_on(&self, host_path: &str) -> Command {
        let path = format!("{}:{}", self.bin.display(), host_path);
        let mut cmd = Command::new("bash");
        cmd.arg(INSTALLER)
            .current_dir(&self.workspace.path)
            .env("HOME", &self.workspace.home)
            .env("PATH", path)
            .env("FAKE_CURL_ROOT", &self.served)
            .env("FAKE_CURL_LOG", &self.log)
            .env_remove("ARMORY_TELEMETRY")
            .env_remove("ARMORY_MODE")
            .env_remove("SOVEREIGN_MODE");
        cmd
    }

    fn telemetry_lines(&self) -> Vec<String> {
        std::fs::read_to_string(&self.log)
            .map(|s| s.lines().map(String::from).collect())
            .unwrap_or_default()
    }
}

fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

macro_rules! require_bash {
    () => {
        if !bash_available() {
            eprintln!("bash not available; skipping");
            return;
        }
    };
}

#[test]
fn test_installer_downloads_loadout_and_reports() {
    require_bash!();
    let fixture = InstallerFixture::new();

    fixture
        .run()
        .assert()
        .success()
        .stdout(predicate::str::contains(SAGA_HEADING))
        .stdout(predicate::str::contains(
            "Equipped materia: chronicle, remedy, scout",
        ));

    let installed = fixture.workspace.path.join("armory-loadout");
    assert_eq!(
        std::fs::read_to_string(installed.join("tools/remedy/remedy.py")).unwrap(),
        REMEDY_BODY
    );
    assert!(installed.join("tools/chronicle/chronicle.py").is_file());
    assert!(installed.join("summons/scout/README.md").is_file());

    let lines = fixture.telemetry_lines();
    assert_eq!(lines.len(), 1);
    let (url, body) = lines[0].split_once(' ').unwrap();
    assert_eq!(url, "https://telemetry.example.test/v1/events");

    let event: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(event["eventName"], "install_completed");
    assert_eq!(event["source"], "installer");
    assert_eq!(event["mode"], "saga");
    assert_eq!(event["manifestRef"], "main");
    assert_eq!(
        event["toolIds"],
        serde_json::json!(["remedy", "scout", "chronicle"])
    );

    let install_id = fixture.workspace.read_home_file(".armory/install-id.txt");
    assert_eq!(event["installId"], install_id.trim());
}

#[test]
fn test_installer_reuses_install_id() {
    require_bash!();
    let fixture = InstallerFixture::new();
    fixture
        .workspace
        .write_home_file(".armory/install-id.txt", "fixed-id-123\n");

    fixture.run().assert().success();

    let lines = fixture.telemetry_lines();
    let event: serde_json::Value =
        serde_json::from_str(lines[0].split_once(' ').unwrap().1).unwrap();
    assert_eq!(event["installId"], "fixed-id-123");
}

#[test]
fn test_installer_aborts_on_checksum_mismatch() {
    require_bash!();
    let fixture = InstallerFixture::new();
    write(&fixture.served.join("tools/remedy/remedy.py"), "tampered\n");

    fixture
        .run()
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Hash mismatch for tools/remedy/remedy.py",
        ))
        .stdout(predicate::str::contains(SAGA_HEADING).not());
    assert!(fixture.telemetry_lines().is_empty());
}

#[test]
fn test_installer_fails_when_download_fails() {
    require_bash!();
    let fixture = InstallerFixture::new();
    std::fs::remove_file(fixture.served.join("summons/scout/scout.py")).unwrap();

    fixture.run().assert().failure();
    assert!(fixture.telemetry_lines().is_empty());
}

#[test]
fn test_installer_install_root_flag() {
    require_bash!();
    let fixture = InstallerFixture::new();
    let target = fixture.workspace.temp.path().join("elsewhere");

    fixture
        .run()
        .arg("--install-root")
        .arg(&target)
        .assert()
        .success();
    assert!(target.join("tools/remedy/remedy.py").is_file());
    assert!(!fixture.workspace.file_exists("armory-loadout"));
}

#[test]
fn test_installer_telemetry_opt_outs() {
    require_bash!();
    let fixture = InstallerFixture::new();

    fixture.run().arg("--no-telemetry").assert().success();
    assert!(fixture.telemetry_lines().is_empty());

    fixture
        .run()
        .env("ARMORY_TELEMETRY", " OFF ")
        .assert()
        .success();
    assert!(fixture.telemetry_lines().is_empty());
    assert!(!fixture.workspace.home_file_exists(".armory/install-id.txt"));
}

#[test]
fn test_installer_mode_flags() {
    require_bash!();
    let fixture = InstallerFixture::new();

    fixture
        .run()
        .arg("--civ")
        .assert()
        .success()
        .stdout(predicate::str::contains(CIV_HEADING))
        .stdout(predicate::str::contains("Installed: chronicle, remedy, scout"));

    fixture
        .run()
        .arg("--mode=CIV")
        .assert()
        .success()
        .stdout(predicate::str::contains(CIV_HEADING));

    // Flags outrank every configuration layer
    fixture.workspace.write_home_file(".armory/config.json", r#"{"mode": "civ"}"#);
    fixture
        .run()
        .args(["--mode", "saga"])
        .assert()
        .success()
        .stdout(predicate::str::contains(SAGA_HEADING));

    fixture
        .run()
        .args(["--mode", "lore"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid mode"));
}

#[test]
fn test_installer_mode_from_user_config() {
    require_bash!();
    let fixture = InstallerFixture::new();

    fixture
        .workspace
        .write_home_file(".armory/config.json", r#"{"civilianAliases": true}"#);
    fixture
        .run()
        .assert()
        .success()
        .stdout(predicate::str::contains(CIV_HEADING));

    // An explicit mode outranks civilianAliases and the project file
    fixture.workspace.write_home_file(
        ".armory/config.json",
        r#"{"mode": "crystal", "civilianAliases": true}"#,
    );
    fixture.workspace.write_file(".sovereign.json", r#"{"mode": "civ"}"#);
    fixture
        .run()
        .assert()
        .success()
        .stdout(predicate::str::contains(SAGA_HEADING));
    assert!(fixture.telemetry_lines().last().unwrap().contains(r#""mode":"saga""#));
}

#[test]
fn test_installer_mode_from_project_and_environment() {
    require_bash!();
    let fixture = InstallerFixture::new();

    fixture
        .run()
        .env("ARMORY_MODE", "civ")
        .assert()
        .success()
        .stdout(predicate::str::contains(CIV_HEADING));

    fixture
        .run()
        .env("SOVEREIGN_MODE", " Civ ")
        .assert()
        .success()
        .stdout(predicate::str::contains(CIV_HEADING));

    // Environment can only select civ
    fixture
        .run()
        .env("ARMORY_MODE", "saga")
        .assert()
        .success()
        .stdout(predicate::str::contains(SAGA_HEADING));

    // The project file outranks the environment
    fixture.workspace.write_file(".sovereign.json", r#"{"mode": "saga"}"#);
    fixture
        .run()
        .env("ARMORY_MODE", "civ")
        .assert()
        .success()
        .stdout(predicate::str::contains(SAGA_HEADING));

    fixture.workspace.write_file(".sovereign.json", r#"{"mode": "civ"}"#);
    fixture
        .run()
        .assert()
        .success()
        .stdout(predicate::str::contains(CIV_HEADING));
}

/// `Set-Content -Encoding UTF8` on Windows PowerShell writes a byte order mark
const BOM_CIV_CONFIG: &str = "\u{feff}{\"mode\": \"civ\"}";

#[test]
fn test_installer_reads_config_with_byte_order_mark() {
    require_bash!();
    let fixture = InstallerFixture::new();
    fixture
        .workspace
        .write_home_file(".armory/config.json", BOM_CIV_CONFIG);

    fixture
        .run()
        .assert()
        .success()
        .stdout(predicate::str::contains(CIV_HEADING));
}

#[test]
fn test_installer_python_config_reader() {
    require_bash!();
    if !tool_available("python3") {
        eprintln!("python3 not available; skipping");
        return;
    }
    let fixture = InstallerFixture::new();
    fixture
        .workspace
        .write_home_file(".armory/config.json", BOM_CIV_CONFIG);

    fixture
        .run_without(&["jq"])
        .assert()
        .success()
        .stdout(predicate::str::contains(CIV_HEADING));

    fixture.workspace.write_home_file(
        ".armory/config.json",
        r#"{"mode": 7, "civilianAliases": true}"#,
    );
    fixture
        .run_without(&["jq"])
        .assert()
        .success()
        .stdout(predicate::str::contains(CIV_HEADING));
}

#[test]
fn test_installer_sed_config_reader() {
    require_bash!();
    let fixture = InstallerFixture::new();
    let hidden = ["jq", "python3"];
    fixture
        .workspace
        .write_home_file(".armory/config.json", BOM_CIV_CONFIG);

    fixture
        .run_without(&hidden)
        .assert()
        .success()
        .stdout(predicate::str::contains(CIV_HEADING));

    fixture.workspace.write_home_file(
        ".armory/config.json",
        "{\n  \"civilianAliases\": false,\n  \"mode\": \"Saga\"\n}\n",
    );
    fixture.workspace.write_file(".sovereign.json", r#"{"mode": "civ"}"#);
    fixture
        .run_without(&hidden)
        .assert()
        .success()
        .stdout(predicate::str::contains(SAGA_HEADING));
}

#[test]
fn test_installer_ignores_malformed_config() {
    require_bash!();
    let fixture = InstallerFixture::new();
    fixture.workspace.write_home_file(".armory/config.json", "{ not json");
    fixture
        .workspace
        .write_file(".sovereign.json", r#"{"mode": "civ"}"#);

    fixture
        .run()
        .assert()
        .success()
        .stdout(predicate::str::contains(CIV_HEADING));
}

#[test]
fn test_installer_rejects_unknown_argument() {
    require_bash!();
    let fixture = InstallerFixture::new();
    fixture
        .run()
        .arg("--bogus")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown argument: --bogus"));
    assert!(!fixture.workspace.file_exists("armory-loadout"));
}
