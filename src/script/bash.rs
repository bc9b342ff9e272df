//! Bash backend
//!
//! Targets bash 3.2 and later (macOS ships 3.2), so the script avoids `${var,,}`,
//! associative arrays and `mapfile`. External tools are probed at run time:
//! `jq`, then `python3`, then `sed`/`grep` for JSON; `curl`, then `wget` for downloads;
//! `sha256sum`, then `shasum`, then `openssl` for digests.

use super::dialect::{DialectKind, ScriptDialect};
use super::{ScriptData, Statement};
use crate::telemetry::INSTALL_COMPLETED;

#[derive(Debug, Clone, Copy, Default)]
pub struct BashDialect;

/// Quote `value` as a bash single-quoted word
///
/// Nothing is special inside single quotes except the quote itself, which is written
/// as close-quote, escaped quote, reopen.
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

const ARGUMENTS: &str = r##"FLAG_CIV=0
FLAG_SAGA=0
ARG_MODE=''
NO_TELEMETRY=0
INSTALL_ROOT="$PWD/armory-loadout"

armory_usage() {
  cat <<'USAGE'
Usage: armory-loadout-installer.sh [options]

Options:
  --mode saga|civ      Force the display mode
  --civ                Shorthand for --mode civ
  --saga               Shorthand for --mode saga
  --no-telemetry       Do not report the install
  --install-root DIR   Install under DIR (default: ./armory-loadout)
  -h, --help           Show this help
USAGE
}

while [ "$#" -gt 0 ]; do
  case "$1" in
    --civ) FLAG_CIV=1 ;;
    --saga) FLAG_SAGA=1 ;;
    --no-telemetry) NO_TELEMETRY=1 ;;
    --mode)
      if [ "$#" -lt 2 ]; then
        echo "Missing value for --mode" >&2
        exit 2
      fi
      ARG_MODE="$2"
      shift
      ;;
    --mode=*) ARG_MODE="${1#--mode=}" ;;
    --install-root)
      if [ "$#" -lt 2 ]; then
        echo "Missing value for --install-root" >&2
        exit 2
      fi
      INSTALL_ROOT="$2"
      shift
      ;;
    --install-root=*) INSTALL_ROOT="${1#--install-root=}" ;;
    -h | --help)
      armory_usage
      exit 0
      ;;
    *)
      echo "Unknown argument: $1" >&2
      armory_usage >&2
      exit 2
      ;;
  esac
  shift
done

if [ -n "$ARG_MODE" ]; then
  ARG_MODE="$(printf '%s' "$ARG_MODE" | tr '[:upper:]' '[:lower:]')"
  case "$ARG_MODE" in
    saga | civ) ;;
    *)
      echo "Invalid mode: $ARG_MODE (expected saga or civ)" >&2
      exit 2
      ;;
  esac
fi"##;

const RESOLVE_MODE: &str = r##"armory_lower_trim() {
  printf '%s' "${1:-}" | tr '[:upper:]' '[:lower:]' | sed -e 's/^[[:space:]]*//' -e 's/[[:space:]]*$//'
}

armory_normalize_mode() {
  case "$(armory_lower_trim "${1:-}")" in
    civ) printf 'civ' ;;
    saga | lore | crystal) printf 'saga' ;;
    *) ;;
  esac
}

# Prints "s:<text>" for a string field, "b:true"/"b:false" for a boolean, nothing otherwise.
armory_config_field() {
  local file="$1" key="$2" flat
  if [ ! -f "$file" ]; then
    return 0
  fi

  if command -v jq >/dev/null 2>&1; then
    jq -r --arg k "$key" \
      'if type == "object" and has($k) then (.[$k] | if type == "string" then "s:" + . elif type == "boolean" then "b:" + tostring else empty end) else empty end' \
      "$file" 2>/dev/null || true
  elif command -v python3 >/dev/null 2>&1; then
    python3 - "$file" "$key" <<'PY' 2>/dev/null || true
import json
import sys

try:
    with open(sys.argv[1], encoding="utf-8-sig") as handle:
        data = json.load(handle)
except Exception:
    sys.exit(0)
if isinstance(data, dict) and sys.argv[2] in data:
    value = data[sys.argv[2]]
    if isinstance(value, bool):
        print("b:" + ("true" if value else "false"))
    elif isinstance(value, str):
        print("s:" + value)
PY
  else
    flat="$(tr -d '\r\n' <"$file" 2>/dev/null || true)"
    if grep -q "\"$key\"[[:space:]]*:[[:space:]]*\"" <<<"$flat"; then
      printf 's:%s' "$(sed -n "s/.*\"$key\"[[:space:]]*:[[:space:]]*\"\([^\"]*\)\".*/\1/p" <<<"$flat")"
    elif grep -q "\"$key\"[[:space:]]*:[[:space:]]*true" <<<"$flat"; then
      printf 'b:true'
    elif grep -q "\"$key\"[[:space:]]*:[[:space:]]*false" <<<"$flat"; then
      printf 'b:false'
    fi
  fi
}

armory_config_mode() {
  local field
  field="$(armory_config_field "$1" mode)"
  case "$field" in
    s:*) armory_normalize_mode "${field#s:}" ;;
    *) ;;
  esac
}

armory_resolve_mode() {
  local user_config="${HOME:-}/.armory/config.json" candidate

  if [ "$FLAG_CIV" = 1 ]; then
    printf 'civ'
    return 0
  fi
  if [ "$FLAG_SAGA" = 1 ]; then
    printf 'saga'
    return 0
  fi
  if [ -n "$ARG_MODE" ]; then
    printf '%s' "$ARG_MODE"
    return 0
  fi

  candidate="$(armory_config_mode "$user_config")"
  if [ -n "$candidate" ]; then
    printf '%s' "$candidate"
    return 0
  fi
  if [ "$(armory_config_field "$user_config" civilianAliases)" = "b:true" ]; then
    printf 'civ'
    return 0
  fi

  candidate="$(armory_config_mode "$PWD/.sovereign.json")"
  if [ -n "$candidate" ]; then
    printf '%s' "$candidate"
    return 0
  fi

  if [ "$(armory_normalize_mode "${ARMORY_MODE:-}")" = civ ] ||
    [ "$(armory_normalize_mode "${SOVEREIGN_MODE:-}")" = civ ]; then
    printf 'civ'
    return 0
  fi

  printf '%s' "$DEFAULT_MODE"
}

RESOLVED_MODE="$(armory_resolve_mode)""##;

const VERIFY_CHECKSUM: &str = r##"armory_sha256() {
  if command -v sha256sum >/dev/null 2>&1; then
    sha256sum <"$1" | cut -d ' ' -f 1
  elif command -v shasum >/dev/null 2>&1; then
    shasum -a 256 <"$1" | cut -d ' ' -f 1
  else
    openssl dgst -sha256 <"$1" | sed 's/^.*= *//'
  fi
}

# Aborts the whole install when a declared checksum does not match.
armory_verify_bundle() {
  local path="$1" dest="$2" expected="$3" actual
  if [ -z "$expected" ]; then
    return 0
  fi
  actual="$(armory_sha256 "$dest" | tr '[:upper:]' '[:lower:]')"
  if [ "$actual" != "$expected" ]; then
    echo "Hash mismatch for $path" >&2
    exit 1
  fi
}"##;

const DOWNLOAD_LOOP: &str = r##"armory_fetch() {
  if command -v curl >/dev/null 2>&1; then
    curl -fsSL -o "$2" "$1"
  elif command -v wget >/dev/null 2>&1; then
    wget -q -O "$2" "$1"
  else
    echo "Neither curl nor wget is available" >&2
    return 1
  fi
}

for ((i = 0; i < ${#BUNDLE_PATHS[@]}; i++)); do
  bundle_path="${BUNDLE_PATHS[$i]}"
  bundle_dest="$INSTALL_ROOT/$bundle_path"
  mkdir -p "$(dirname "$bundle_dest")"
  armory_fetch "${BUNDLE_URLS[$i]}" "$bundle_dest"
  armory_verify_bundle "$bundle_path" "$bundle_dest" "${BUNDLE_SHA256[$i]}"
done"##;

const EMIT_TELEMETRY: &str = r##"armory_uuid() {
  if [ -r /proc/sys/kernel/random/uuid ]; then
    cat /proc/sys/kernel/random/uuid
  elif command -v uuidgen >/dev/null 2>&1; then
    uuidgen | tr '[:upper:]' '[:lower:]'
  else
    od -An -N16 -tx1 /dev/urandom | tr -d ' \n' |
      sed 's/^\(.\{8\}\)\(.\{4\}\)\(.\{4\}\)\(.\{4\}\)\(.\{12\}\).*$/\1-\2-\3-\4-\5/'
  fi
}

armory_emit_telemetry() {
  local event_name="$1" resolved_mode="$2" id_file install_id="" session_id timestamp payload

  if [ "$NO_TELEMETRY" = 1 ]; then
    return 0
  fi
  if [ "$(armory_lower_trim "${ARMORY_TELEMETRY:-}")" = off ]; then
    return 0
  fi
  if [ -z "$ARMORY_EVENTS_URL" ]; then
    return 0
  fi
  if ! command -v curl >/dev/null 2>&1; then
    return 0
  fi

  id_file="${HOME:-.}/.armory/install-id.txt"
  if [ -f "$id_file" ]; then
    install_id="$(tr -cd 'A-Za-z0-9-' <"$id_file" 2>/dev/null || true)"
  fi
  if [ -z "$install_id" ]; then
    install_id="$(armory_uuid)"
    mkdir -p "$(dirname "$id_file")" 2>/dev/null || true
    printf '%s\n' "$install_id" >"$id_file" 2>/dev/null || true
  fi

  session_id="$(armory_uuid)"
  timestamp="$(date -u +%Y-%m-%dT%H:%M:%SZ)"
  payload="$(printf '{"eventName":"%s","installId":"%s","sessionId":"%s","source":"installer","toolIds":%s,"mode":"%s","manifestRef":%s,"timestamp":"%s"}' \
    "$event_name" "$install_id" "$session_id" "$TOOL_IDS_JSON" "$resolved_mode" "$MANIFEST_REF_JSON" "$timestamp")"

  curl -fsS --max-time 5 -X POST -H 'Content-Type: application/json' \
    --data "$payload" "$ARMORY_EVENTS_URL" >/dev/null 2>&1 || true
}"##;

impl BashDialect {
    fn array(&self, name: &str, values: &[&str]) -> String {
        if values.is_empty() {
            return format!("{name}=()");
        }
        let items: Vec<String> = values
            .iter()
            .map(|value| format!("  {}", self.quote(value)))
            .collect();
        format!("{name}=(\n{}\n)", items.join("\n"))
    }

    fn prelude(&self, data: &ScriptData) -> String {
        [
            "#!/usr/bin/env bash".to_string(),
            self.comment("Armory one-shot installer"),
            self.comment(&format!(
                "Generated from manifest {} ({}@{})",
                data.generated_at, data.repo, data.git_ref
            )),
            String::new(),
            "set -euo pipefail".to_string(),
            String::new(),
            ARGUMENTS.to_string(),
        ]
        .join("\n")
    }

    fn declare_data(&self, data: &ScriptData) -> String {
        let bundle_tool_ids: Vec<&str> = data.bundles.iter().map(|b| b.tool_id.as_str()).collect();
        let bundle_paths: Vec<&str> = data.bundles.iter().map(|b| b.path.as_str()).collect();
        let bundle_urls: Vec<&str> = data.bundles.iter().map(|b| b.url.as_str()).collect();
        let bundle_sha256: Vec<&str> = data.bundles.iter().map(|b| b.sha256.as_str()).collect();
        let tool_ids: Vec<&str> = data.tool_ids.iter().map(String::as_str).collect();
        let sorted: Vec<&str> = data.sorted_tool_ids.iter().map(String::as_str).collect();

        [
            self.array("BUNDLE_TOOL_IDS", &bundle_tool_ids),
            self.array("BUNDLE_PATHS", &bundle_paths),
            self.array("BUNDLE_URLS", &bundle_urls),
            self.array("BUNDLE_SHA256", &bundle_sha256),
            self.array("TOOL_IDS", &tool_ids),
            self.array("SORTED_TOOL_IDS", &sorted),
            format!("TOOL_IDS_JSON={}", self.quote(&data.tool_ids_json())),
            format!("MANIFEST_REF_JSON={}", self.quote(&data.manifest_ref_json())),
            format!(
                "ARMORY_EVENTS_URL={}",
                self.quote(data.events_url.as_deref().unwrap_or_default())
            ),
            format!("DEFAULT_MODE={}", self.quote(data.default_mode.as_str())),
        ]
        .join("\n")
    }

    fn emit_telemetry(&self) -> String {
        format!(
            "{EMIT_TELEMETRY}\n\narmory_emit_telemetry {} \"$RESOLVED_MODE\" || true",
            self.quote(INSTALL_COMPLETED)
        )
    }

    fn print_summary(&self) -> String {
        let civ = crate::mode::Mode::Civ.tone();
        let saga = crate::mode::Mode::Saga.tone();
        format!(
            r#"summary_ids=""
for tool_id in ${{SORTED_TOOL_IDS[@]+"${{SORTED_TOOL_IDS[@]}}"}}; do
  summary_ids="${{summary_ids:+$summary_ids, }}$tool_id"
done

if [ "$RESOLVED_MODE" = civ ]; then
  echo {civ_heading}
  echo {civ_label}"$summary_ids"
else
  echo {saga_heading}
  echo {saga_label}"$summary_ids"
fi"#,
            civ_heading = self.quote(civ.summary_heading),
            civ_label = self.quote(&format!("{}: ", civ.summary_label)),
            saga_heading = self.quote(saga.summary_heading),
            saga_label = self.quote(&format!("{}: ", saga.summary_label)),
        )
    }
}

impl ScriptDialect for BashDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::Bash
    }

    fn quote(&self, value: &str) -> String {
        quote(value)
    }

    fn render_statement(&self, statement: Statement, data: &ScriptData) -> String {
        match statement {
            Statement::Prelude => self.prelude(data),
            Statement::DeclareData => self.declare_data(data),
            Statement::ResolveMode => RESOLVE_MODE.to_string(),
            Statement::VerifyChecksum => VERIFY_CHECKSUM.to_string(),
            Statement::DownloadLoop => DOWNLOAD_LOOP.to_string(),
            Statement::EmitTelemetry => self.emit_telemetry(),
            Statement::PrintSummary => self.print_summary(),
        }
    }
}
