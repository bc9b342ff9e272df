//! PowerShell backend
//!
//! Works on Windows PowerShell 5.1 and PowerShell 7. The script is an advanced script
//! (`[CmdletBinding()]`), so unknown parameters are rejected by the engine.

use super::dialect::{DialectKind, ScriptDialect};
use super::{ScriptData, Statement};
use crate::mode::Mode;
use crate::telemetry::INSTALL_COMPLETED;

#[derive(Debug, Clone, Copy, Default)]
pub struct PowerShellDialect;

/// Characters PowerShell treats as a single quote inside single-quoted strings
const SINGLE_QUOTES: [char; 5] = ['\'', '\u{2018}', '\u{2019}', '\u{201A}', '\u{201B}'];

/// Quote `value` as a PowerShell verbatim (single-quoted) string
///
/// Inside such a string only quote characters are special, and a doubled quote stands
/// for one literal quote.
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        if SINGLE_QUOTES.contains(&c) {
            quoted.push(c);
        }
        quoted.push(c);
    }
    quoted.push('\'');
    quoted
}

const PARAMETERS: &str = r##"[CmdletBinding()]
param(
  [ValidateSet('saga', 'civ')]
  [string]$Mode,
  [switch]$Civ,
  [switch]$Saga,
  [switch]$NoTelemetry,
  [string]$InstallRoot = (Join-Path $PWD 'armory-loadout')
)

$ErrorActionPreference = 'Stop'
$ProgressPreference = 'SilentlyContinue'"##;

const RESOLVE_MODE: &str = r##"function ConvertTo-ArmoryMode($Raw) {
  if ($Raw -isnot [string]) { return $null }
  $value = $Raw.Trim().ToLowerInvariant()
  if ($value -ceq 'civ') { return 'civ' }
  if (@('saga', 'lore', 'crystal') -ccontains $value) { return 'saga' }
  return $null
}

function Read-ArmoryConfig([string]$Path) {
  if (-not (Test-Path -LiteralPath $Path -PathType Leaf)) { return $null }
  try {
    return (Get-Content -LiteralPath $Path -Raw | ConvertFrom-Json)
  } catch {
    return $null
  }
}

function Get-ArmoryConfigField($Config, [string]$Name) {
  if ($Config -isnot [System.Management.Automation.PSCustomObject]) { return $null }
  $property = $Config.PSObject.Properties | Where-Object { $_.Name -ceq $Name } | Select-Object -First 1
  if ($null -eq $property) { return $null }
  return $property.Value
}

function Resolve-ArmoryMode {
  if ($Civ) { return 'civ' }
  if ($Saga) { return 'saga' }
  if ($Mode) { return $Mode.ToLowerInvariant() }

  $userConfig = Read-ArmoryConfig (Join-Path $HOME (Join-Path '.armory' 'config.json'))
  $candidate = ConvertTo-ArmoryMode (Get-ArmoryConfigField $userConfig 'mode')
  if ($candidate) { return $candidate }
  $aliases = Get-ArmoryConfigField $userConfig 'civilianAliases'
  if ($aliases -is [bool] -and $aliases) { return 'civ' }

  $projectConfig = Read-ArmoryConfig (Join-Path $PWD '.sovereign.json')
  $candidate = ConvertTo-ArmoryMode (Get-ArmoryConfigField $projectConfig 'mode')
  if ($candidate) { return $candidate }

  if ((ConvertTo-ArmoryMode $env:ARMORY_MODE) -ceq 'civ' -or (ConvertTo-ArmoryMode $env:SOVEREIGN_MODE) -ceq 'civ') {
    return 'civ'
  }

  return $defaultMode
}

$resolvedMode = Resolve-ArmoryMode"##;

const VERIFY_CHECKSUM: &str = r##"function Get-ArmorySha256([string]$Path) {
  return (Get-FileHash -LiteralPath $Path -Algorithm SHA256).Hash.ToLowerInvariant()
}

# Aborts the whole install when a declared checksum does not match.
function Assert-ArmoryChecksum([string]$Path, [string]$Destination, [string]$Expected) {
  if (-not $Expected) { return }
  $actual = Get-ArmorySha256 $Destination
  if ($actual -cne $Expected) {
    [Console]::Error.WriteLine("Hash mismatch for $Path")
    exit 1
  }
}"##;

const DOWNLOAD_LOOP: &str = r##"foreach ($bundle in $bundles) {
  $dest = Join-Path $InstallRoot $bundle.path
  New-Item -ItemType Directory -Path (Split-Path $dest -Parent) -Force | Out-Null
  Invoke-WebRequest -Uri $bundle.url -OutFile $dest -UseBasicParsing
  Assert-ArmoryChecksum -Path $bundle.path -Destination $dest -Expected $bundle.sha256
}"##;

const EMIT_TELEMETRY: &str = r##"function Send-ArmoryTelemetry([string]$EventName, [string]$ResolvedMode) {
  if ($NoTelemetry) { return }
  if ("$env:ARMORY_TELEMETRY".Trim().ToLowerInvariant() -ceq 'off') { return }
  if (-not $eventsUrl) { return }

  $installIdFile = Join-Path $HOME (Join-Path '.armory' 'install-id.txt')
  $installId = ''
  if (Test-Path -LiteralPath $installIdFile -PathType Leaf) {
    $installId = "$(Get-Content -LiteralPath $installIdFile -Raw)" -replace '[^A-Za-z0-9-]', ''
  }
  if (-not $installId) {
    $installId = [guid]::NewGuid().ToString()
    try {
      New-Item -ItemType Directory -Path (Split-Path $installIdFile -Parent) -Force | Out-Null
      Set-Content -LiteralPath $installIdFile -Value $installId -Encoding Ascii
    } catch {}
  }

  $payload = [ordered]@{
    eventName = $EventName
    installId = $installId
    sessionId = [guid]::NewGuid().ToString()
    source = 'installer'
    toolIds = @($toolIds)
    mode = $ResolvedMode
    manifestRef = $manifestRef
    timestamp = (Get-Date).ToUniversalTime().ToString('s') + 'Z'
  } | ConvertTo-Json -Depth 4 -Compress

  Invoke-RestMethod -Uri $eventsUrl -Method Post -ContentType 'application/json' -Body $payload -TimeoutSec 5 | Out-Null
}"##;

impl PowerShellDialect {
    fn array(&self, values: &[String]) -> String {
        if values.is_empty() {
            return "@()".to_string();
        }
        let items: Vec<String> = values.iter().map(|value| self.quote(value)).collect();
        format!("@({})", items.join(", "))
    }

    fn prelude(&self, data: &ScriptData) -> String {
        [
            self.comment("Armory one-shot installer"),
            self.comment(&format!(
                "Generated from manifest {} ({}@{})",
                data.generated_at, data.repo, data.git_ref
            )),
            String::new(),
            PARAMETERS.to_string(),
        ]
        .join("\n")
    }

    fn declare_data(&self, data: &ScriptData) -> String {
        let mut lines = vec!["$bundles = @(".to_string()];
        for bundle in &data.bundles {
            lines.push(format!(
                "  [pscustomobject]@{{ toolId = {}; path = {}; url = {}; sha256 = {} }}",
                self.quote(&bundle.tool_id),
                self.quote(&bundle.path),
                self.quote(&bundle.url),
                self.quote(&bundle.sha256),
            ));
        }
        lines.push(")".to_string());
        lines.push(format!("$toolIds = {}", self.array(&data.tool_ids)));
        lines.push(format!(
            "$sortedToolIds = {}",
            self.array(&data.sorted_tool_ids)
        ));
        lines.push(format!("$manifestRef = {}", self.quote(&data.git_ref)));
        lines.push(format!(
            "$eventsUrl = {}",
            self.quote(data.events_url.as_deref().unwrap_or_default())
        ));
        lines.push(format!(
            "$defaultMode = {}",
            self.quote(data.default_mode.as_str())
        ));
        lines.join("\n")
    }

    fn emit_telemetry(&self) -> String {
        format!(
            "{EMIT_TELEMETRY}\n\ntry {{\n  Send-ArmoryTelemetry -EventName {} -ResolvedMode $resolvedMode\n}} catch {{\n}}",
            self.quote(INSTALL_COMPLETED)
        )
    }

    fn print_summary(&self) -> String {
        let civ = Mode::Civ.tone();
        let saga = Mode::Saga.tone();
        format!(
            r#"$summaryIds = @($sortedToolIds) -join ', '
if ($resolvedMode -ceq 'civ') {{
  Write-Host {civ_heading} -ForegroundColor Green
  Write-Host ({civ_label} + $summaryIds) -ForegroundColor Gray
}} else {{
  Write-Host {saga_heading} -ForegroundColor Green
  Write-Host ({saga_label} + $summaryIds) -ForegroundColor Gray
}}"#,
            civ_heading = self.quote(civ.summary_heading),
            civ_label = self.quote(&format!("{}: ", civ.summary_label)),
            saga_heading = self.quote(saga.summary_heading),
            saga_label = self.quote(&format!("{}: ", saga.summary_label)),
        )
    }
}

impl ScriptDialect for PowerShellDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::PowerShell
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
