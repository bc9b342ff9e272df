//! Config command implementation

use console::Style;
use serde_json::Value;

use crate::cli::config::ModePreviewArgs;
use crate::cli::{ConfigArgs, ConfigSubcommand, TelemetrySwitch};
use crate::config::{PROJECT_CONFIG_FILE, UserConfig, project};
use crate::error::Result;
use crate::mode::{
    InstallerModeInputs, LEGACY_MODE_ENV, MODE_ENV, Mode, ModeSource, resolve_installer_mode,
};
use crate::telemetry::TELEMETRY_ENV;

use super::helpers::{UserContext, current_dir};

/// Run config command
pub fn run(args: ConfigArgs) -> Result<()> {
    let user = UserContext::load();
    match args.command {
        ConfigSubcommand::Show => show(&user),
        ConfigSubcommand::SetMode { mode } => set_mode(&user, mode),
        ConfigSubcommand::Telemetry { state } => set_telemetry(&user, state),
        ConfigSubcommand::Mode(preview) => preview_mode(&user, &preview),
    }
}

fn label(text: &str) -> console::StyledObject<&str> {
    Style::new().bold().apply_to(text)
}

fn show(user: &UserContext) -> Result<()> {
    let paths = user.require_paths()?;
    let config = UserConfig::load(&paths.user_config());

    println!("{} {}", label("Directory:"), paths.root().display());
    println!("{} {}", label("Config:"), config.path().display());
    match config.as_value() {
        Some(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        None => println!("  (not created)"),
    }
    println!("  commandWord: {}", config.command_word());
    println!("  installDir: {}", config.install_dir());
    println!("  civilianAliases: {}", config.civilian_aliases());
    if let Some(root) = config.repo_root() {
        println!("  repoRoot: {root}");
    }

    println!();
    println!("{} {}", label("Preferences:"), paths.preferences().display());
    match user.preferences.stored_mode() {
        Some(mode) => println!("  mode: {mode}"),
        None => println!("  mode: {} (default)", user.mode(None)),
    }
    println!(
        "  telemetry: {}",
        if user.preferences.telemetry_opt_out {
            "off"
        } else {
            "on"
        }
    );
    if user.telemetry_gate(false).env_opt_out() {
        println!("  ({TELEMETRY_ENV}=off is set in this environment)");
    }

    let cwd = current_dir()?;
    let project_config = project::load(&cwd);
    println!();
    println!(
        "{} {}",
        label("Project:"),
        cwd.join(PROJECT_CONFIG_FILE).display()
    );
    match project_config {
        Some(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        None => println!("  (none)"),
    }
    Ok(())
}

fn set_mode(user: &UserContext, mode: Mode) -> Result<()> {
    let paths = user.require_paths()?;

    let mut config = UserConfig::load_for_update(&paths.user_config())?;
    config.set_mode(mode);
    config.save()?;

    user.preferences
        .clone()
        .with_mode(mode)
        .save(&paths.preferences())?;

    println!(
        "{} {} ({})",
        Style::new().green().bold().apply_to("Mode set to"),
        mode,
        mode.tone().title
    );
    Ok(())
}

fn set_telemetry(user: &UserContext, state: TelemetrySwitch) -> Result<()> {
    let paths = user.require_paths()?;
    let opt_out = state == TelemetrySwitch::Off;

    user.preferences
        .clone()
        .with_telemetry_opt_out(opt_out)
        .save(&paths.preferences())?;

    println!(
        "{} {}",
        Style::new().green().bold().apply_to("Telemetry"),
        if opt_out { "off" } else { "on" }
    );
    Ok(())
}

fn preview_mode(user: &UserContext, preview: &ModePreviewArgs) -> Result<()> {
    let user_config: Option<Value> = user
        .paths
        .as_ref()
        .and_then(|p| UserConfig::load(&p.user_config()).as_value());
    let project_config = project::load(&current_dir()?);
    let env_mode = std::env::var(MODE_ENV).ok();
    let env_legacy_mode = std::env::var(LEGACY_MODE_ENV).ok();

    let inputs = InstallerModeInputs {
        civ_flag: preview.civ,
        saga_flag: preview.saga,
        mode_arg: preview.mode,
        user_config: user_config.as_ref(),
        project_config: project_config.as_ref(),
        env_mode: env_mode.as_deref(),
        env_legacy_mode: env_legacy_mode.as_deref(),
        default_mode: preview.default,
    };
    let (mode, source) = resolve_installer_mode(&inputs);

    println!("{mode}");
    println!("{} {}", label("Decided by:"), source);
    if source == ModeSource::Default {
        println!("  No flag, config or environment selected a mode.");
    }
    Ok(())
}
