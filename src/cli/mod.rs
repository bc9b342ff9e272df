//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - catalog: Catalog listing arguments
//! - resolve: Loadout preview arguments
//! - checkout: Installer generation arguments
//! - config: Per-user configuration subcommands
//! - manifest: Manifest build and check subcommands
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};

pub mod catalog;
pub mod checkout;
pub mod completions;
pub mod config;
pub mod manifest;
pub mod resolve;

pub use catalog::CatalogArgs;
pub use checkout::CheckoutArgs;
pub use completions::CompletionsArgs;
pub use config::{ConfigArgs, ConfigSubcommand, TelemetrySwitch};
pub use manifest::{ManifestArgs, ManifestBuildArgs, ManifestCheckArgs, ManifestSubcommand};
pub use resolve::ResolveArgs;

use crate::manifest::load::DEFAULT_MANIFEST_PATH;

/// Armory - tool catalog and installer generator
///
/// Browse the Armory catalog, pick tools, and generate a one-shot installer script.
#[derive(Parser, Debug)]
#[command(
    name = "armory",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Browse the Armory catalog and generate loadout installers",
    long_about = "Armory lists the tools of an Armory manifest, resolves a selection into a \
                  dependency-closed loadout, and writes a PowerShell or Bash installer that \
                  downloads, verifies and reports it.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  armory catalog potion                     \x1b[90m# Search the catalog\x1b[0m\n   \
                  armory resolve remedy                     \x1b[90m# Preview a loadout\x1b[0m\n   \
                  armory checkout remedy --yes              \x1b[90m# Write the installer\x1b[0m\n   \
                  armory checkout remedy --dialect bash --out -  \x1b[90m# Print a Bash installer\x1b[0m\n   \
                  armory config set-mode civ                \x1b[90m# Switch to civilian wording\x1b[0m\n   \
                  armory manifest build                     \x1b[90m# Rebuild the manifest\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Manifest path or http(s) URL
    #[arg(
        long,
        short = 'm',
        global = true,
        env = "ARMORY_MANIFEST",
        default_value = DEFAULT_MANIFEST_PATH
    )]
    pub manifest: String,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List catalog entries
    Catalog(CatalogArgs),

    /// Show the loadout a selection resolves to
    Resolve(ResolveArgs),

    /// Approve a loadout and write its installer
    Checkout(CheckoutArgs),

    /// Show or change per-user configuration
    Config(ConfigArgs),

    /// Build or check the manifest
    Manifest(ManifestArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::Mode;
    use crate::script::DialectKind;
    use std::path::PathBuf;

    #[test]
    fn test_cli_parsing_catalog() {
        let cli = Cli::try_parse_from(["armory", "catalog", "potion", "--class", "item"]).unwrap();
        match cli.command {
            Commands::Catalog(args) => {
                assert_eq!(args.query.as_deref(), Some("potion"));
                assert_eq!(args.class.as_deref(), Some("item"));
                assert!(!args.json);
            }
            _ => panic!("Expected Catalog command"),
        }
    }

    #[test]
    fn test_cli_parsing_resolve_requires_ids() {
        assert!(Cli::try_parse_from(["armory", "resolve"]).is_err());

        let cli = Cli::try_parse_from(["armory", "resolve", "remedy", "chronicle", "--json"]).unwrap();
        match cli.command {
            Commands::Resolve(args) => {
                assert_eq!(args.ids, vec!["remedy", "chronicle"]);
                assert!(args.json);
            }
            _ => panic!("Expected Resolve command"),
        }
    }

    #[test]
    fn test_cli_parsing_checkout() {
        let cli = Cli::try_parse_from([
            "armory",
            "checkout",
            "remedy",
            "--dialect",
            "pwsh",
            "--out",
            "-",
            "--mode",
            "CIV",
            "--yes",
            "--no-telemetry",
        ])
        .unwrap();
        match cli.command {
            Commands::Checkout(args) => {
                assert_eq!(args.ids, vec!["remedy"]);
                assert_eq!(args.dialect, Some(DialectKind::PowerShell));
                assert_eq!(args.out.as_deref(), Some("-"));
                assert_eq!(args.mode, Some(Mode::Civ));
                assert!(args.yes);
                assert!(args.no_telemetry);
            }
            _ => panic!("Expected Checkout command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["armory", "catalog", "--mode", "bard"]).is_err());
        let cli = Cli::try_parse_from(["armory", "catalog", "--mode", "lore"]).unwrap();
        match cli.command {
            Commands::Catalog(args) => assert_eq!(args.mode, Some(Mode::Saga)),
            _ => panic!("Expected Catalog command"),
        }
    }

    #[test]
    fn test_cli_parsing_config() {
        let cli = Cli::try_parse_from(["armory", "config", "set-mode", "civ"]).unwrap();
        match cli.command {
            Commands::Config(args) => {
                assert!(matches!(args.command, ConfigSubcommand::SetMode { mode: Mode::Civ }));
            }
            _ => panic!("Expected Config command"),
        }

        let cli = Cli::try_parse_from(["armory", "config", "telemetry", "off"]).unwrap();
        match cli.command {
            Commands::Config(args) => {
                assert!(matches!(
                    args.command,
                    ConfigSubcommand::Telemetry {
                        state: TelemetrySwitch::Off
                    }
                ));
            }
            _ => panic!("Expected Config command"),
        }

        let cli = Cli::try_parse_from(["armory", "config", "mode", "--civ"]).unwrap();
        match cli.command {
            Commands::Config(args) => match args.command {
                ConfigSubcommand::Mode(preview) => assert!(preview.civ),
                _ => panic!("Expected mode preview"),
            },
            _ => panic!("Expected Config command"),
        }
    }

    #[test]
    fn test_cli_parsing_manifest_build() {
        let cli = Cli::try_parse_from([
            "armory",
            "manifest",
            "build",
            "--repo",
            "sovereign/armory",
            "--ref",
            "main",
            "--root",
            "/src/armory",
        ])
        .unwrap();
        match cli.command {
            Commands::Manifest(ManifestArgs {
                command: ManifestSubcommand::Build(args),
            }) => {
                assert_eq!(args.repo.as_deref(), Some("sovereign/armory"));
                assert_eq!(args.git_ref.as_deref(), Some("main"));
                assert_eq!(args.root, PathBuf::from("/src/armory"));
                assert!(args.catalog.is_none());
            }
            _ => panic!("Expected manifest build"),
        }
    }

    #[test]
    fn test_cli_parsing_manifest_check() {
        let cli = Cli::try_parse_from(["armory", "manifest", "check", "--strict"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Manifest(ManifestArgs {
                command: ManifestSubcommand::Check(ManifestCheckArgs { strict: true })
            })
        ));
    }

    #[test]
    fn test_cli_parsing_version() {
        let cli = Cli::try_parse_from(["armory", "version"]).unwrap();
        assert!(matches!(cli.command, Commands::Version));
    }

    #[test]
    fn test_cli_global_options() {
        let cli = Cli::try_parse_from(["armory", "-v", "-m", "https://example.com/m.json", "catalog"])
            .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.manifest, "https://example.com/m.json");
    }

    #[test]
    fn test_cli_manifest_default() {
        let cli = Cli::try_parse_from(["armory", "--manifest", DEFAULT_MANIFEST_PATH, "catalog"])
            .unwrap();
        assert_eq!(cli.manifest, "docs/data/armory-manifest.v1.json");
    }

    #[test]
    fn test_cli_parsing_completions() {
        let cli = Cli::try_parse_from(["armory", "completions", "zsh"]).unwrap();
        match cli.command {
            Commands::Completions(args) => {
                assert_eq!(args.shell, clap_complete::Shell::Zsh);
            }
            _ => panic!("Expected Completions command"),
        }
    }
}
