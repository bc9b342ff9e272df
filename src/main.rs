//! Armory - tool catalog browser and loadout installer generator
//!
//! Reads the Armory manifest, resolves a selection of tools into a dependency-closed
//! loadout, and writes a self-contained PowerShell or Bash installer for it.

use clap::Parser;
use miette::Diagnostic;

mod catalog;
mod cli;
mod commands;
mod config;
mod error;
mod git;
mod hash;
mod logging;
mod manifest;
mod mode;
mod path_utils;
mod progress;
mod resolver;
mod script;
mod session;
mod telemetry;
mod ui;

use cli::{Cli, Commands};
use error::ArmoryError;

/// `Error: <message>` plus the diagnostic help, if any
fn format_error(err: &ArmoryError) -> String {
    match err.help() {
        Some(help) => format!("Error: {err}\n  help: {help}"),
        None => format!("Error: {err}"),
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let manifest = cli.manifest;
    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(&manifest, args),
        Commands::Resolve(args) => commands::resolve::run(&manifest, args),
        Commands::Checkout(args) => commands::checkout::run(&manifest, args),
        Commands::Config(args) => commands::config::run(args),
        Commands::Manifest(args) => commands::manifest::run(&manifest, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("{}", format_error(&e));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_with_help() {
        let text = format_error(&ArmoryError::ApprovalRequired);
        assert!(text.starts_with("Error: Loadout not approved"));
        assert!(text.contains("help: Review the loadout"));
    }

    #[test]
    fn test_format_error_without_help() {
        let text = format_error(&ArmoryError::EmptyLoadout);
        assert_eq!(text, "Error: Loadout is empty");
    }
}
