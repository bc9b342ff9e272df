//! Manifest command implementation
//!
//! - `build`: catalog JSON to manifest, filling repo/ref/time from git
//! - `check`: load, validate and report dangling dependencies and cycles

use std::path::PathBuf;

use console::Style;

use crate::cli::{ManifestArgs, ManifestBuildArgs, ManifestCheckArgs, ManifestSubcommand};
use crate::config::write_atomic;
use crate::error::{Result, manifest as manifest_err};
use crate::manifest::build::{self, BuildOptions, DEFAULT_CATALOG_PATH};
use crate::manifest::load::{self, DEFAULT_MANIFEST_PATH};
use crate::resolver::diagnose::format_cycle;
use crate::resolver::{GraphReport, diagnose};

/// Run manifest command
pub fn run(manifest_source: &str, args: ManifestArgs) -> Result<()> {
    match args.command {
        ManifestSubcommand::Build(build_args) => run_build(manifest_source, build_args),
        ManifestSubcommand::Check(check_args) => run_check(manifest_source, &check_args),
    }
}

fn run_build(manifest_source: &str, args: ManifestBuildArgs) -> Result<()> {
    let catalog = args
        .catalog
        .unwrap_or_else(|| args.root.join(DEFAULT_CATALOG_PATH));

    let out = match args.out {
        Some(out) => out,
        None if load::is_url(manifest_source) => args.root.join(DEFAULT_MANIFEST_PATH),
        None => PathBuf::from(manifest_source),
    };

    let options = BuildOptions {
        catalog,
        root: args.root,
        repo: args.repo,
        git_ref: args.git_ref,
        generated_at: args.generated_at,
    };

    let (json, entries) = build::run(&options, console::user_attended_stderr())?;
    write_atomic(&out, &json)?;

    println!(
        "{} {} ({} entries)",
        Style::new().green().bold().apply_to("OK wrote manifest:"),
        out.display(),
        entries
    );
    Ok(())
}

fn run_check(manifest_source: &str, args: &ManifestCheckArgs) -> Result<()> {
    let manifest = load::load(manifest_source)?;
    let report = diagnose(&manifest.entries);

    println!(
        "{} {} entries, repo {} at {}",
        Style::new().green().bold().apply_to("Manifest valid:"),
        manifest.entries.len(),
        manifest.repo,
        manifest.git_ref
    );
    let unique = manifest.index().len();
    if unique < manifest.entries.len() {
        println!(
            "{} duplicate id(s); later entries win",
            manifest.entries.len() - unique
        );
    }
    print!("{}", render_report(&report));

    if args.strict && !report.is_clean() {
        return Err(manifest_err::invalid(format!(
            "{} dependency graph problem(s)",
            report.dangling.len() + report.cycles.len()
        )));
    }
    Ok(())
}

fn render_report(report: &GraphReport) -> String {
    if report.is_clean() {
        return "No dangling dependencies or cycles.\n".to_string();
    }

    let mut out = String::new();
    if !report.dangling.is_empty() {
        out.push_str(&format!(
            "{}\n",
            Style::new().yellow().bold().apply_to("Dangling dependencies:")
        ));
        for dangling in &report.dangling {
            out.push_str(&format!("  {dangling}\n"));
        }
    }
    if !report.cycles.is_empty() {
        out.push_str(&format!(
            "{}\n",
            Style::new().yellow().bold().apply_to("Dependency cycles:")
        ));
        for cycle in &report.cycles {
            out.push_str(&format!("  {}\n", format_cycle(cycle)));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::test_support::entry;

    #[test]
    fn test_render_clean_report() {
        let report = diagnose(&[entry("remedy", &[])]);
        assert_eq!(render_report(&report), "No dangling dependencies or cycles.\n");
    }

    #[test]
    fn test_render_problems() {
        let report = diagnose(&[
            entry("a", &["b", "ghost"]),
            entry("b", &["a"]),
        ]);
        let text = console::strip_ansi_codes(&render_report(&report)).into_owned();
        assert!(text.contains("Dangling dependencies:\n  'a' depends on unknown 'ghost'"));
        assert!(text.contains("Dependency cycles:\n  a -> b -> a"));
    }
}
