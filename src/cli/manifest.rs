use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Arguments for manifest command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Rebuild from shop/catalog.json using git metadata:\n    armory manifest build\n\n\
                  Build outside a checkout:\n    armory manifest build --repo owner/armory --ref main --generated-at 2026-01-01T00:00:00Z\n\n\
                  Fail on dangling dependencies or cycles:\n    armory manifest check --strict")]
pub struct ManifestArgs {
    #[command(subcommand)]
    pub command: ManifestSubcommand,
}

/// Manifest subcommands
#[derive(Subcommand, Debug)]
pub enum ManifestSubcommand {
    /// Build the manifest from a catalog
    Build(ManifestBuildArgs),

    /// Validate the manifest and report dependency graph problems
    Check(ManifestCheckArgs),
}

/// Arguments for manifest build
#[derive(Parser, Debug)]
pub struct ManifestBuildArgs {
    /// Catalog JSON (default: <root>/shop/catalog.json)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Output path (default: the global --manifest path)
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,

    /// GitHub slug owner/name (default: from remote.origin.url)
    #[arg(long)]
    pub repo: Option<String>,

    /// Ref for raw URLs (default: HEAD commit id)
    #[arg(long = "ref")]
    pub git_ref: Option<String>,

    /// Generation timestamp (default: HEAD commit time)
    #[arg(long)]
    pub generated_at: Option<String>,

    /// Repository root bundle paths are relative to
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

/// Arguments for manifest check
#[derive(Parser, Debug)]
pub struct ManifestCheckArgs {
    /// Exit non-zero when diagnostics are found
    #[arg(long)]
    pub strict: bool,
}
