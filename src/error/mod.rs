//! Error types and handling for Armory
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`manifest`]: Manifest and catalog errors
//! - [`cart`]: Cart, loadout and checkout errors
//! - [`config`]: Configuration errors
//! - [`fs`]: File system errors
//! - [`git`]: Git operation errors

pub mod cart;
pub mod config;
pub mod fs;
pub mod git;
pub mod manifest;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for Armory operations
#[derive(Error, Diagnostic, Debug)]
pub enum ArmoryError {
    // Manifest errors
    #[error("Failed to load manifest from {source_path}: {reason}")]
    #[diagnostic(
        code(armory::manifest::load_failed),
        help("Pass --manifest <PATH|URL> or set ARMORY_MANIFEST to point at armory-manifest.v1.json")
    )]
    ManifestLoadFailed { source_path: String, reason: String },

    #[error("Manifest invalid: {message}")]
    #[diagnostic(
        code(armory::manifest::invalid),
        help("Rebuild the manifest with 'armory manifest build' or fix the offending field")
    )]
    ManifestInvalid { message: String },

    #[error("Catalog invalid: {path}: {reason}")]
    #[diagnostic(code(armory::manifest::catalog_invalid))]
    CatalogInvalid { path: String, reason: String },

    // Cart errors
    #[error("Tool '{id}' not found in manifest")]
    #[diagnostic(
        code(armory::cart::tool_not_found),
        help("Run 'armory catalog' to list available tool ids")
    )]
    ToolNotFound { id: String },

    #[error("Tool '{id}' is not installable (status: {status})")]
    #[diagnostic(
        code(armory::cart::not_installable),
        help("Only entries with status 'active' can be added to the cart")
    )]
    ToolNotInstallable { id: String, status: String },

    #[error("Cart is empty")]
    #[diagnostic(
        code(armory::cart::empty),
        help("Pass tool ids to select, e.g. 'armory checkout remedy chronicle'")
    )]
    EmptyCart,

    #[error("Loadout is empty")]
    #[diagnostic(code(armory::cart::empty_loadout))]
    EmptyLoadout,

    #[error("Loadout not approved")]
    #[diagnostic(
        code(armory::cart::approval_required),
        help("Review the loadout, then re-run with --yes to approve it")
    )]
    ApprovalRequired,

    // Configuration errors
    #[error("Invalid mode: {value}")]
    #[diagnostic(
        code(armory::config::invalid_mode),
        help("Valid modes: saga, civ (aliases for saga: lore, crystal)")
    )]
    InvalidMode { value: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(armory::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(armory::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Could not determine home directory")]
    #[diagnostic(code(armory::config::no_home))]
    HomeDirUnavailable,

    // File system errors
    #[error("File not found: {path}")]
    #[diagnostic(code(armory::fs::not_found))]
    FileNotFound { path: String },

    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(armory::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(armory::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(armory::fs::io_error))]
    IoError { message: String },

    // Git errors
    #[error("Git operation failed: {message}")]
    #[diagnostic(
        code(armory::git::operation_failed),
        help("Pass --repo, --ref and --generated-at explicitly when building outside a git checkout")
    )]
    GitOperationFailed { message: String },

    // Prompt errors
    #[error("Prompt failed: {message}")]
    #[diagnostic(code(armory::ui::prompt_failed))]
    PromptFailed { message: String },
}

impl From<std::io::Error> for ArmoryError {
    fn from(err: std::io::Error) -> Self {
        ArmoryError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ArmoryError {
    fn from(err: serde_json::Error) -> Self {
        ArmoryError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<git2::Error> for ArmoryError {
    fn from(err: git2::Error) -> Self {
        ArmoryError::GitOperationFailed {
            message: err.message().to_string(),
        }
    }
}

impl From<inquire::InquireError> for ArmoryError {
    fn from(err: inquire::InquireError) -> Self {
        ArmoryError::PromptFailed {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, ArmoryError>;
