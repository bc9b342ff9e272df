//! Dependency resolution for the cart
//!
//! This module turns the operator's explicit selection (the [`Cart`]) into the
//! dependency-closed loadout that is actually installed:
//!
//! - [`cart`]: ordered, duplicate-free set of selected tool ids
//! - [`closure`]: breadth-first transitive closure over `install.dependencies`
//! - [`diagnose`]: dangling-reference and cycle report used by `armory manifest check`
//!
//! Resolution itself never fails. Missing dependency ids are skipped and cycles
//! terminate naturally because every id is enqueued at most once.

pub mod cart;
pub mod closure;
pub mod diagnose;

pub use cart::Cart;
pub use closure::{auto_added, resolve};
pub use diagnose::{GraphReport, diagnose};
