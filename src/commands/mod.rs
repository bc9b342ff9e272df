//! Command implementations for Armory CLI

pub mod catalog;
pub mod checkout;
pub mod completions;
pub mod config;
pub mod helpers;
pub mod manifest;
pub mod resolve;
pub mod version;
