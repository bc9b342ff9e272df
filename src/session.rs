//! Explicitly owned selection state for one CLI session
//!
//! Each transition consumes the session and returns the next one; command handlers
//! read the current value, compute a new one and replace it.

use crate::error::{Result, cart as cart_err};
use crate::manifest::{EntryIndex, Manifest, ToolEntry};
use crate::mode::Mode;
use crate::resolver::{Cart, auto_added, resolve};

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub cart: Cart,
    pub mode: Mode,
    pub telemetry_opt_out: bool,
    pub approved: bool,
}

/// Counts shown before checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutSummary {
    pub selected: usize,
    pub loadout: usize,
    pub auto_added: usize,
}

impl std::fmt::Display for CheckoutSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Selected {}; dependencies auto-added: {}.",
            self.selected, self.auto_added
        )
    }
}

impl Session {
    /// An empty, unapproved session in the default mode
    pub fn new(telemetry_opt_out: bool) -> Self {
        Self {
            telemetry_opt_out,
            ..Self::default()
        }
    }

    /// Add a tool to the cart
    ///
    /// Unknown ids and non-active entries are rejected. Changing the cart clears a
    /// previous approval.
    pub fn with_tool(mut self, index: &EntryIndex<'_>, id: &str) -> Result<Self> {
        let entry = index.get(id).ok_or_else(|| cart_err::tool_not_found(id))?;
        if !entry.is_active() {
            return Err(cart_err::not_installable(id, entry.status.clone()));
        }
        if self.cart.insert(id) {
            self.approved = false;
        }
        Ok(self)
    }

    pub fn without_tool(mut self, id: &str) -> Self {
        if self.cart.remove(id) {
            self.approved = false;
        }
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn approved(mut self, approved: bool) -> Self {
        self.approved = approved;
        self
    }

    /// The dependency-closed loadout for the current cart
    pub fn loadout<'a>(&self, manifest: &'a Manifest) -> Vec<&'a ToolEntry> {
        resolve(&self.cart, &manifest.index())
    }

    pub fn checkout_summary(&self, loadout: &[&ToolEntry]) -> CheckoutSummary {
        CheckoutSummary {
            selected: self.cart.len(),
            loadout: loadout.len(),
            auto_added: auto_added(&self.cart, loadout),
        }
    }

    /// A script may be generated once the loadout is non-empty and approved
    pub fn can_checkout(&self, loadout: &[&ToolEntry]) -> bool {
        !loadout.is_empty() && self.approved
    }
}
