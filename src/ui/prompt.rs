//! Interactive prompts

use std::fmt;
use std::io::IsTerminal;

use inquire::{Confirm, MultiSelect};

use crate::error::Result;
use crate::manifest::ToolEntry;
use crate::mode::Mode;

/// Whether prompts can be shown (stdin and stderr are terminals)
pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal() && console::user_attended_stderr()
}

struct ToolChoice {
    id: String,
    label: String,
}

impl fmt::Display for ToolChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Let the user pick tools from the installable entries
///
/// Returns the chosen ids in catalog order; an empty list when cancelled.
pub fn select_tools(entries: &[&ToolEntry], mode: Mode) -> Result<Vec<String>> {
    let choices: Vec<ToolChoice> = entries
        .iter()
        .filter(|e| e.is_active())
        .map(|e| ToolChoice {
            id: e.id.clone(),
            label: format!("{} - {}", e.display_name(mode), e.display_description(mode)),
        })
        .collect();

    if choices.is_empty() {
        return Ok(Vec::new());
    }

    let selection = MultiSelect::new(mode.tone().cart_hint, choices)
        .with_page_size(10)
        .with_help_message("↑↓ to move, SPACE to select, ENTER to confirm, ESC to cancel")
        .prompt_skippable()?;

    Ok(selection
        .unwrap_or_default()
        .into_iter()
        .map(|choice| choice.id)
        .collect())
}

/// Offer to drop selected tools before approval
///
/// Returns the ids marked for removal; an empty list when skipped.
pub fn remove_tools(cart: &[&ToolEntry], mode: Mode) -> Result<Vec<String>> {
    if cart.is_empty() {
        return Ok(Vec::new());
    }

    let choices: Vec<ToolChoice> = cart
        .iter()
        .map(|e| ToolChoice {
            id: e.id.clone(),
            label: format!("{} ({})", e.display_name(mode), e.id),
        })
        .collect();

    let selection = MultiSelect::new("Remove anything before approval?", choices)
        .with_help_message("SPACE to mark for removal, ENTER to continue, ESC to keep all")
        .prompt_skippable()?;

    Ok(selection
        .unwrap_or_default()
        .into_iter()
        .map(|choice| choice.id)
        .collect())
}

/// Ask for approval of the loadout; cancelling counts as a refusal
pub fn confirm_loadout() -> Result<bool> {
    let approved = Confirm::new("Approve this loadout and write the installer?")
        .with_default(false)
        .prompt_skippable()?;
    Ok(approved.unwrap_or(false))
}
