//! Display functions for catalog entries and loadouts
//!
//! Everything renders to a `String` so commands can choose stdout or stderr. Styling
//! goes through `console`, which drops ANSI codes when output is not a terminal.

use console::Style;

use crate::manifest::ToolEntry;
use crate::mode::Mode;
use crate::resolver::Cart;
use crate::session::CheckoutSummary;

/// Title and subtitle for the active mode
pub fn catalog_header(mode: Mode, shown: usize, total: usize) -> String {
    let tone = mode.tone();
    format!(
        "{}\n{}\n\n{} {}/{}\n",
        Style::new().bold().green().apply_to(tone.title),
        Style::new().dim().apply_to(tone.subtitle),
        Style::new().bold().apply_to("Showing"),
        shown,
        total
    )
}

/// One catalog card
pub fn entry_card(entry: &ToolEntry, mode: Mode) -> String {
    let mut out = format!(
        "  {}  {}\n",
        Style::new().bold().yellow().apply_to(entry.display_name(mode)),
        Style::new()
            .dim()
            .apply_to(format!("{} · {}", entry.class.to_uppercase(), entry.status)),
    );
    out.push_str(&format!("    {}\n", entry.display_description(mode)));
    out.push_str(&format!(
        "    {} {}\n",
        Style::new().bold().apply_to("Id:"),
        entry.id
    ));

    if !entry.tags.is_empty() {
        let tags: Vec<String> = entry.tags.iter().map(|t| format!("#{t}")).collect();
        out.push_str(&format!(
            "    {} {}\n",
            Style::new().bold().apply_to("Tags:"),
            tags.join(" ")
        ));
    }
    if !entry.install.dependencies.is_empty() {
        out.push_str(&format!(
            "    {} {}\n",
            Style::new().bold().apply_to("Requires:"),
            entry.install.dependencies.join(", ")
        ));
    }
    if !entry.is_active() {
        out.push_str(&format!(
            "    {}\n",
            Style::new().red().apply_to("Not installable")
        ));
    }
    out
}

/// The loadout, marking entries pulled in as dependencies
pub fn loadout_list(loadout: &[&ToolEntry], cart: &Cart, mode: Mode) -> String {
    let mut out = format!(
        "{} ({}):\n",
        Style::new().bold().apply_to(mode.tone().summary_label),
        loadout.len()
    );
    for entry in loadout {
        let marker = if cart.contains(&entry.id) {
            String::new()
        } else {
            format!(" {}", Style::new().dim().apply_to("(dependency)"))
        };
        out.push_str(&format!(
            "  {} {}{}\n",
            Style::new().cyan().apply_to(&entry.id),
            entry.display_name(mode),
            marker
        ));
    }
    out
}

pub fn summary_line(summary: &CheckoutSummary) -> String {
    format!("{}\n", Style::new().bold().apply_to(summary))
}

/// Final line after an installer has been written
pub fn written_line(path: &str, tool_count: usize) -> String {
    format!(
        "{} {} ({} tools)\n",
        Style::new().green().bold().apply_to("Wrote"),
        path,
        tool_count
    )
}
