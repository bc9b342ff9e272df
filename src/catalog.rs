//! Catalog filtering for `armory catalog`

use crate::manifest::ToolEntry;
use crate::mode::Mode;

/// Filters applied to the catalog listing
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    /// Case-insensitive substring over id, class, status, display text and tags
    pub query: Option<String>,
    /// Exact class match
    pub class: Option<String>,
    /// Exact status match
    pub status: Option<String>,
}

impl CatalogFilter {
    pub fn matches(&self, entry: &ToolEntry, mode: Mode) -> bool {
        if self.class.as_deref().is_some_and(|c| c != entry.class) {
            return false;
        }
        if self.status.as_deref().is_some_and(|s| s != entry.status) {
            return false;
        }

        let query = self
            .query
            .as_deref()
            .map(|q| q.trim().to_lowercase())
            .unwrap_or_default();
        if query.is_empty() {
            return true;
        }

        haystack(entry, mode).contains(&query)
    }

    /// Matching entries, in manifest order
    pub fn apply<'a>(&self, entries: &'a [ToolEntry], mode: Mode) -> Vec<&'a ToolEntry> {
        entries.iter().filter(|e| self.matches(e, mode)).collect()
    }
}

/// Lowercased searchable text of an entry in the given mode
fn haystack(entry: &ToolEntry, mode: Mode) -> String {
    let display = entry.display.get(mode.as_str());
    let mut parts = vec![entry.id.as_str(), entry.class.as_str(), entry.status.as_str()];
    if let Some(display) = display {
        parts.extend(display.name.as_deref());
        parts.extend(display.description.as_deref());
    }
    parts.extend(entry.tags.iter().map(String::as_str));

    parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
