//! Id -> entry lookup over manifest entries

use std::collections::HashMap;

use super::ToolEntry;

/// Lookup of entries by id
///
/// Built by inserting entries in manifest order, so when ids repeat the last
/// occurrence wins.
#[derive(Debug, Clone, Default)]
pub struct EntryIndex<'a> {
    by_id: HashMap<&'a str, &'a ToolEntry>,
}

impl<'a> EntryIndex<'a> {
    pub fn from_entries(entries: &'a [ToolEntry]) -> Self {
        let mut by_id = HashMap::with_capacity(entries.len());
        for entry in entries {
            by_id.insert(entry.id.as_str(), entry);
        }
        Self { by_id }
    }

    pub fn get(&self, id: &str) -> Option<&'a ToolEntry> {
        self.by_id.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::test_support::entry;

    #[test]
    fn test_duplicate_ids_last_write_wins() {
        let mut first = entry("remedy", &[]);
        first.class = "first".to_string();
        let mut second = entry("remedy", &[]);
        second.class = "second".to_string();
        let entries = vec![first, entry("chronicle", &[]), second];

        let index = EntryIndex::from_entries(&entries);
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("remedy").map(|e| e.class.as_str()), Some("second"));
    }

    #[test]
    fn test_missing_id() {
        let entries = vec![entry("remedy", &[])];
        let index = EntryIndex::from_entries(&entries);
        assert!(index.get("ghost").is_none());
        assert!(!index.contains("ghost"));
    }
}
