//! Breadth-first dependency closure

use std::collections::{HashSet, VecDeque};

use tracing::debug;

use super::Cart;
use crate::manifest::{EntryIndex, ToolEntry};

/// Resolve the cart into its dependency-closed loadout
///
/// Output order is the cart's insertion order followed by breadth-first discovery
/// order. Cart ids and dependency ids absent from the index are skipped.
pub fn resolve<'a>(cart: &Cart, index: &EntryIndex<'a>) -> Vec<&'a ToolEntry> {
    let mut order: Vec<String> = cart.iter().map(str::to_string).collect();
    let mut selected: HashSet<String> = order.iter().cloned().collect();
    let mut queue: VecDeque<String> = order.iter().cloned().collect();

    while let Some(id) = queue.pop_front() {
        let Some(entry) = index.get(&id) else {
            debug!(tool = %id, "Skipping cart id missing from manifest");
            continue;
        };

        for dependency in &entry.install.dependencies {
            if selected.contains(dependency) {
                continue;
            }
            if !index.contains(dependency) {
                debug!(tool = %id, dependency = %dependency, "Dropping unknown dependency");
                continue;
            }
            selected.insert(dependency.clone());
            order.push(dependency.clone());
            queue.push_back(dependency.clone());
        }
    }

    order.iter().filter_map(|id| index.get(id)).collect()
}

/// Number of loadout entries the operator did not select explicitly
pub fn auto_added(cart: &Cart, loadout: &[&ToolEntry]) -> usize {
    let explicit = loadout.iter().filter(|entry| cart.contains(&entry.id)).count();
    loadout.len().saturating_sub(explicit)
}
