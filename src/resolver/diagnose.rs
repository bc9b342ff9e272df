//! Dependency graph diagnostics
//!
//! The resolver tolerates dangling references and cycles silently. This module reports
//! them for `armory manifest check` without changing what `resolve` does.
//!
//! Cycles are found with a depth-first search using three-colour marking: an edge back
//! to a node still on the current path closes a cycle.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::manifest::{EntryIndex, ToolEntry};

/// A dependency id that no entry defines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingDependency {
    pub tool: String,
    pub dependency: String,
}

impl fmt::Display for DanglingDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' depends on unknown '{}'", self.tool, self.dependency)
    }
}

/// Findings over the whole dependency graph
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphReport {
    pub dangling: Vec<DanglingDependency>,
    /// Each cycle as the ids on it, starting from where it was entered
    pub cycles: Vec<Vec<String>>,
}

impl GraphReport {
    pub fn is_clean(&self) -> bool {
        self.dangling.is_empty() && self.cycles.is_empty()
    }
}

/// Render a cycle as `a -> b -> a`
pub fn format_cycle(cycle: &[String]) -> String {
    let mut parts: Vec<&str> = cycle.iter().map(String::as_str).collect();
    if let Some(first) = cycle.first() {
        parts.push(first);
    }
    parts.join(" -> ")
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Color {
    Gray,
    Black,
}

struct Walk<'a> {
    index: &'a EntryIndex<'a>,
    colors: HashMap<&'a str, Color>,
    path: Vec<&'a str>,
    cycles: Vec<Vec<String>>,
}

impl<'a> Walk<'a> {
    fn visit(&mut self, id: &'a str) {
        match self.colors.get(id).copied() {
            Some(Color::Black) => return,
            Some(Color::Gray) => {
                if let Some(start) = self.path.iter().position(|p| *p == id) {
                    self.cycles
                        .push(self.path[start..].iter().map(|s| (*s).to_string()).collect());
                }
                return;
            }
            None => {}
        }

        let Some(entry) = self.index.get(id) else {
            return;
        };

        self.colors.insert(id, Color::Gray);
        self.path.push(id);
        for dependency in &entry.install.dependencies {
            if self.index.contains(dependency) {
                self.visit(dependency.as_str());
            }
        }
        self.path.pop();
        self.colors.insert(id, Color::Black);
    }
}

/// Report dangling references and cycles, in id order
pub fn diagnose(entries: &[ToolEntry]) -> GraphReport {
    let index = EntryIndex::from_entries(entries);

    let mut ids: Vec<&str> = entries
        .iter()
        .map(|e| e.id.as_str())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    ids.sort_unstable();

    let mut dangling = Vec::new();
    for id in &ids {
        let Some(entry) = index.get(*id) else { continue };
        for dependency in &entry.install.dependencies {
            if !index.contains(dependency) {
                dangling.push(DanglingDependency {
                    tool: (*id).to_string(),
                    dependency: dependency.clone(),
                });
            }
        }
    }

    let mut walk = Walk {
        index: &index,
        colors: HashMap::new(),
        path: Vec::new(),
        cycles: Vec::new(),
    };
    for id in &ids {
        walk.visit(*id);
    }

    GraphReport {
        dangling,
        cycles: walk.cycles,
    }
}
