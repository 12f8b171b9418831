//! The structured diff report and its human-readable rendering.

use serde::{Deserialize, Serialize};
use shared_types::Selector;
use std::collections::BTreeMap;
use std::fmt::Write;

/// A selector whose single owner changed between manifests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovedSelector {
    /// The selector that moved.
    pub selector: Selector,
    /// Owning modules on the strict side.
    pub from: Vec<String>,
    /// Owning modules on the canary side.
    pub to: Vec<String>,
}

/// A selector owned by two or more canary modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionEntry {
    /// The contested selector.
    pub selector: Selector,
    /// All owning modules, sorted.
    pub owners: Vec<String>,
}

/// Structured comparison of a strict manifest against a canary manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffReport {
    /// Modules present only in the canary.
    pub added_facets: Vec<String>,
    /// Modules present only in the strict reference.
    pub removed_facets: Vec<String>,
    /// Per-module selectors present only in the canary.
    pub selector_adds: BTreeMap<String, Vec<Selector>>,
    /// Per-module selectors present only in the strict reference.
    pub selector_removes: BTreeMap<String, Vec<Selector>>,
    /// Selectors whose ownership changed from exactly one module to
    /// exactly one different module.
    pub moved: Vec<MovedSelector>,
    /// Selectors now owned by two or more canary modules.
    pub new_collisions: Vec<CollisionEntry>,
    /// Banned selectors found in any canary module. Always recorded,
    /// independent of the gate's failure configuration.
    pub banned_in_canary: Vec<CollisionEntry>,
}

impl DiffReport {
    /// Returns true if nothing changed and nothing was flagged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added_facets.is_empty()
            && self.removed_facets.is_empty()
            && self.selector_adds.is_empty()
            && self.selector_removes.is_empty()
            && self.moved.is_empty()
            && self.new_collisions.is_empty()
            && self.banned_in_canary.is_empty()
    }

    /// Renders the line-oriented human-readable summary.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        if self.is_empty() {
            out.push_str("manifest diff: no changes\n");
            return out;
        }

        let _ = writeln!(out, "manifest diff:");
        for facet in &self.added_facets {
            let _ = writeln!(out, "  + facet {facet}");
        }
        for facet in &self.removed_facets {
            let _ = writeln!(out, "  - facet {facet}");
        }
        for (module, selectors) in &self.selector_adds {
            for selector in selectors {
                let _ = writeln!(out, "  + {module}: {selector}");
            }
        }
        for (module, selectors) in &self.selector_removes {
            for selector in selectors {
                let _ = writeln!(out, "  - {module}: {selector}");
            }
        }
        for moved in &self.moved {
            let _ = writeln!(
                out,
                "  ~ {} moved: {:?} -> {:?}",
                moved.selector, moved.from, moved.to
            );
        }
        for collision in &self.new_collisions {
            let _ = writeln!(
                out,
                "  ! collision {} owned by {:?}",
                collision.selector, collision.owners
            );
        }
        for banned in &self.banned_in_canary {
            let _ = writeln!(
                out,
                "  ! banned selector {} in {:?}",
                banned.selector, banned.owners
            );
        }
        out
    }
}
