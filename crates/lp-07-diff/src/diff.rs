//! Ownership views and the core diff pass.
//!
//! A diff compares two ownership views selector by selector. Ownership is
//! the only thing compared: sizes, codehashes, and proofs are deployment
//! details that downstream stages re-derive, so a change there without a
//! selector change is not a routing change.

use crate::error::DiffError;
use crate::report::{CollisionEntry, DiffReport, MovedSelector};
use lp_02_selectors::selector_for_signature;
use lp_05_manifest::{Manifest, MinimalManifest};
use shared_types::{PipelineConfig, Selector};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

// =============================================================================
// OWNERSHIP VIEW
// =============================================================================

/// Module → owned-selector mapping extracted from a manifest.
///
/// Both manifest forms project into this view, so a strict extended
/// manifest can be diffed against a minimal canary one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnershipView {
    modules: BTreeMap<String, BTreeSet<Selector>>,
}

impl OwnershipView {
    /// Projects a full manifest into an ownership view.
    #[must_use]
    pub fn from_manifest(manifest: &Manifest) -> Self {
        Self {
            modules: manifest
                .facets
                .iter()
                .map(|(name, entry)| {
                    (name.clone(), entry.selectors.iter().copied().collect())
                })
                .collect(),
        }
    }

    /// Projects a minimal manifest into an ownership view.
    ///
    /// ## Errors
    ///
    /// [`DiffError::MalformedSelector`] when a persisted selector string
    /// is not 4-byte hex.
    pub fn from_minimal(manifest: &MinimalManifest) -> Result<Self, DiffError> {
        let mut modules = BTreeMap::new();
        for (name, entry) in &manifest.facets {
            let mut selectors = BTreeSet::new();
            for raw in &entry.selectors {
                let selector =
                    Selector::from_hex(raw).map_err(|_| DiffError::MalformedSelector {
                        module: name.clone(),
                        selector: raw.clone(),
                    })?;
                selectors.insert(selector);
            }
            modules.insert(name.clone(), selectors);
        }
        Ok(Self { modules })
    }

    /// Builds a view directly from module → selector pairs.
    #[must_use]
    pub fn from_pairs(pairs: &[(&str, &[Selector])]) -> Self {
        Self {
            modules: pairs
                .iter()
                .map(|(name, selectors)| {
                    ((*name).to_string(), selectors.iter().copied().collect())
                })
                .collect(),
        }
    }

    /// Module names in the view.
    #[must_use]
    pub fn module_names(&self) -> BTreeSet<&str> {
        self.modules.keys().map(String::as_str).collect()
    }

    /// All modules owning the given selector, sorted by name.
    #[must_use]
    pub fn owners_of(&self, selector: Selector) -> Vec<String> {
        self.modules
            .iter()
            .filter(|(_, selectors)| selectors.contains(&selector))
            .map(|(name, _)| name.clone())
            .collect()
    }

    fn all_selectors(&self) -> BTreeSet<Selector> {
        self.modules.values().flatten().copied().collect()
    }
}

/// Selectors of the configured banned signatures, already canonical.
#[must_use]
pub fn banned_selectors(config: &PipelineConfig) -> Vec<Selector> {
    config
        .banned_signatures
        .iter()
        .map(|signature| selector_for_signature(signature))
        .collect()
}

// =============================================================================
// DIFF
// =============================================================================

/// Diffs a strict reference view against a canary view.
///
/// Classification per selector, by owner sets:
/// - canary owns it twice or more (and the reference did not): collision
/// - owned on both sides but by different module sets: moved, with both
///   full owner sets
/// - reference-only: removed, attributed to each former owner
/// - canary-only: added, attributed to each new owner
///
/// Banned selectors found anywhere in the canary are recorded in
/// `banned_in_canary` unconditionally; whether that fails the gate is the
/// policy's decision, not the diff's.
#[must_use]
pub fn diff_manifests(
    strict: &OwnershipView,
    canary: &OwnershipView,
    banned: &[Selector],
) -> DiffReport {
    let mut report = DiffReport::default();

    let strict_names = strict.module_names();
    let canary_names = canary.module_names();
    report.added_facets = canary_names
        .difference(&strict_names)
        .map(|n| (*n).to_string())
        .collect();
    report.removed_facets = strict_names
        .difference(&canary_names)
        .map(|n| (*n).to_string())
        .collect();

    let universe: BTreeSet<Selector> = strict
        .all_selectors()
        .union(&canary.all_selectors())
        .copied()
        .collect();

    for selector in universe {
        let from = strict.owners_of(selector);
        let to = canary.owners_of(selector);

        if to.len() >= 2 && from.len() < 2 {
            report.new_collisions.push(CollisionEntry {
                selector,
                owners: to.clone(),
            });
        }

        match (from.is_empty(), to.is_empty()) {
            (true, false) => {
                for owner in &to {
                    report
                        .selector_adds
                        .entry(owner.clone())
                        .or_default()
                        .push(selector);
                }
            }
            (false, true) => {
                for owner in &from {
                    report
                        .selector_removes
                        .entry(owner.clone())
                        .or_default()
                        .push(selector);
                }
            }
            (false, false) if from != to => {
                report.moved.push(MovedSelector { selector, from, to });
            }
            _ => {}
        }
    }

    for selector in banned {
        let owners = canary.owners_of(*selector);
        if !owners.is_empty() {
            report.banned_in_canary.push(CollisionEntry {
                selector: *selector,
                owners,
            });
        }
    }

    debug!(
        adds = report.selector_adds.len(),
        removes = report.selector_removes.len(),
        moved = report.moved.len(),
        collisions = report.new_collisions.len(),
        banned = report.banned_in_canary.len(),
        "computed manifest diff"
    );

    report
}

// =============================================================================
// TESTS
// =============================================================================
