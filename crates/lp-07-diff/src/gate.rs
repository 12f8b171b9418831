//! Policy-driven verdict over a diff report.

use crate::report::DiffReport;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::warn;

/// A class of change a policy can choose to fail on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum FailureClass {
    /// A selector newly owned by two or more canary modules.
    Collision,
    /// A banned selector present in a canary module.
    Banned,
    /// A selector present only in the canary.
    Added,
    /// A selector present only in the strict reference.
    Removed,
    /// A selector whose owner set changed.
    Moved,
}

/// Which change classes fail the gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatePolicy {
    /// Classes that turn a non-empty diff into a failure.
    pub fail_on: BTreeSet<FailureClass>,
}

impl GatePolicy {
    /// Fails on every change class. Suits release pipelines where the
    /// canary must match the reference exactly.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            fail_on: BTreeSet::from([
                FailureClass::Collision,
                FailureClass::Banned,
                FailureClass::Added,
                FailureClass::Removed,
                FailureClass::Moved,
            ]),
        }
    }

    /// Fails only on routing hazards. Additions, removals, and moves are
    /// reported but tolerated, which is the normal upgrade posture.
    #[must_use]
    pub fn hazards_only() -> Self {
        Self {
            fail_on: BTreeSet::from([FailureClass::Collision, FailureClass::Banned]),
        }
    }
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self::hazards_only()
    }
}

/// The gate's outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateVerdict {
    /// No failing class was triggered.
    Pass,
    /// At least one failing class was triggered.
    Fail {
        /// The triggered classes that the policy fails on, sorted.
        triggered: Vec<FailureClass>,
    },
    /// No strict reference existed, so nothing was compared. Treated as
    /// passing but kept distinguishable for first-deployment logging.
    NoReference,
}

impl GateVerdict {
    /// Whether deployment may proceed.
    #[must_use]
    pub fn is_pass(&self) -> bool {
        !matches!(self, GateVerdict::Fail { .. })
    }
}

/// Classes present in a report, independent of any policy.
#[must_use]
pub fn triggered_classes(report: &DiffReport) -> BTreeSet<FailureClass> {
    let mut classes = BTreeSet::new();
    if !report.new_collisions.is_empty() {
        classes.insert(FailureClass::Collision);
    }
    if !report.banned_in_canary.is_empty() {
        classes.insert(FailureClass::Banned);
    }
    if !report.selector_adds.is_empty() || !report.added_facets.is_empty() {
        classes.insert(FailureClass::Added);
    }
    if !report.selector_removes.is_empty() || !report.removed_facets.is_empty() {
        classes.insert(FailureClass::Removed);
    }
    if !report.moved.is_empty() {
        classes.insert(FailureClass::Moved);
    }
    classes
}

/// Evaluates a diff report against a policy.
///
/// A missing report means there was no reference manifest to diff
/// against, which yields [`GateVerdict::NoReference`] rather than a
/// vacuous pass.
#[must_use]
pub fn evaluate_gate(report: Option<&DiffReport>, policy: &GatePolicy) -> GateVerdict {
    let Some(report) = report else {
        return GateVerdict::NoReference;
    };

    let triggered: Vec<FailureClass> = triggered_classes(report)
        .intersection(&policy.fail_on)
        .copied()
        .collect();

    if triggered.is_empty() {
        GateVerdict::Pass
    } else {
        warn!(?triggered, "policy gate failed");
        GateVerdict::Fail { triggered }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::CollisionEntry;
    use shared_types::Selector;

    fn banned_report() -> DiffReport {
        let mut report = DiffReport::default();
        report.banned_in_canary.push(CollisionEntry {
            selector: Selector::new([0x7a, 0x0e, 0xd6, 0x27]),
            owners: vec!["ViewFacet".to_string()],
        });
        report
    }

    #[test]
    fn test_empty_report_passes_any_policy() {
        let report = DiffReport::default();
        assert_eq!(
            evaluate_gate(Some(&report), &GatePolicy::strict()),
            GateVerdict::Pass
        );
        assert_eq!(
            evaluate_gate(Some(&report), &GatePolicy::hazards_only()),
            GateVerdict::Pass
        );
    }

    #[test]
    fn test_missing_reference_is_distinguishable() {
        let verdict = evaluate_gate(None, &GatePolicy::strict());
        assert_eq!(verdict, GateVerdict::NoReference);
        assert!(verdict.is_pass());
    }

    #[test]
    fn test_banned_fails_hazards_policy() {
        let verdict = evaluate_gate(Some(&banned_report()), &GatePolicy::hazards_only());
        assert_eq!(
            verdict,
            GateVerdict::Fail {
                triggered: vec![FailureClass::Banned]
            }
        );
        assert!(!verdict.is_pass());
    }

    #[test]
    fn test_banned_stays_recorded_when_policy_tolerates_it() {
        // A policy may choose not to fail on the banned class; the report
        // still carries the entry either way.
        let report = banned_report();
        let tolerant = GatePolicy {
            fail_on: BTreeSet::from([FailureClass::Collision]),
        };
        assert_eq!(evaluate_gate(Some(&report), &tolerant), GateVerdict::Pass);
        assert_eq!(report.banned_in_canary.len(), 1);
    }

    #[test]
    fn test_additions_tolerated_by_default_policy() {
        let mut report = DiffReport::default();
        report
            .selector_adds
            .entry("UtilFacet".to_string())
            .or_default()
            .push(Selector::new([1, 2, 3, 4]));

        assert_eq!(
            evaluate_gate(Some(&report), &GatePolicy::default()),
            GateVerdict::Pass
        );
        assert_eq!(
            evaluate_gate(Some(&report), &GatePolicy::strict()),
            GateVerdict::Fail {
                triggered: vec![FailureClass::Added]
            }
        );
    }

    #[test]
    fn test_triggered_classes_covers_facet_level_changes() {
        let mut report = DiffReport::default();
        report.added_facets.push("UtilFacet".to_string());
        report.removed_facets.push("ViewFacetB".to_string());

        let classes = triggered_classes(&report);
        assert!(classes.contains(&FailureClass::Added));
        assert!(classes.contains(&FailureClass::Removed));
        assert!(!classes.contains(&FailureClass::Collision));
    }
}
