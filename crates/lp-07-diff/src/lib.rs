//! # LP-07 Manifest Diff & Policy Gate
//!
//! **Stage ID:** 07
//!
//! ## Purpose
//!
//! Compares a reference ("strict") manifest against a candidate ("canary")
//! manifest, classifies every selector/module change, flags
//! newly-introduced collisions and banned selectors leaking into generated
//! modules, and renders a policy-driven pass/fail verdict.
//!
//! ## Stage Invariants
//!
//! | ID | Invariant | Enforcement |
//! |----|-----------|-------------|
//! | INVARIANT-1 | Diffing a manifest against itself yields an empty report | `diff_manifests` |
//! | INVARIANT-2 | Banned selectors are always recorded, independent of policy | `diff_manifests` |
//! | INVARIANT-3 | Owner-set shrink/growth is reported fully, never collapsed | moved + add/remove classes |
//! | INVARIANT-4 | The gate is side-effect-free: pure comparison plus a report | whole crate |

pub mod diff;
pub mod error;
pub mod gate;
pub mod report;

pub use diff::{banned_selectors, diff_manifests, OwnershipView};
pub use error::DiffError;
pub use gate::{evaluate_gate, triggered_classes, FailureClass, GatePolicy, GateVerdict};
pub use report::{CollisionEntry, DiffReport, MovedSelector};
