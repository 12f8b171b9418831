//! # LP-03 Domain Bucketer
//!
//! **Stage ID:** 03
//!
//! ## Purpose
//!
//! Classifies each function descriptor into exactly one semantic category
//! (administrative, view/read-only, core/dispatch, utility) using an
//! explicit, ordered rule table evaluated top-to-bottom.
//!
//! ## Stage Invariants
//!
//! | ID | Invariant | Enforcement |
//! |----|-----------|-------------|
//! | INVARIANT-1 | Same name/mutability always lands in the same category | rules are pure data, no I/O |
//! | INVARIANT-2 | Classification order within a bucket preserves inventory order | `bucket_inventory` |
//! | INVARIANT-3 | Interior-substring rule hits are surfaced as warnings | `SuspiciousClassification` |
//!
//! The rule table is data, not control flow: each rule is a
//! (predicate, category) pair that can be tested in isolation and extended
//! without touching the classifier.

pub mod category;
pub mod rules;

pub use category::{Bucket, Buckets, Category};
pub use rules::{bucket_inventory, classify, Predicate, Rule, RuleTable};
