//! # LP-02 Selector Engine
//!
//! **Stage ID:** 02
//!
//! ## Purpose
//!
//! Computes the canonical 4-byte call selector for a function signature and
//! detects selector collisions across a whole inventory.
//!
//! ## Stage Invariants
//!
//! | ID | Invariant | Enforcement |
//! |----|-----------|-------------|
//! | INVARIANT-1 | selector = first 4 bytes of keccak256(canonical signature) | `selector_for_signature` |
//! | INVARIANT-2 | Collisions are reported, never auto-resolved | `SelectorMap::collisions` |
//! | INVARIANT-3 | No side effects; pure function of the input list | whole crate |

pub mod engine;
pub mod error;

pub use engine::{
    canonicalize_signature, selector_for_descriptor, selector_for_signature, CollisionReport,
    SelectorMap,
};
pub use error::SelectorError;
