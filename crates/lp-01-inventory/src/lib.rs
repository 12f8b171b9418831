//! # LP-01 Function Inventory Extractor
//!
//! **Stage ID:** 01
//!
//! ## Purpose
//!
//! Turns a compilation unit's parsed function list (supplied by the external
//! compiler collaborator in ABI shape) into a flat inventory of canonical
//! [`FunctionDescriptor`]s.
//!
//! ## Stage Invariants
//!
//! | ID | Invariant | Enforcement |
//! |----|-----------|-------------|
//! | INVARIANT-1 | Descriptors are derived fresh on every build | `extract_inventory` is pure |
//! | INVARIANT-2 | Only externally callable functions enter the inventory | visibility filter |
//! | INVARIANT-3 | Parameter types are canonical before any hashing | `shared_types::descriptors::canonical_type` |
//!
//! ## Error Policy
//!
//! Malformed input (empty names, malformed type strings) is rejected before
//! any downstream hashing. Missing mutability is a non-fatal warning: the
//! function is defaulted to `nonpayable` and surfaced in the warnings list.

pub mod error;
pub mod extractor;

pub use error::InventoryError;
pub use extractor::{extract_inventory, RawFunction, RawParam, RawUnit};
