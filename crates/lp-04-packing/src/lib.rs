//! # LP-04 Module Packer
//!
//! **Stage ID:** 04
//!
//! ## Purpose
//!
//! Renders each classified bucket into one or more self-contained deployable
//! units (facets), splitting buckets that exceed the per-module function
//! ceiling into ordinally-suffixed modules, and enforcing the hard
//! deployable-size ceiling (EIP-170, 24,576 bytes).
//!
//! ## Stage Invariants
//!
//! | ID | Invariant | Enforcement |
//! |----|-----------|-------------|
//! | INVARIANT-1 | Union of functions across modules equals the bucket exactly | `split_bucket` |
//! | INVARIANT-2 | Splitting is stable: original order, no reordering across boundaries | `split_bucket` |
//! | INVARIANT-3 | No module above the size ceiling is ever emitted | `pack_bucket` fails loudly |
//! | INVARIANT-4 | Generated units carry no constructor state and an isolated storage namespace | `render` |
//! | INVARIANT-5 | Reserved introspection/routing functions never enter a generated module | `pack_bucket` |
//!
//! Gas estimation is advisory only; it reports, it never gates.

pub mod error;
pub mod estimate;
pub mod module;
pub mod packer;
pub mod render;

pub use error::PackingError;
pub use estimate::{estimate_compiled_size, estimate_deploy_gas};
pub use module::{ModuleMetadata, PackedModule};
pub use packer::{ordinal_name, pack_buckets, split_bucket};
