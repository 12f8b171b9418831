//! # LP-05 Manifest Builder
//!
//! **Stage ID:** 05
//!
//! ## Purpose
//!
//! Aggregates all packed modules into a versioned, tamper-evident manifest:
//! selector ownership per module, an ordered Merkle tree over
//! (selector, address placeholder, codehash) leaves, per-leaf inclusion
//! proofs, and the `init_sequence` that orders initialization calls.
//!
//! ## Stage Invariants
//!
//! | ID | Invariant | Enforcement |
//! |----|-----------|-------------|
//! | INVARIANT-1 | A selector appears in at most one module per manifest | `build_manifest` duplicate check |
//! | INVARIANT-2 | Collisions are fatal and reported with the exact signature set | `build_manifest` |
//! | INVARIANT-3 | Leaf/sibling order is semantically significant (ordered Merkle) | `merkle` module |
//! | INVARIANT-4 | Identical module sets produce byte-identical manifests and roots | ordered maps throughout |
//!
//! Leaf hashing for independent modules is embarrassingly parallel
//! (rayon); tree assembly is a single sequential pass that preserves
//! leaf order.

pub mod builder;
pub mod error;
pub mod merkle;
pub mod payloads;
pub mod persist;

pub use builder::{build_manifest, Manifest, ManifestEntry, ManifestProof};
pub use error::ManifestError;
pub use merkle::{
    encode_leaf, leaf_hash, MerkleTree, ProofNode, SiblingPosition, LEAF_ENCODING_VERSION,
};
pub use payloads::{ApplyRootPayload, CommitRootPayload, EpochRef};
pub use persist::{
    load_manifest, load_minimal, save_manifest, save_minimal, MinimalEntry, MinimalManifest,
};
