//! Packed module entity and side-car metadata.

use lp_03_bucketing::Category;
use serde::{Deserialize, Serialize};
use shared_types::{FunctionDescriptor, Hash, Selector};

/// A self-contained deployable unit produced by the packer.
///
/// Immutable after packing; regenerated whenever the upstream inventory
/// changes. Rebuild-then-diff is the only update path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackedModule {
    /// Module name, ordinally suffixed when the bucket was split.
    pub name: String,
    /// Category the module was packed from.
    pub category: Category,
    /// Functions in original bucket order.
    pub functions: Vec<FunctionDescriptor>,
    /// Selectors, one per function, in the same order.
    pub selectors: Vec<Selector>,
    /// The generated source unit.
    pub source: String,
    /// Isolated storage namespace slot for this module.
    pub storage_slot: Hash,
    /// Estimated compiled size in bytes.
    pub size_estimate: usize,
    /// Advisory deployment gas estimate.
    pub gas_estimate: u64,
    /// Content hash over the generated source.
    pub codehash: Hash,
    /// Free-form policy notes recorded at packing time.
    pub policy_notes: Vec<String>,
}

impl PackedModule {
    /// Canonical signatures of all functions, in order.
    #[must_use]
    pub fn signatures(&self) -> Vec<String> {
        self.functions
            .iter()
            .map(FunctionDescriptor::canonical_signature)
            .collect()
    }

    /// Side-car metadata record for downstream tooling.
    #[must_use]
    pub fn metadata(&self) -> ModuleMetadata {
        ModuleMetadata {
            name: self.name.clone(),
            selectors: self.selectors.iter().map(Selector::to_hex).collect(),
            signatures: self.signatures(),
            size: self.size_estimate,
        }
    }
}

/// The side-car metadata record emitted next to each generated source unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleMetadata {
    /// Module name.
    pub name: String,
    /// Hex-encoded selectors.
    pub selectors: Vec<String>,
    /// Canonical signatures.
    pub signatures: Vec<String>,
    /// Estimated compiled size in bytes.
    pub size: usize,
}
