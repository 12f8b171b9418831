//! Manifest construction from packed modules.
//!
//! The manifest is a pure function of the module set: ordered maps
//! everywhere, so re-running on identical input yields a byte-identical
//! manifest and an identical Merkle root.

use crate::error::ManifestError;
use crate::merkle::{leaf_hashes_parallel, MerkleTree, ProofNode};
use lp_02_selectors::SelectorMap;
use lp_04_packing::PackedModule;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Hash, Selector};
use std::collections::BTreeMap;
use tracing::info;

// =============================================================================
// MANIFEST TYPES
// =============================================================================

/// One module's entry in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Selectors owned by this module, in function order.
    pub selectors: Vec<Selector>,
    /// Canonical signatures, same order as `selectors`.
    pub signatures: Vec<String>,
    /// Estimated compiled size in bytes.
    pub size_estimate: usize,
    /// Content hash of the module's generated source.
    pub codehash: Hash,
}

/// Inclusion proof for one selector leaf.
///
/// Proves "selector X routes to module M with codehash H at position P"
/// without revealing the rest of the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestProof {
    /// Owning module name.
    pub module: String,
    /// Position of the leaf in the ordered leaf sequence.
    pub leaf_index: usize,
    /// The hashed leaf.
    pub leaf_hash: Hash,
    /// Sibling path with positional bits, leaf to root.
    pub path: Vec<ProofNode>,
}

/// The versioned selector→module manifest with its Merkle commitment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Version string this manifest was built for.
    pub version: String,
    /// Module entries, ordered by module name.
    pub facets: BTreeMap<String, ManifestEntry>,
    /// Merkle root over the ordered leaf sequence.
    pub root: Hash,
    /// Per-selector inclusion proofs, keyed by selector hex.
    pub proofs: BTreeMap<String, ManifestProof>,
    /// Module names in deployment/initialization priority order.
    pub init_sequence: Vec<String>,
}

impl Manifest {
    /// Returns the owning module of a selector, if any.
    #[must_use]
    pub fn owner_of(&self, selector: Selector) -> Option<&str> {
        self.facets
            .iter()
            .find(|(_, entry)| entry.selectors.contains(&selector))
            .map(|(name, _)| name.as_str())
    }

    /// Total number of selectors across all entries.
    #[must_use]
    pub fn selector_count(&self) -> usize {
        self.facets.values().map(|e| e.selectors.len()).sum()
    }
}

// =============================================================================
// BUILDING
// =============================================================================

/// Builds the manifest for a set of packed modules.
///
/// ## Errors
///
/// - [`ManifestError::SelectorCollisions`] when distinct signatures share a
///   selector anywhere in the module set; the error carries every
///   colliding signature set exactly.
/// - [`ManifestError::DuplicateOwnership`] when a selector would be owned
///   by more than one module.
/// - [`ManifestError::NoModules`] for an empty module set.
pub fn build_manifest(
    modules: &[PackedModule],
    version: &str,
) -> Result<Manifest, ManifestError> {
    if modules.is_empty() {
        return Err(ManifestError::NoModules);
    }

    // Collision check over the union of all module inventories.
    let all_functions: Vec<_> = modules
        .iter()
        .flat_map(|m| m.functions.iter().cloned())
        .collect();
    let selector_map = SelectorMap::from_inventory(&all_functions);
    let collisions = selector_map.collisions();
    if !collisions.is_empty() {
        return Err(ManifestError::SelectorCollisions(collisions));
    }

    // Ownership check: a selector may appear in at most one module.
    let mut owners: BTreeMap<Selector, Vec<String>> = BTreeMap::new();
    for module in modules {
        for selector in &module.selectors {
            owners.entry(*selector).or_default().push(module.name.clone());
        }
    }
    for (selector, modules_owning) in &owners {
        if modules_owning.len() > 1 {
            return Err(ManifestError::DuplicateOwnership {
                selector: *selector,
                modules: modules_owning.clone(),
            });
        }
    }

    // Entries, ordered by module name.
    let mut facets = BTreeMap::new();
    for module in modules {
        facets.insert(
            module.name.clone(),
            ManifestEntry {
                selectors: module.selectors.clone(),
                signatures: module.signatures(),
                size_estimate: module.size_estimate,
                codehash: module.codehash,
            },
        );
    }

    // Ordered leaf sequence: entry (module-name) order, then function
    // order within the module. The address placeholder is fixed-width
    // zero until deployment binds real addresses.
    let mut leaf_inputs: Vec<(Selector, Address, Hash)> = Vec::new();
    let mut leaf_owner: Vec<(String, Selector)> = Vec::new();
    for (name, entry) in &facets {
        for selector in &entry.selectors {
            leaf_inputs.push((*selector, Address::ZERO, entry.codehash));
            leaf_owner.push((name.clone(), *selector));
        }
    }

    let hashes = leaf_hashes_parallel(&leaf_inputs);
    let tree = MerkleTree::build(hashes.clone());

    let mut proofs = BTreeMap::new();
    for (index, (module, selector)) in leaf_owner.iter().enumerate() {
        let path = tree.generate_path(index)?;
        proofs.insert(
            selector.to_hex(),
            ManifestProof {
                module: module.clone(),
                leaf_index: index,
                leaf_hash: hashes[index],
                path,
            },
        );
    }

    // Initialization priority: category precedence, then packer order
    // (which is already stable within a category).
    let mut ranked: Vec<_> = modules
        .iter()
        .map(|m| (m.category.init_rank(), m.name.clone()))
        .collect();
    ranked.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    let init_sequence: Vec<String> = ranked.into_iter().map(|(_, name)| name).collect();

    let manifest = Manifest {
        version: version.to_string(),
        facets,
        root: tree.root(),
        proofs,
        init_sequence,
    };

    info!(
        version = %manifest.version,
        modules = manifest.facets.len(),
        selectors = manifest.selector_count(),
        root = %manifest.root,
        "built manifest"
    );

    Ok(manifest)
}

// =============================================================================
// TESTS
// =============================================================================
