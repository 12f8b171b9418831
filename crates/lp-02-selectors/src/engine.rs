//! Selector computation and collision detection.
//!
//! ALGORITHM: selector = keccak256(UTF-8 bytes of the canonical signature),
//! truncated to the first 4 bytes. Canonicalization joins parameter types
//! with commas and no spaces, strips data-location qualifiers, and
//! normalizes `address payable` to `address`.

use crate::error::SelectorError;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use shared_types::descriptors::canonical_type;
use shared_types::{FunctionDescriptor, Selector};
use std::collections::BTreeMap;

// =============================================================================
// SELECTOR COMPUTATION
// =============================================================================

/// Computes the selector for an already-canonical signature string.
///
/// The caller is responsible for canonical form; use
/// [`canonicalize_signature`] first when handling raw user input.
#[must_use]
pub fn selector_for_signature(canonical_signature: &str) -> Selector {
    let hash = Keccak256::digest(canonical_signature.as_bytes());
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&hash[..4]);
    Selector::new(bytes)
}

/// Computes the selector for a function descriptor.
#[must_use]
pub fn selector_for_descriptor(descriptor: &FunctionDescriptor) -> Selector {
    selector_for_signature(&descriptor.canonical_signature())
}

/// Canonicalizes a raw signature string of the form `name(type1, type2)`.
///
/// Strips `memory`/`calldata`/`storage` qualifiers, normalizes
/// `address payable` to `address`, and removes whitespace between types.
///
/// ## Errors
///
/// Rejects strings without a balanced `(...)` parameter list or with an
/// empty function name.
pub fn canonicalize_signature(raw: &str) -> Result<String, SelectorError> {
    let trimmed = raw.trim();
    let open = trimmed
        .find('(')
        .ok_or_else(|| SelectorError::MalformedSignature(raw.to_string()))?;
    if !trimmed.ends_with(')') {
        return Err(SelectorError::MalformedSignature(raw.to_string()));
    }

    let name = trimmed[..open].trim();
    if name.is_empty() {
        return Err(SelectorError::EmptySignatureName(raw.to_string()));
    }

    let inner = &trimmed[open + 1..trimmed.len() - 1];
    if inner.contains('(') || inner.contains(')') {
        return Err(SelectorError::MalformedSignature(raw.to_string()));
    }

    let params: Vec<String> = if inner.trim().is_empty() {
        Vec::new()
    } else {
        inner.split(',').map(canonical_type).collect()
    };
    if params.iter().any(String::is_empty) {
        return Err(SelectorError::MalformedSignature(raw.to_string()));
    }

    Ok(format!("{name}({})", params.join(",")))
}

// =============================================================================
// SELECTOR MAP & COLLISIONS
// =============================================================================

/// A selector collision: one selector claimed by two or more distinct
/// canonical signatures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionReport {
    /// The contested selector.
    pub selector: Selector,
    /// All signatures hashing to it, in first-seen order.
    pub signatures: Vec<String>,
}

/// Multimap from selector to the canonical signatures that produce it.
///
/// Built over a whole inventory; any selector owning more than one
/// signature is a collision and is only ever reported, never resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorMap {
    entries: BTreeMap<Selector, Vec<String>>,
}

impl SelectorMap {
    /// Builds the map from an inventory of descriptors.
    ///
    /// Identical signatures (exact duplicates) are collapsed; only distinct
    /// signatures sharing a selector count as a collision.
    #[must_use]
    pub fn from_inventory(inventory: &[FunctionDescriptor]) -> Self {
        let mut entries: BTreeMap<Selector, Vec<String>> = BTreeMap::new();
        for descriptor in inventory {
            let signature = descriptor.canonical_signature();
            let selector = selector_for_signature(&signature);
            let signatures = entries.entry(selector).or_default();
            if !signatures.contains(&signature) {
                signatures.push(signature);
            }
        }
        Self { entries }
    }

    /// Returns all collisions, ordered by selector.
    #[must_use]
    pub fn collisions(&self) -> Vec<CollisionReport> {
        self.entries
            .iter()
            .filter(|(_, signatures)| signatures.len() > 1)
            .map(|(selector, signatures)| CollisionReport {
                selector: *selector,
                signatures: signatures.clone(),
            })
            .collect()
    }

    /// Returns the signatures registered under a selector.
    #[must_use]
    pub fn signatures_for(&self, selector: Selector) -> &[String] {
        self.entries
            .get(&selector)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of distinct selectors in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over (selector, signatures) pairs in selector order.
    pub fn iter(&self) -> impl Iterator<Item = (&Selector, &Vec<String>)> {
        self.entries.iter()
    }
}

// =============================================================================
// TESTS
// =============================================================================
