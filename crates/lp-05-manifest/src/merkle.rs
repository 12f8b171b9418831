//! Ordered Merkle tree over manifest leaves.
//!
//! ALGORITHM: binary hash tree in array form, root at index 0, leaves
//! padded to a power of two with a sentinel hash. Each parent is
//! keccak256(left || right); left/right order is semantically significant,
//! so proofs carry a positional bit per path node.
//!
//! Leaf preimages use a fixed, versioned byte encoding shared between leaf
//! construction and proof verification:
//!
//! ```text
//! 0x01 || selector(4) || address placeholder(20) || codehash(32)
//! ```

use crate::error::ManifestError;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use shared_types::{Address, Hash, Selector};

/// Version byte prefixed to every leaf preimage.
pub const LEAF_ENCODING_VERSION: u8 = 0x01;

/// Sentinel hash used to pad the leaf layer to a power of two.
const SENTINEL_HASH: Hash = Hash::ZERO;

// =============================================================================
// LEAF ENCODING
// =============================================================================

/// Encodes a leaf preimage: version byte, selector, address placeholder,
/// codehash. Fixed-width fields, fixed order.
#[must_use]
pub fn encode_leaf(selector: Selector, placeholder: Address, codehash: Hash) -> [u8; 57] {
    let mut out = [0u8; 57];
    out[0] = LEAF_ENCODING_VERSION;
    out[1..5].copy_from_slice(selector.as_bytes());
    out[5..25].copy_from_slice(placeholder.as_bytes());
    out[25..57].copy_from_slice(codehash.as_bytes());
    out
}

/// Hashes a leaf preimage.
#[must_use]
pub fn leaf_hash(selector: Selector, placeholder: Address, codehash: Hash) -> Hash {
    Hash::new(Keccak256::digest(encode_leaf(selector, placeholder, codehash)).into())
}

/// Hashes many leaves in parallel, preserving input order.
#[must_use]
pub fn leaf_hashes_parallel(leaves: &[(Selector, Address, Hash)]) -> Vec<Hash> {
    leaves
        .par_iter()
        .map(|(selector, placeholder, codehash)| leaf_hash(*selector, *placeholder, *codehash))
        .collect()
}

// =============================================================================
// ORDERED MERKLE TREE
// =============================================================================

/// A binary Merkle tree in array form (root at index 0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleTree {
    /// All nodes, level by level: [root, level1..., leaves...].
    nodes: Vec<Hash>,
    /// Number of real leaves (before padding).
    leaf_count: usize,
    /// Number of leaves after padding to a power of two.
    padded_leaf_count: usize,
    /// The computed root.
    root: Hash,
}

impl MerkleTree {
    /// Builds the tree from pre-hashed leaves.
    ///
    /// Leaves are padded to the nearest power of two with the sentinel
    /// hash; same leaves always produce the same root.
    #[must_use]
    pub fn build(leaf_hashes: Vec<Hash>) -> Self {
        let leaf_count = leaf_hashes.len();

        if leaf_count == 0 {
            return Self {
                nodes: vec![SENTINEL_HASH],
                leaf_count: 0,
                padded_leaf_count: 0,
                root: SENTINEL_HASH,
            };
        }

        let padded_leaf_count = if leaf_count == 1 {
            2
        } else {
            leaf_count.next_power_of_two()
        };
        let mut leaves = leaf_hashes;
        leaves.resize(padded_leaf_count, SENTINEL_HASH);

        let total_nodes = 2 * padded_leaf_count - 1;
        let mut nodes = vec![SENTINEL_HASH; total_nodes];

        let leaf_start = padded_leaf_count - 1;
        nodes[leaf_start..].copy_from_slice(&leaves);

        // Parent at i has children at 2i+1 and 2i+2; build bottom-up.
        for i in (0..leaf_start).rev() {
            nodes[i] = hash_pair(&nodes[2 * i + 1], &nodes[2 * i + 2]);
        }

        let root = nodes[0];
        Self {
            nodes,
            leaf_count,
            padded_leaf_count,
            root,
        }
    }

    /// The root hash.
    #[must_use]
    pub fn root(&self) -> Hash {
        self.root
    }

    /// Number of real leaves.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Generates the sibling path for the leaf at `index`.
    pub fn generate_path(&self, index: usize) -> Result<Vec<ProofNode>, ManifestError> {
        if index >= self.leaf_count {
            return Err(ManifestError::LeafIndexOutOfRange {
                index,
                leaf_count: self.leaf_count,
            });
        }

        let leaf_start = self.padded_leaf_count - 1;
        let mut current = leaf_start + index;
        let mut path = Vec::new();

        while current > 0 {
            let (sibling, position) = if current % 2 == 0 {
                (current - 1, SiblingPosition::Left)
            } else {
                (current + 1, SiblingPosition::Right)
            };
            path.push(ProofNode {
                hash: self.nodes[sibling],
                position,
            });
            current = (current - 1) / 2;
        }

        Ok(path)
    }

    /// Recomputes the root from a leaf hash and sibling path and compares
    /// against `expected_root`. Order-sensitive: each path node states
    /// which side the sibling sits on.
    #[must_use]
    pub fn verify_path(leaf_hash: &Hash, path: &[ProofNode], expected_root: &Hash) -> bool {
        let mut current = *leaf_hash;
        for node in path {
            current = match node.position {
                SiblingPosition::Left => hash_pair(&node.hash, &current),
                SiblingPosition::Right => hash_pair(&current, &node.hash),
            };
        }
        current == *expected_root
    }
}

/// parent = keccak256(left || right)
fn hash_pair(left: &Hash, right: &Hash) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(left.as_bytes());
    hasher.update(right.as_bytes());
    Hash::new(hasher.finalize().into())
}

/// A single node in a proof path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofNode {
    /// The sibling hash at this level.
    pub hash: Hash,
    /// Which side the sibling sits on.
    pub position: SiblingPosition,
}

/// Position of a sibling relative to the node being proven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiblingPosition {
    /// Sibling is the left child; the proven node is on the right.
    Left,
    /// Sibling is the right child; the proven node is on the left.
    Right,
}

// =============================================================================
// TESTS
// =============================================================================
