//! # Value Objects
//!
//! Immutable domain primitives for the facet pipeline.
//! These types represent concepts that are defined by their value, not identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised when constructing a value object from raw bytes or hex.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// Input had the wrong byte length for the target type.
    #[error("wrong length for {kind}: got {got}, expected {expected}")]
    WrongLength {
        /// Name of the target type.
        kind: &'static str,
        /// Actual byte length.
        got: usize,
        /// Required byte length.
        expected: usize,
    },

    /// Input was not valid hex.
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

/// Strips an optional `0x` prefix and decodes the remainder as hex.
fn decode_hex(input: &str) -> Result<Vec<u8>, ValueError> {
    let stripped = input.strip_prefix("0x").unwrap_or(input);
    hex::decode(stripped).map_err(|e| ValueError::InvalidHex(e.to_string()))
}

// =============================================================================
// ADDRESS (20 bytes)
// =============================================================================

/// A 20-byte Ethereum-style address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The zero address (0x0000...0000).
    pub const ZERO: Self = Self([0u8; 20]);

    /// Creates an address from a 20-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Creates an address from a slice. Returns an error if wrong length.
    pub fn from_slice(slice: &[u8]) -> Result<Self, ValueError> {
        if slice.len() == 20 {
            let mut bytes = [0u8; 20];
            bytes.copy_from_slice(slice);
            Ok(Self(bytes))
        } else {
            Err(ValueError::WrongLength {
                kind: "Address",
                got: slice.len(),
                expected: 20,
            })
        }
    }

    /// Parses an address from a hex string, with or without a `0x` prefix.
    pub fn from_hex(input: &str) -> Result<Self, ValueError> {
        let bytes = decode_hex(input)?;
        Self::from_slice(&bytes)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Returns true if this is the zero address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Renders the address as a lowercase `0x`-prefixed hex string.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl From<Address> for [u8; 20] {
    fn from(addr: Address) -> Self {
        addr.0
    }
}

// =============================================================================
// HASH (32 bytes)
// =============================================================================

/// A 32-byte hash (Keccak-256 throughout this pipeline).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Hash(pub [u8; 32]);

impl Hash {
    /// The zero hash.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Creates a hash from a 32-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Creates a hash from a slice. Returns an error if wrong length.
    pub fn from_slice(slice: &[u8]) -> Result<Self, ValueError> {
        if slice.len() == 32 {
            let mut bytes = [0u8; 32];
            bytes.copy_from_slice(slice);
            Ok(Self(bytes))
        } else {
            Err(ValueError::WrongLength {
                kind: "Hash",
                got: slice.len(),
                expected: 32,
            })
        }
    }

    /// Parses a hash from a hex string, with or without a `0x` prefix.
    pub fn from_hex(input: &str) -> Result<Self, ValueError> {
        let bytes = decode_hex(input)?;
        Self::from_slice(&bytes)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns true if this is the zero hash.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Renders the hash as a lowercase `0x`-prefixed hex string.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 32]> for Hash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl From<Hash> for [u8; 32] {
    fn from(hash: Hash) -> Self {
        hash.0
    }
}

// =============================================================================
// SELECTOR (4 bytes)
// =============================================================================

/// A 4-byte function selector: the first four bytes of the Keccak-256 hash
/// of a canonical signature string.
///
/// ## Invariant
///
/// Two distinct signatures mapping to the same selector is a collision.
/// Collisions are surfaced, never silently resolved.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Selector(pub [u8; 4]);

impl Selector {
    /// Creates a selector from a 4-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Creates a selector from a slice. Returns an error if wrong length.
    pub fn from_slice(slice: &[u8]) -> Result<Self, ValueError> {
        if slice.len() == 4 {
            let mut bytes = [0u8; 4];
            bytes.copy_from_slice(slice);
            Ok(Self(bytes))
        } else {
            Err(ValueError::WrongLength {
                kind: "Selector",
                got: slice.len(),
                expected: 4,
            })
        }
    }

    /// Parses a selector from a hex string, with or without a `0x` prefix.
    pub fn from_hex(input: &str) -> Result<Self, ValueError> {
        let bytes = decode_hex(input)?;
        Self::from_slice(&bytes)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Renders the selector as a lowercase `0x`-prefixed hex string.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 4]> for Selector {
    fn from(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }
}

impl From<Selector> for [u8; 4] {
    fn from(sel: Selector) -> Self {
        sel.0
    }
}

// =============================================================================
// TESTS
// =============================================================================
