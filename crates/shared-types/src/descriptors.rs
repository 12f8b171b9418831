//! # Function Descriptors
//!
//! The flat function inventory produced from a compilation unit's abstract
//! syntax. A descriptor is immutable once extracted; identity is the
//! canonical signature string `name(type1,type2,...)`.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// MUTABILITY & VISIBILITY
// =============================================================================

/// State mutability of a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mutability {
    /// Reads neither state nor environment.
    Pure,
    /// Reads state, never writes it.
    View,
    /// May write state, rejects attached value.
    Nonpayable,
    /// May write state and accept attached value.
    Payable,
}

impl Mutability {
    /// Returns true for `pure` and `view` (read-only) mutability.
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        matches!(self, Self::Pure | Self::View)
    }
}

/// Visibility of a function within a compilation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Callable externally and internally.
    Public,
    /// Callable externally only.
    External,
    /// Callable from this unit and derived units.
    Internal,
    /// Callable from this unit only.
    Private,
}

impl Visibility {
    /// Returns true if the function is part of the external call surface
    /// and therefore needs a selector.
    #[must_use]
    pub const fn is_externally_callable(&self) -> bool {
        matches!(self, Self::Public | Self::External)
    }
}

// =============================================================================
// PARAMETER TYPE CANONICALIZATION
// =============================================================================

/// Canonicalizes a single parameter type name.
///
/// - strips `memory` / `calldata` / `storage` data-location qualifiers
/// - normalizes `address payable` to `address`
/// - removes all interior whitespace
///
/// The canonical form is the only form that participates in selector
/// hashing; two spellings of the same type must canonicalize identically.
#[must_use]
pub fn canonical_type(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for token in raw.split_whitespace() {
        match token {
            "memory" | "calldata" | "storage" => {}
            "payable" if out.ends_with("address") => {}
            _ => out.push_str(token),
        }
    }
    out
}

// =============================================================================
// FUNCTION DESCRIPTOR
// =============================================================================

/// A single function extracted from a compilation unit.
///
/// Parameter types are stored in canonical form (see [`canonical_type`]).
/// Descriptors are value objects: derived fresh on every build, never
/// mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionDescriptor {
    /// Function name.
    pub name: String,
    /// Ordered canonical parameter type names.
    pub params: Vec<String>,
    /// State mutability.
    pub mutability: Mutability,
    /// Visibility.
    pub visibility: Visibility,
}

impl FunctionDescriptor {
    /// Creates a descriptor, canonicalizing every parameter type.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        params: &[&str],
        mutability: Mutability,
        visibility: Visibility,
    ) -> Self {
        Self {
            name: name.into(),
            params: params.iter().map(|p| canonical_type(p)).collect(),
            mutability,
            visibility,
        }
    }

    /// Returns the canonical signature `name(type1,type2,...)`.
    ///
    /// This string is the descriptor's identity and the sole input to
    /// selector hashing.
    #[must_use]
    pub fn canonical_signature(&self) -> String {
        format!("{}({})", self.name, self.params.join(","))
    }
}

impl fmt::Display for FunctionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_signature())
    }
}

// =============================================================================
// TESTS
// =============================================================================
