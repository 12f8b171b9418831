//! Error types for the Deterministic Address Resolver.

use thiserror::Error;

/// Input errors rejected before any hashing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// Init code must not be empty; an empty deployment is meaningless and
    /// its hash would silently pin the empty-code hash.
    #[error("init code is empty")]
    EmptyInitCode,

    /// The deployer address is the zero address.
    #[error("deployer is the zero address")]
    ZeroDeployer,

    /// The content label is empty; labels participate in salt derivation
    /// and an empty label would alias distinct deployments.
    #[error("content label is empty")]
    EmptyContentLabel,

    /// The version string is empty.
    #[error("version string is empty")]
    EmptyVersion,
}
