//! Error types for the Manifest Builder.

use lp_02_selectors::CollisionReport;
use shared_types::Selector;
use thiserror::Error;

/// Errors that can occur while building or persisting a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Two or more distinct signatures share a selector. Always fatal at
    /// build time; the signature sets are reported exactly, never resolved.
    #[error("selector collisions detected: {}", format_collisions(.0))]
    SelectorCollisions(Vec<CollisionReport>),

    /// A selector is owned by more than one module in the final manifest.
    #[error("selector {selector} owned by multiple modules: {modules:?}")]
    DuplicateOwnership {
        selector: Selector,
        modules: Vec<String>,
    },

    /// No modules were supplied; an empty manifest has no meaning.
    #[error("cannot build a manifest from zero modules")]
    NoModules,

    /// A proof was requested for a leaf index outside the tree.
    #[error("leaf index {index} out of range: tree has {leaf_count} leaves")]
    LeafIndexOutOfRange { index: usize, leaf_count: usize },

    /// An epoch commit would jump further than the dispatcher permits.
    #[error("epoch step too large: {from} -> {to} exceeds max step {max_step}")]
    EpochStepTooLarge { from: u64, to: u64, max_step: u64 },

    /// An epoch commit must move the epoch forward.
    #[error("epoch must increase: current {current}, proposed {proposed}")]
    EpochNotMonotonic { current: u64, proposed: u64 },

    /// A persisted manifest declared a different version than expected.
    #[error("manifest version mismatch: file has '{found}', expected '{expected}'")]
    VersionMismatch { found: String, expected: String },

    /// Filesystem failure while reading or writing a manifest.
    #[error("manifest I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON failure while encoding or decoding a manifest.
    #[error("manifest encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

fn format_collisions(collisions: &[CollisionReport]) -> String {
    collisions
        .iter()
        .map(|c| format!("{} <- [{}]", c.selector, c.signatures.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}
