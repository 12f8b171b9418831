//! Error types for the Manifest Diff & Policy Gate.

use thiserror::Error;

/// Errors that can occur while preparing manifests for diffing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DiffError {
    /// A persisted manifest carried a selector string that is not 4-byte hex.
    #[error("module {module}: malformed selector '{selector}'")]
    MalformedSelector { module: String, selector: String },
}
