//! Error types for the Selector Engine.

use thiserror::Error;

/// Errors that can occur while computing selectors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectorError {
    /// A raw signature string was not of the form `name(type1,type2,...)`.
    #[error("malformed signature: '{0}'")]
    MalformedSignature(String),

    /// A raw signature string had an empty function name.
    #[error("signature has empty function name: '{0}'")]
    EmptySignatureName(String),
}
