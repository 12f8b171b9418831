//! Error types for the Module Packer.

use thiserror::Error;

/// Errors that can occur while packing modules.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PackingError {
    /// A module's size estimate exceeds the hard ceiling even after the
    /// single split pass. Fatal: requires a smaller per-module ceiling or
    /// manual decomposition, never silent truncation.
    #[error(
        "module {module} estimated at {size} bytes exceeds the {ceiling}-byte ceiling; \
         lower the function ceiling or decompose the source"
    )]
    SizeCeilingExceeded {
        module: String,
        size: usize,
        ceiling: usize,
    },

    /// A reserved introspection/routing function reached the packer. These
    /// stay centralized in the dedicated routing module and are never
    /// generated.
    #[error("reserved function '{signature}' must not be packed into module {module}")]
    ReservedFunction { module: String, signature: String },
}
