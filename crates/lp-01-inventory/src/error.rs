//! Error types for the Function Inventory Extractor.

use thiserror::Error;

/// Errors that can occur while extracting a function inventory.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// A function arrived with an empty name.
    #[error("unit {unit}: function at index {index} has an empty name")]
    EmptyFunctionName { unit: String, index: usize },

    /// A function name contains characters outside the identifier set.
    #[error("unit {unit}: '{name}' is not a valid function identifier")]
    InvalidFunctionName { unit: String, name: String },

    /// A parameter type canonicalized to the empty string.
    #[error("unit {unit}: function '{name}' parameter {index} has an empty type")]
    EmptyParameterType {
        unit: String,
        name: String,
        index: usize,
    },

    /// The mutability string was present but not one of the known values.
    #[error("unit {unit}: function '{name}' has unknown mutability '{value}'")]
    UnknownMutability {
        unit: String,
        name: String,
        value: String,
    },

    /// The visibility string was not one of the known values.
    #[error("unit {unit}: function '{name}' has unknown visibility '{value}'")]
    UnknownVisibility {
        unit: String,
        name: String,
        value: String,
    },
}
