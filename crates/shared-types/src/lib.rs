//! # Shared Types Crate
//!
//! This crate contains the value objects, function descriptors, and the
//! explicit pipeline configuration shared by every Lapidary subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Explicit Configuration**: Size ceilings, banned selectors, and the
//!   singleton deployer address travel inside `PipelineConfig`; no stage
//!   reads ambient environment state.
//! - **Immutable Values**: Descriptors and value objects never mutate after
//!   construction; rebuilds replace, they do not patch.

pub mod config;
pub mod descriptors;
pub mod value_objects;
pub mod warnings;

pub use config::{ConfigError, PipelineConfig};
pub use descriptors::{FunctionDescriptor, Mutability, Visibility};
pub use value_objects::{Address, Hash, Selector};
pub use warnings::{Warning, Warnings};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
