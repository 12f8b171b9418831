//! Pipeline configuration and validation.
//!
//! Every ceiling, banned signature, and deployer address travels inside
//! `PipelineConfig`. The pipeline is reproducible given only its explicit
//! inputs; nothing is read from ambient environment state.

use crate::value_objects::Address;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// EIP-170 hard limit on deployable contract bytecode size (bytes).
pub const EIP170_SIZE_CEILING: usize = 24_576;

/// The network-independent singleton CREATE2 deployer.
pub const SINGLETON_DEPLOYER: Address = Address([
    0x4e, 0x59, 0xb4, 0x48, 0x47, 0xb3, 0x79, 0x57, 0x85, 0x88, 0x92, 0x0c, 0xa7, 0x8f, 0xbf,
    0x26, 0xc0, 0xb4, 0x95, 0x6c,
]);

/// Configuration errors raised at construction time.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("function ceiling must be >= 1, got {0}")]
    ZeroFunctionCeiling(usize),

    #[error("size ceiling {ceiling} exceeds the EIP-170 limit of {max} bytes")]
    SizeCeilingAboveLimit { ceiling: usize, max: usize },

    #[error("size ceiling must be >= 1, got {0}")]
    ZeroSizeCeiling(usize),

    #[error("near-ceiling threshold must be in 1..=100 percent, got {0}")]
    InvalidNearCeilingPercent(u8),

    #[error("version string must not be empty")]
    EmptyVersion,

    #[error("singleton deployer must not be the zero address")]
    ZeroDeployer,
}

/// Explicit configuration threaded through every pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Manifest/deployment version string (also salts address derivation).
    pub version: String,
    /// Maximum functions per packed module before ordinal splitting.
    pub function_ceiling: usize,
    /// Hard deployable-size ceiling in bytes (EIP-170).
    pub size_ceiling: usize,
    /// Percentage of `size_ceiling` at which a near-ceiling warning fires.
    pub near_ceiling_percent: u8,
    /// Canonical signatures reserved for the centralized introspection and
    /// routing module. These must never appear in a generated module.
    pub banned_signatures: Vec<String>,
    /// The singleton CREATE2 deployer used for the bootstrap factory stage.
    pub singleton_deployer: Address,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            version: "1.0.0".to_string(),
            function_ceiling: 20,
            size_ceiling: EIP170_SIZE_CEILING,
            near_ceiling_percent: 90,
            banned_signatures: vec![
                "facets()".to_string(),
                "facetAddress(bytes4)".to_string(),
                "facetAddresses()".to_string(),
                "facetFunctionSelectors(address)".to_string(),
                "supportsInterface(bytes4)".to_string(),
            ],
            singleton_deployer: SINGLETON_DEPLOYER,
        }
    }
}

impl PipelineConfig {
    /// Creates a configuration with a custom version string and validates it.
    pub fn for_version(version: impl Into<String>) -> Result<Self, ConfigError> {
        let config = Self {
            version: version.into(),
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configured bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version.is_empty() {
            return Err(ConfigError::EmptyVersion);
        }
        if self.function_ceiling == 0 {
            return Err(ConfigError::ZeroFunctionCeiling(self.function_ceiling));
        }
        if self.size_ceiling == 0 {
            return Err(ConfigError::ZeroSizeCeiling(self.size_ceiling));
        }
        if self.size_ceiling > EIP170_SIZE_CEILING {
            return Err(ConfigError::SizeCeilingAboveLimit {
                ceiling: self.size_ceiling,
                max: EIP170_SIZE_CEILING,
            });
        }
        if self.near_ceiling_percent == 0 || self.near_ceiling_percent > 100 {
            return Err(ConfigError::InvalidNearCeilingPercent(
                self.near_ceiling_percent,
            ));
        }
        if self.singleton_deployer.is_zero() {
            return Err(ConfigError::ZeroDeployer);
        }
        Ok(())
    }

    /// Byte size at which the near-ceiling warning fires.
    #[must_use]
    pub fn near_ceiling_bytes(&self) -> usize {
        self.size_ceiling * usize::from(self.near_ceiling_percent) / 100
    }
}
