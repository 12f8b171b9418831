//! Chained CREATE2 address derivation.
//!
//! Salt encodings are fixed-width and versioned, shared by both stages:
//!
//! ```text
//! factory_salt   = keccak256("lapidary.salt.factory." ++ version)
//! universal_salt = keccak256(0x01 ++ deployer(20) ++ keccak256(label)(32)
//!                            ++ nonce_be(8) ++ keccak256(version)(32))
//! ```

use crate::error::AddressError;
use sha3::{Digest, Keccak256};
use shared_types::{Address, Hash};

/// Domain-separation prefix for the bootstrap-factory salt.
const FACTORY_SALT_PREFIX: &str = "lapidary.salt.factory.";

/// Version byte prefixed to the universal-salt preimage.
const UNIVERSAL_SALT_VERSION: u8 = 0x01;

// =============================================================================
// SALT CONSTRUCTORS
// =============================================================================

/// Stage-1 salt: a pure function of the version string.
pub fn factory_salt(version: &str) -> Result<Hash, AddressError> {
    if version.is_empty() {
        return Err(AddressError::EmptyVersion);
    }
    let mut hasher = Keccak256::new();
    hasher.update(FACTORY_SALT_PREFIX.as_bytes());
    hasher.update(version.as_bytes());
    Ok(Hash::new(hasher.finalize().into()))
}

/// Stage-2 salt: bound to the deploying factory, a content label, a
/// monotonic nonce, and the version string.
pub fn universal_salt(
    deployer: Address,
    content_label: &str,
    nonce: u64,
    version: &str,
) -> Result<Hash, AddressError> {
    if deployer.is_zero() {
        return Err(AddressError::ZeroDeployer);
    }
    if content_label.is_empty() {
        return Err(AddressError::EmptyContentLabel);
    }
    if version.is_empty() {
        return Err(AddressError::EmptyVersion);
    }

    let label_hash: [u8; 32] = Keccak256::digest(content_label.as_bytes()).into();
    let version_hash: [u8; 32] = Keccak256::digest(version.as_bytes()).into();

    let mut preimage = [0u8; 93];
    preimage[0] = UNIVERSAL_SALT_VERSION;
    preimage[1..21].copy_from_slice(deployer.as_bytes());
    preimage[21..53].copy_from_slice(&label_hash);
    preimage[53..61].copy_from_slice(&nonce.to_be_bytes());
    preimage[61..93].copy_from_slice(&version_hash);

    Ok(Hash::new(Keccak256::digest(preimage).into()))
}

// =============================================================================
// ADDRESS PREDICTION
// =============================================================================

/// Hashes init code, rejecting empty code before hashing.
pub fn init_code_hash(init_code: &[u8]) -> Result<Hash, AddressError> {
    if init_code.is_empty() {
        return Err(AddressError::EmptyInitCode);
    }
    Ok(Hash::new(Keccak256::digest(init_code).into()))
}

/// The EIP-1014 address rule:
/// `keccak256(0xff ++ deployer ++ salt ++ initCodeHash)[12..]`.
pub fn predict(
    deployer: Address,
    salt: Hash,
    init_code_hash: Hash,
) -> Result<Address, AddressError> {
    if deployer.is_zero() {
        return Err(AddressError::ZeroDeployer);
    }

    let mut data = [0u8; 85];
    data[0] = 0xff;
    data[1..21].copy_from_slice(deployer.as_bytes());
    data[21..53].copy_from_slice(salt.as_bytes());
    data[53..85].copy_from_slice(init_code_hash.as_bytes());

    let hash = Keccak256::digest(data);
    let mut addr = [0u8; 20];
    addr.copy_from_slice(&hash[12..32]);
    Ok(Address::new(addr))
}

/// Stage 1: predicts the bootstrap factory address.
pub fn predict_factory(
    singleton_deployer: Address,
    version: &str,
    factory_init_code: &[u8],
) -> Result<Address, AddressError> {
    let salt = factory_salt(version)?;
    let code_hash = init_code_hash(factory_init_code)?;
    predict(singleton_deployer, salt, code_hash)
}

/// Stage 2: predicts a target module address deployed through the
/// Stage-1 factory.
pub fn predict_module(
    factory: Address,
    content_label: &str,
    nonce: u64,
    version: &str,
    module_init_code: &[u8],
) -> Result<Address, AddressError> {
    let salt = universal_salt(factory, content_label, nonce, version)?;
    let code_hash = init_code_hash(module_init_code)?;
    predict(factory, salt, code_hash)
}

// =============================================================================
// TESTS
// =============================================================================
