//! # LP-06 Deterministic Address Resolver
//!
//! **Stage ID:** 06
//!
//! ## Purpose
//!
//! Predicts deployment addresses across two dependent CREATE2 stages:
//!
//! 1. **Bootstrap factory**: the network-independent singleton deployer
//!    deploys the bootstrap factory at an address derived purely from the
//!    version string.
//! 2. **Target module**: the Stage-1 factory deploys each module at an
//!    address derived from {deployer, content label, monotonic nonce,
//!    version}.
//!
//! Both stages are pure functions of their inputs: no network calls, no
//! cached ground truth. The derivation must match the on-chain CREATE2
//! primitive bit-for-bit (EIP-1014):
//!
//! ```text
//! address = keccak256(0xff ++ deployer ++ salt ++ keccak256(init_code))[12..]
//! ```
//!
//! ## Error Policy
//!
//! Empty init code and zero deployer addresses are rejected before any
//! hashing happens.

pub mod error;
pub mod resolver;

pub use error::AddressError;
pub use resolver::{
    factory_salt, init_code_hash, predict, predict_factory, predict_module, universal_salt,
};
