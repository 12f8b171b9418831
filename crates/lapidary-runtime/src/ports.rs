//! # Collaborator Ports (Driven Ports)
//!
//! Contracts for the two external collaborators the pipeline talks to:
//! the compiler toolchain and the chain client. The pipeline itself never
//! compiles and never signs or broadcasts; it consumes compiler output and
//! hands finished payloads to whatever implements these ports.
//!
//! Failures cross the boundary as errors and abort the run. There is no
//! partial output on a failed collaborator call.

use lp_01_inventory::RawUnit;
use shared_types::{Address, Hash};
use thiserror::Error;

/// Output of one compiler invocation: the ABI-shaped function list the
/// inventory stage consumes, plus the deployable init code the address
/// resolver hashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledArtifact {
    /// Parsed function list in ABI shape.
    pub unit: RawUnit,
    /// CREATE2 init code for the compiled unit.
    pub init_code: Vec<u8>,
}

/// Abstract interface to the compiler toolchain.
#[async_trait::async_trait]
pub trait CompilerPort: Send + Sync {
    /// Compiles one source unit to its ABI and init code.
    async fn compile(&self, source: &str) -> Result<CompiledArtifact, CompileError>;
}

/// A transaction handed to the chain client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxRequest {
    /// Target address; `None` for a deployment.
    pub to: Option<Address>,
    /// Calldata or init code.
    pub data: Vec<u8>,
    /// Operator-facing label for logs and receipts.
    pub label: String,
}

/// What the chain client reports back for a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    /// Transaction hash.
    pub tx_hash: Hash,
    /// Address of the deployed contract, when the request was a deployment.
    pub deployed: Option<Address>,
    /// Whether execution succeeded.
    pub success: bool,
}

/// Abstract interface to the chain client.
#[async_trait::async_trait]
pub trait ChainClientPort: Send + Sync {
    /// Submits a transaction and waits for its receipt.
    async fn submit(&self, request: TxRequest) -> Result<TxReceipt, ChainError>;
}

/// Compiler invocation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CompileError {
    /// The toolchain does not know the requested unit.
    #[error("unknown compilation unit (source hash {source_hash})")]
    UnknownUnit {
        /// Hash of the submitted source.
        source_hash: Hash,
    },
    /// The toolchain rejected the source.
    #[error("compilation failed: {message}")]
    Failed {
        /// Toolchain diagnostic output.
        message: String,
    },
}

/// Chain client errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChainError {
    /// The node rejected the transaction outright.
    #[error("transaction rejected: {message}")]
    Rejected {
        /// Node diagnostic output.
        message: String,
    },
    /// The transaction was mined but reverted.
    #[error("transaction '{label}' reverted")]
    Reverted {
        /// Label of the failed request.
        label: String,
    },
    /// No receipt arrived in time.
    #[error("timed out waiting for receipt of '{label}'")]
    Timeout {
        /// Label of the pending request.
        label: String,
    },
}
