//! In-process port implementations for dry runs and tests.
//!
//! Neither adapter talks to a real toolchain or node. The fixture compiler
//! replays pre-registered artifacts keyed by source hash; the dry-run
//! chain client accepts everything, synthesizes receipts, and keeps a
//! transcript so callers can assert on what would have been sent.

use crate::ports::{
    ChainClientPort, ChainError, CompileError, CompiledArtifact, CompilerPort, TxReceipt,
    TxRequest,
};
use lp_06_addressing::init_code_hash;
use shared_types::Hash;
use sha3::{Digest, Keccak256};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::info;

fn source_hash(source: &str) -> Hash {
    Hash::new(Keccak256::digest(source.as_bytes()).into())
}

/// A compiler port that replays registered artifacts.
#[derive(Debug, Default)]
pub struct FixtureCompiler {
    artifacts: HashMap<Hash, CompiledArtifact>,
}

impl FixtureCompiler {
    /// Creates an empty fixture set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the artifact to replay for a source unit.
    pub fn register(&mut self, source: &str, artifact: CompiledArtifact) {
        self.artifacts.insert(source_hash(source), artifact);
    }
}

#[async_trait::async_trait]
impl CompilerPort for FixtureCompiler {
    async fn compile(&self, source: &str) -> Result<CompiledArtifact, CompileError> {
        let hash = source_hash(source);
        self.artifacts
            .get(&hash)
            .cloned()
            .ok_or(CompileError::UnknownUnit { source_hash: hash })
    }
}

/// A chain client that records requests instead of broadcasting them.
///
/// Receipts are synthetic: the transaction hash is the keccak of the
/// payload, and deployments report a deterministic stand-in address
/// derived from the init code.
#[derive(Debug, Default)]
pub struct DryRunChainClient {
    transcript: Mutex<Vec<TxRequest>>,
}

impl DryRunChainClient {
    /// Creates an empty dry-run client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything submitted so far, in order.
    pub fn transcript(&self) -> Vec<TxRequest> {
        match self.transcript.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait::async_trait]
impl ChainClientPort for DryRunChainClient {
    async fn submit(&self, request: TxRequest) -> Result<TxReceipt, ChainError> {
        if request.to.is_none() && request.data.is_empty() {
            return Err(ChainError::Rejected {
                message: format!("deployment '{}' has empty init code", request.label),
            });
        }

        let tx_hash = Hash::new(Keccak256::digest(&request.data).into());
        // A dry-run deployment reports the init-code hash's tail as a
        // stand-in address so transcripts stay deterministic.
        let deployed = if request.to.is_none() {
            let code_hash = init_code_hash(&request.data)
                .map_err(|e| ChainError::Rejected {
                    message: e.to_string(),
                })?;
            let mut bytes = [0u8; 20];
            bytes.copy_from_slice(&code_hash.as_bytes()[12..32]);
            Some(shared_types::Address::new(bytes))
        } else {
            None
        };

        info!(label = %request.label, tx = %tx_hash, "dry-run submit");

        match self.transcript.lock() {
            Ok(mut guard) => guard.push(request),
            Err(poisoned) => poisoned.into_inner().push(request),
        }

        Ok(TxReceipt {
            tx_hash,
            deployed,
            success: true,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use lp_01_inventory::RawUnit;

    fn artifact() -> CompiledArtifact {
        CompiledArtifact {
            unit: RawUnit {
                name: "Vault".to_string(),
                functions: vec![],
            },
            init_code: vec![0x60, 0x00, 0x60, 0x00, 0xfd],
        }
    }

    #[tokio::test]
    async fn test_fixture_compiler_replays_registered_artifact() {
        let mut compiler = FixtureCompiler::new();
        compiler.register("contract Vault {}", artifact());

        let compiled = compiler.compile("contract Vault {}").await.unwrap();
        assert_eq!(compiled, artifact());
    }

    #[tokio::test]
    async fn test_fixture_compiler_rejects_unknown_source() {
        let compiler = FixtureCompiler::new();
        assert!(matches!(
            compiler.compile("contract Unknown {}").await,
            Err(CompileError::UnknownUnit { .. })
        ));
    }

    #[tokio::test]
    async fn test_dry_run_client_keeps_a_transcript() {
        let client = DryRunChainClient::new();
        let receipt = client
            .submit(TxRequest {
                to: None,
                data: vec![0x60, 0x00, 0x60, 0x00, 0xfd],
                label: "deploy AdminFacet".to_string(),
            })
            .await
            .unwrap();

        assert!(receipt.success);
        assert!(receipt.deployed.is_some());
        assert_eq!(client.transcript().len(), 1);
        assert_eq!(client.transcript()[0].label, "deploy AdminFacet");
    }

    #[tokio::test]
    async fn test_dry_run_client_rejects_empty_deployment() {
        let client = DryRunChainClient::new();
        let result = client
            .submit(TxRequest {
                to: None,
                data: vec![],
                label: "deploy Nothing".to_string(),
            })
            .await;
        assert!(matches!(result, Err(ChainError::Rejected { .. })));
    }
}
