//! # Lapidary Runtime
//!
//! Orchestrates the seven pipeline stages into one run and owns the async
//! boundary to the external collaborators (compiler, chain client).
//!
//! ## Structure
//!
//! - `pipeline` - the staged extract → select → bucket → pack → manifest run
//! - `ports` - collaborator contracts (driven ports)
//! - `adapters` - in-process port implementations for dry runs and tests
//!
//! The stage crates stay pure and synchronous; only the collaborator ports
//! are async. Configuration is explicit ([`shared_types::PipelineConfig`])
//! and travels with the pipeline instance, never through globals.

pub mod adapters;
pub mod pipeline;
pub mod ports;

pub use adapters::{DryRunChainClient, FixtureCompiler};
pub use pipeline::{Pipeline, PipelineError, PipelineOutput};
pub use ports::{
    ChainClientPort, ChainError, CompileError, CompiledArtifact, CompilerPort, TxReceipt,
    TxRequest,
};
