//! # Lapidary Test Suite
//!
//! Unified test crate for scenarios that span multiple pipeline stages.
//! Single-stage behavior is tested inside each stage crate; everything
//! here drives two or more stages together.
//!
//! ## Structure
//!
//! ```text
//! tests/src/integration/
//! ├── pipeline_e2e.rs   # full extract → manifest runs
//! ├── addressing.rs     # manifest → CREATE2 address chains
//! ├── diff_gate.rs      # upgrade diffs and gate verdicts
//! └── ports_flow.rs     # compiler/chain-client port choreography
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p lapidary-tests
//!
//! # By scenario
//! cargo test -p lapidary-tests integration::pipeline_e2e
//! cargo test -p lapidary-tests integration::diff_gate
//! ```

#![allow(dead_code)]

pub mod integration;
