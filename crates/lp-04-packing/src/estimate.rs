//! Compiled-size and deployment-gas estimation.
//!
//! Size estimation is a deterministic heuristic over the function set; it
//! gates packing against the hard ceiling. Gas estimation follows the
//! standard transaction cost rule and is advisory only.

use shared_types::FunctionDescriptor;

/// Fixed bytecode overhead per module: dispatcher stub, storage-slot
/// constant, and contract scaffolding.
const MODULE_OVERHEAD_BYTES: usize = 220;

/// Bytecode overhead per function: selector compare, jump table entry,
/// and return path.
const FUNCTION_OVERHEAD_BYTES: usize = 96;

/// Bytecode cost per parameter: calldata decode and stack shuffling.
const PARAM_BYTES: usize = 34;

/// Approximate body cost per byte of the function name. Longer external
/// names correlate with richer bodies in the inventories this tool packs;
/// the constant is calibrated against compiled reference facets.
const NAME_BYTE_WEIGHT: usize = 8;

/// Estimates the compiled size of a module containing these functions.
///
/// Deterministic: same function set, same estimate, every build.
#[must_use]
pub fn estimate_compiled_size(functions: &[FunctionDescriptor]) -> usize {
    let body: usize = functions
        .iter()
        .map(|f| {
            FUNCTION_OVERHEAD_BYTES + f.params.len() * PARAM_BYTES + f.name.len() * NAME_BYTE_WEIGHT
        })
        .sum();
    MODULE_OVERHEAD_BYTES + body
}

/// Estimates deployment gas for a rendered unit.
///
/// Base contract-creation cost plus calldata gas: 16 per non-zero byte,
/// 4 per zero byte. Advisory; reported but never used for gating.
#[must_use]
pub fn estimate_deploy_gas(init_code: &[u8]) -> u64 {
    const CREATE_BASE_GAS: u64 = 53_000;
    let data_gas: u64 = init_code
        .iter()
        .map(|&byte| if byte == 0 { 4u64 } else { 16u64 })
        .sum();
    CREATE_BASE_GAS + data_gas
}
