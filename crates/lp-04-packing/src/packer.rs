//! Bucket splitting and module packing.
//!
//! Splitting is stable and reproducible: ⌈N/ceiling⌉ chunks in original
//! order, ordinal suffixes A, B, C, ... No function is ever reordered
//! across a split boundary, lost, or duplicated.

use crate::error::PackingError;
use crate::estimate::{estimate_compiled_size, estimate_deploy_gas};
use crate::module::PackedModule;
use crate::render::{codehash_for, render_module, storage_slot_for};
use lp_02_selectors::selector_for_descriptor;
use lp_03_bucketing::Buckets;
use shared_types::{FunctionDescriptor, PipelineConfig, Warning, Warnings};
use tracing::{info, warn};

// =============================================================================
// SPLITTING
// =============================================================================

/// Ordinal suffix for chunk `index`: A..Z, then AA, AB, ...
fn ordinal_suffix(index: usize) -> String {
    let mut n = index;
    let mut out = Vec::new();
    loop {
        out.push(b'A' + (n % 26) as u8);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    out.reverse();
    // SAFETY: built from ASCII letters only
    String::from_utf8(out).unwrap_or_default()
}

/// Name for chunk `index` of `chunk_count` chunks from `base`.
///
/// A single-chunk bucket keeps the bare base name; split buckets get
/// ordinal suffixes.
#[must_use]
pub fn ordinal_name(base: &str, index: usize, chunk_count: usize) -> String {
    if chunk_count <= 1 {
        base.to_string()
    } else {
        format!("{base}{}", ordinal_suffix(index))
    }
}

/// Splits a bucket into ⌈N/ceiling⌉ chunks, preserving original order.
#[must_use]
pub fn split_bucket(
    functions: &[FunctionDescriptor],
    ceiling: usize,
) -> Vec<Vec<FunctionDescriptor>> {
    functions
        .chunks(ceiling.max(1))
        .map(<[FunctionDescriptor]>::to_vec)
        .collect()
}

// =============================================================================
// PACKING
// =============================================================================

/// Packs every non-empty bucket into deployable modules.
///
/// ## Errors
///
/// - [`PackingError::ReservedFunction`] if a centralized introspection or
///   routing signature reached the packer input.
/// - [`PackingError::SizeCeilingExceeded`] if any chunk's size estimate
///   exceeds the hard ceiling after the split pass. The pipeline fails
///   instead of truncating.
pub fn pack_buckets(
    buckets: &Buckets,
    config: &PipelineConfig,
) -> Result<(Vec<PackedModule>, Warnings), PackingError> {
    let mut modules = Vec::new();
    let mut warnings = Warnings::new();

    for (category, bucket) in buckets.iter_non_empty() {
        let base = category.facet_base_name();

        for function in &bucket.functions {
            let signature = function.canonical_signature();
            if config.banned_signatures.contains(&signature) {
                return Err(PackingError::ReservedFunction {
                    module: base.to_string(),
                    signature,
                });
            }
        }

        let chunks = split_bucket(&bucket.functions, config.function_ceiling);
        let chunk_count = chunks.len();

        for (index, functions) in chunks.into_iter().enumerate() {
            let name = ordinal_name(base, index, chunk_count);

            let size_estimate = estimate_compiled_size(&functions);
            if size_estimate > config.size_ceiling {
                return Err(PackingError::SizeCeilingExceeded {
                    module: name,
                    size: size_estimate,
                    ceiling: config.size_ceiling,
                });
            }
            if size_estimate >= config.near_ceiling_bytes() {
                warn!(module = %name, size = size_estimate, "module is near the size ceiling");
                warnings.push(Warning::NearSizeCeiling {
                    module: name.clone(),
                    size: size_estimate,
                    ceiling: config.size_ceiling,
                });
            }

            let selectors = functions.iter().map(selector_for_descriptor).collect();
            let source = render_module(&name, &functions);
            let gas_estimate = estimate_deploy_gas(source.as_bytes());
            let codehash = codehash_for(&source);
            let storage_slot = storage_slot_for(&name);

            info!(
                module = %name,
                functions = functions.len(),
                size = size_estimate,
                "packed module"
            );

            modules.push(PackedModule {
                name,
                category,
                storage_slot,
                functions,
                selectors,
                source,
                size_estimate,
                gas_estimate,
                codehash,
                policy_notes: vec![
                    "no shared mutable state".to_string(),
                    "storage isolated".to_string(),
                    "no constructor-time state".to_string(),
                ],
            });
        }
    }

    Ok((modules, warnings))
}

// =============================================================================
// TESTS
// =============================================================================
