//! Cross-stage integration scenarios.

pub mod addressing;
pub mod diff_gate;
pub mod pipeline_e2e;
pub mod ports_flow;

use lp_01_inventory::{RawFunction, RawParam, RawUnit};

/// Builds an ABI-shaped function for scenario units.
pub fn raw_function(name: &str, types: &[&str], mutability: &str) -> RawFunction {
    RawFunction {
        name: name.to_string(),
        inputs: types
            .iter()
            .map(|t| RawParam {
                type_name: (*t).to_string(),
            })
            .collect(),
        state_mutability: Some(mutability.to_string()),
        visibility: "external".to_string(),
    }
}

/// The 25-function reference unit: 5 administrative functions plus 20
/// read-only quote functions.
pub fn reference_unit() -> RawUnit {
    let mut functions = vec![
        raw_function("pause", &[], "nonpayable"),
        raw_function("upgradeTo", &["address"], "nonpayable"),
        raw_function("setOwner", &["address"], "nonpayable"),
        raw_function("commitRoot", &["bytes32", "uint64"], "nonpayable"),
        raw_function("applyRoot", &["uint64"], "nonpayable"),
    ];
    for i in 0..20 {
        functions.push(raw_function(&format!("quoteStep{i}"), &["uint256"], "view"));
    }
    RawUnit {
        name: "Treasury".to_string(),
        functions,
    }
}
