//! Source-unit rendering for generated facets.
//!
//! Every generated unit is self-contained: an isolated storage namespace
//! derived from the module name, no constructor, no constructor-supplied
//! state, and no shared mutable globals. Introspection and routing
//! functions are never rendered here; they live in the dedicated
//! centralized module that this tool does not generate.

use sha3::{Digest, Keccak256};
use shared_types::{FunctionDescriptor, Hash, Mutability};
use std::fmt::Write;

/// Domain-separation prefix for per-module storage slots.
const STORAGE_NAMESPACE_PREFIX: &str = "lapidary.storage.";

/// Derives the isolated storage slot for a module.
///
/// slot = keccak256("lapidary.storage." ++ module_name). Distinct module
/// names yield distinct slots, so packed modules cannot collide in storage.
#[must_use]
pub fn storage_slot_for(module_name: &str) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(STORAGE_NAMESPACE_PREFIX.as_bytes());
    hasher.update(module_name.as_bytes());
    Hash::new(hasher.finalize().into())
}

/// Renders the generated source unit for a module.
///
/// Output is a pure function of (name, functions): byte-identical on
/// rebuild from the same inputs.
#[must_use]
pub fn render_module(module_name: &str, functions: &[FunctionDescriptor]) -> String {
    let slot = storage_slot_for(module_name);
    let mut out = String::new();

    let _ = writeln!(out, "// Generated by lapidary. Do not edit.");
    let _ = writeln!(out, "// SPDX-License-Identifier: Unlicense");
    let _ = writeln!(out, "pragma solidity ^0.8.24;");
    let _ = writeln!(out);
    let _ = writeln!(out, "contract {module_name} {{");
    let _ = writeln!(
        out,
        "    // Isolated namespace: keccak256(\"{STORAGE_NAMESPACE_PREFIX}{module_name}\")"
    );
    let _ = writeln!(
        out,
        "    bytes32 internal constant STORAGE_SLOT = {};",
        slot.to_hex()
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "    struct Layout {{");
    let _ = writeln!(out, "        mapping(bytes32 => bytes32) values;");
    let _ = writeln!(out, "    }}");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "    function _layout() internal pure returns (Layout storage l) {{"
    );
    let _ = writeln!(out, "        bytes32 slot = STORAGE_SLOT;");
    let _ = writeln!(out, "        assembly {{ l.slot := slot }}");
    let _ = writeln!(out, "    }}");

    for function in functions {
        let _ = writeln!(out);
        let params = function
            .params
            .iter()
            .enumerate()
            .map(|(i, t)| format!("{t} arg{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let mutability = match function.mutability {
            Mutability::Pure => " pure",
            Mutability::View => " view",
            Mutability::Nonpayable => "",
            Mutability::Payable => " payable",
        };
        let _ = writeln!(
            out,
            "    function {}({params}) external{mutability} {{",
            function.name
        );
        let _ = writeln!(out, "        // body supplied by the source template");
        let _ = writeln!(out, "    }}");
    }

    let _ = writeln!(out, "}}");
    out
}

/// Content hash over a rendered source unit.
#[must_use]
pub fn codehash_for(source: &str) -> Hash {
    Hash::new(Keccak256::digest(source.as_bytes()).into())
}
