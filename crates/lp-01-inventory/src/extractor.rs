//! Inventory extraction from compiler-supplied function lists.
//!
//! The external compiler collaborator hands over one [`RawUnit`] per
//! compilation unit. Extraction is a pure transform: same input, same
//! inventory, every build.

use crate::error::InventoryError;
use serde::{Deserialize, Serialize};
use shared_types::descriptors::canonical_type;
use shared_types::{FunctionDescriptor, Mutability, Visibility, Warning, Warnings};
use tracing::debug;

/// One parameter as reported by the compiler collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawParam {
    /// Raw type name, possibly carrying data-location qualifiers.
    #[serde(rename = "type")]
    pub type_name: String,
}

/// One function as reported by the compiler collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFunction {
    /// Function name.
    pub name: String,
    /// Ordered parameters.
    pub inputs: Vec<RawParam>,
    /// Mutability, if the parser recorded one.
    #[serde(rename = "stateMutability")]
    pub state_mutability: Option<String>,
    /// Visibility keyword.
    pub visibility: String,
}

/// A parsed compilation unit: a name plus its flat function list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawUnit {
    /// Unit (contract) name.
    pub name: String,
    /// Functions in declaration order.
    pub functions: Vec<RawFunction>,
}

/// Extracts the canonical function inventory from a compilation unit.
///
/// Internal and private functions are dropped: they have no selector and
/// never route through the dispatcher. Declaration order is preserved for
/// the functions that remain.
///
/// ## Errors
///
/// Rejects empty or non-identifier function names, empty parameter types,
/// and unknown mutability/visibility strings before any hashing happens.
pub fn extract_inventory(
    unit: &RawUnit,
) -> Result<(Vec<FunctionDescriptor>, Warnings), InventoryError> {
    let mut inventory = Vec::with_capacity(unit.functions.len());
    let mut warnings = Warnings::new();

    for (index, function) in unit.functions.iter().enumerate() {
        if function.name.is_empty() {
            return Err(InventoryError::EmptyFunctionName {
                unit: unit.name.clone(),
                index,
            });
        }
        if !is_identifier(&function.name) {
            return Err(InventoryError::InvalidFunctionName {
                unit: unit.name.clone(),
                name: function.name.clone(),
            });
        }

        let visibility = parse_visibility(&unit.name, &function.name, &function.visibility)?;
        if !visibility.is_externally_callable() {
            continue;
        }

        let mut params = Vec::with_capacity(function.inputs.len());
        for (param_index, param) in function.inputs.iter().enumerate() {
            let canonical = canonical_type(&param.type_name);
            if canonical.is_empty() {
                return Err(InventoryError::EmptyParameterType {
                    unit: unit.name.clone(),
                    name: function.name.clone(),
                    index: param_index,
                });
            }
            params.push(canonical);
        }

        let mutability = match function.state_mutability.as_deref() {
            Some(raw) => parse_mutability(&unit.name, &function.name, raw)?,
            None => {
                let descriptor_signature =
                    format!("{}({})", function.name, params.join(","));
                warnings.push(Warning::MissingMutability {
                    signature: descriptor_signature,
                });
                Mutability::Nonpayable
            }
        };

        inventory.push(FunctionDescriptor {
            name: function.name.clone(),
            params,
            mutability,
            visibility,
        });
    }

    debug!(
        unit = %unit.name,
        declared = unit.functions.len(),
        extracted = inventory.len(),
        "extracted function inventory"
    );

    Ok((inventory, warnings))
}

/// Checks that a name is a plain identifier: `[A-Za-z_][A-Za-z0-9_]*`.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn parse_mutability(unit: &str, name: &str, raw: &str) -> Result<Mutability, InventoryError> {
    match raw {
        "pure" => Ok(Mutability::Pure),
        "view" => Ok(Mutability::View),
        "nonpayable" => Ok(Mutability::Nonpayable),
        "payable" => Ok(Mutability::Payable),
        other => Err(InventoryError::UnknownMutability {
            unit: unit.to_string(),
            name: name.to_string(),
            value: other.to_string(),
        }),
    }
}

fn parse_visibility(unit: &str, name: &str, raw: &str) -> Result<Visibility, InventoryError> {
    match raw {
        "public" => Ok(Visibility::Public),
        "external" => Ok(Visibility::External),
        "internal" => Ok(Visibility::Internal),
        "private" => Ok(Visibility::Private),
        other => Err(InventoryError::UnknownVisibility {
            unit: unit.to_string(),
            name: name.to_string(),
            value: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("transfer"));
        assert!(is_identifier("_sweep"));
        assert!(is_identifier("getPrice2"));
        assert!(!is_identifier("2fast"));
        assert!(!is_identifier("has space"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn test_unknown_mutability_rejected() {
        let err = parse_mutability("Vault", "poke", "mutable").unwrap_err();
        assert!(matches!(err, InventoryError::UnknownMutability { .. }));
    }

    #[test]
    fn test_unknown_visibility_rejected() {
        let err = parse_visibility("Vault", "poke", "open").unwrap_err();
        assert!(matches!(err, InventoryError::UnknownVisibility { .. }));
    }

    #[test]
    fn test_raw_unit_deserializes_from_abi_shape() {
        let json = r#"{
            "name": "Vault",
            "functions": [
                {
                    "name": "deposit",
                    "inputs": [{"type": "uint256"}],
                    "stateMutability": "payable",
                    "visibility": "external"
                }
            ]
        }"#;
        let unit: RawUnit = serde_json::from_str(json).unwrap();
        assert_eq!(unit.functions[0].name, "deposit");
        assert_eq!(unit.functions[0].inputs[0].type_name, "uint256");
    }
}
