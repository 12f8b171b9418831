//! The ordered classification rule table.
//!
//! Rules are evaluated top-to-bottom; the first matching rule assigns the
//! category. The table is plain data so individual rules are testable in
//! isolation and new rules slot in without touching the classifier.

use crate::category::{Buckets, Category};
use serde::{Deserialize, Serialize};
use shared_types::{FunctionDescriptor, Warning, Warnings};
use tracing::debug;

// =============================================================================
// PREDICATES & RULES
// =============================================================================

/// A single classification predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Predicate {
    /// Lowercased name contains any of the keywords.
    NameContainsAny {
        /// Keywords, all lowercase.
        keywords: Vec<String>,
    },
    /// Mutability is `view` or `pure`.
    ReadOnly,
    /// Name starts with any of the prefixes.
    NamePrefixAny {
        /// Prefixes, matched case-sensitively against the raw name.
        prefixes: Vec<String>,
    },
    /// Name equals this string exactly.
    ExactName {
        /// The exact name.
        name: String,
    },
}

/// Outcome of evaluating one predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Match {
    /// Predicate did not match.
    None,
    /// Predicate matched cleanly.
    Clean,
    /// A keyword matched on an interior substring that does not start a
    /// camelCase or snake_case word. Classification stands, but the hit is
    /// warning-worthy (the keyword heuristic can misfire).
    Suspicious {
        /// The keyword that fired.
        keyword: String,
    },
}

impl Predicate {
    /// Evaluates this predicate against a descriptor.
    #[must_use]
    pub fn evaluate(&self, descriptor: &FunctionDescriptor) -> Match {
        match self {
            Self::NameContainsAny { keywords } => {
                let lowered = descriptor.name.to_ascii_lowercase();
                for keyword in keywords {
                    if let Some(pos) = lowered.find(keyword.as_str()) {
                        if is_word_boundary(&descriptor.name, pos) {
                            return Match::Clean;
                        }
                        return Match::Suspicious {
                            keyword: keyword.clone(),
                        };
                    }
                }
                Match::None
            }
            Self::ReadOnly => {
                if descriptor.mutability.is_read_only() {
                    Match::Clean
                } else {
                    Match::None
                }
            }
            Self::NamePrefixAny { prefixes } => {
                if prefixes.iter().any(|p| descriptor.name.starts_with(p)) {
                    Match::Clean
                } else {
                    Match::None
                }
            }
            Self::ExactName { name } => {
                if descriptor.name == *name {
                    Match::Clean
                } else {
                    Match::None
                }
            }
        }
    }
}

/// Returns true if the match at `pos` begins a word: start of the name,
/// after an underscore, or at an uppercase (camelCase) letter.
fn is_word_boundary(name: &str, pos: usize) -> bool {
    if pos == 0 {
        return true;
    }
    let bytes = name.as_bytes();
    bytes[pos - 1] == b'_' || bytes[pos].is_ascii_uppercase()
}

/// One (predicate, category) pair in the rule table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// The predicate to evaluate.
    pub predicate: Predicate,
    /// Category assigned when the predicate matches.
    pub category: Category,
}

// =============================================================================
// RULE TABLE
// =============================================================================

/// The ordered rule table plus the fallthrough category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTable {
    /// Rules in evaluation order.
    pub rules: Vec<Rule>,
    /// Category assigned when no rule matches.
    pub default_category: Category,
}

impl RuleTable {
    /// The standard table. Precedence:
    ///
    /// 1. administrative/governance/lifecycle keywords
    /// 2. read-only mutability
    /// 3. `get`/`preview`/`facet` name prefixes
    /// 4. the standard interface-introspection function
    /// 5. routing/dispatch keywords
    /// 6. pricing/math keywords
    /// 7. default: core
    #[must_use]
    pub fn standard() -> Self {
        let keywords = |words: &[&str]| Predicate::NameContainsAny {
            keywords: words.iter().map(|w| (*w).to_string()).collect(),
        };
        Self {
            rules: vec![
                Rule {
                    predicate: keywords(&[
                        "owner", "admin", "pause", "upgrade", "vote", "commit", "apply",
                        "epoch", "govern",
                    ]),
                    category: Category::Admin,
                },
                Rule {
                    predicate: Predicate::ReadOnly,
                    category: Category::View,
                },
                Rule {
                    predicate: Predicate::NamePrefixAny {
                        prefixes: vec![
                            "get".to_string(),
                            "preview".to_string(),
                            "facet".to_string(),
                        ],
                    },
                    category: Category::View,
                },
                Rule {
                    predicate: Predicate::ExactName {
                        name: "supportsInterface".to_string(),
                    },
                    category: Category::View,
                },
                Rule {
                    predicate: keywords(&["route", "dispatch", "fallback", "delegate"]),
                    category: Category::Core,
                },
                Rule {
                    predicate: keywords(&["price", "math", "calc", "rate", "fee"]),
                    category: Category::Util,
                },
            ],
            default_category: Category::Core,
        }
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::standard()
    }
}

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Classifies a single descriptor against the table.
///
/// Deterministic: the same name/mutability always yields the same category.
/// Returns the category plus an optional suspicious-match warning.
#[must_use]
pub fn classify(
    descriptor: &FunctionDescriptor,
    table: &RuleTable,
) -> (Category, Option<Warning>) {
    for rule in &table.rules {
        match rule.predicate.evaluate(descriptor) {
            Match::None => {}
            Match::Clean => return (rule.category, None),
            Match::Suspicious { keyword } => {
                let warning = Warning::SuspiciousClassification {
                    signature: descriptor.canonical_signature(),
                    keyword,
                    category: rule.category.to_string(),
                };
                return (rule.category, Some(warning));
            }
        }
    }
    (table.default_category, None)
}

/// Buckets a whole inventory, preserving inventory order inside each bucket.
#[must_use]
pub fn bucket_inventory(
    inventory: &[FunctionDescriptor],
    table: &RuleTable,
) -> (Buckets, Warnings) {
    let mut buckets = Buckets::default();
    let mut warnings = Warnings::new();

    for descriptor in inventory {
        let (category, warning) = classify(descriptor, table);
        if let Some(warning) = warning {
            warnings.push(warning);
        }
        buckets.get_mut(category).functions.push(descriptor.clone());
    }

    debug!(
        admin = buckets.admin.len(),
        core = buckets.core.len(),
        view = buckets.view.len(),
        util = buckets.util.len(),
        "bucketed inventory"
    );

    (buckets, warnings)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{Mutability, Visibility};

    fn desc(name: &str, mutability: Mutability) -> FunctionDescriptor {
        FunctionDescriptor::new(name, &[], mutability, Visibility::External)
    }

    #[test]
    fn test_admin_keywords_take_precedence_over_view() {
        // view mutability, but the admin keyword wins by rule order
        let table = RuleTable::standard();
        let (category, _) = classify(&desc("getOwner", Mutability::View), &table);
        assert_eq!(category, Category::Admin);
    }

    #[test]
    fn test_read_only_lands_in_view() {
        let table = RuleTable::standard();
        let (category, warning) = classify(&desc("balanceOf", Mutability::View), &table);
        assert_eq!(category, Category::View);
        assert!(warning.is_none());
    }

    #[test]
    fn test_prefix_lands_in_view_even_when_nonpayable() {
        let table = RuleTable::standard();
        let (category, _) = classify(&desc("previewSwap", Mutability::Nonpayable), &table);
        assert_eq!(category, Category::View);
    }

    #[test]
    fn test_supports_interface_is_view() {
        let table = RuleTable::standard();
        let (category, _) = classify(&desc("supportsInterface", Mutability::Nonpayable), &table);
        assert_eq!(category, Category::View);
    }

    #[test]
    fn test_dispatch_name_lands_in_core() {
        let table = RuleTable::standard();
        let (category, _) = classify(&desc("dispatchCall", Mutability::Nonpayable), &table);
        assert_eq!(category, Category::Core);
    }

    #[test]
    fn test_pricing_name_lands_in_util() {
        let table = RuleTable::standard();
        let (category, _) = classify(&desc("priceOf", Mutability::Nonpayable), &table);
        assert_eq!(category, Category::Util);
    }

    #[test]
    fn test_unmatched_defaults_to_core() {
        let table = RuleTable::standard();
        let (category, _) = classify(&desc("swap", Mutability::Payable), &table);
        assert_eq!(category, Category::Core);
    }

    #[test]
    fn test_same_input_same_category() {
        let table = RuleTable::standard();
        let a = classify(&desc("pauseAll", Mutability::Nonpayable), &table);
        let b = classify(&desc("pauseAll", Mutability::Nonpayable), &table);
        assert_eq!(a, b);
        assert_eq!(a.0, Category::Admin);
    }

    #[test]
    fn test_camel_case_boundary_is_clean() {
        let table = RuleTable::standard();
        let (category, warning) = classify(&desc("setOwner", Mutability::Nonpayable), &table);
        assert_eq!(category, Category::Admin);
        assert!(warning.is_none());
    }

    #[test]
    fn test_interior_substring_is_suspicious() {
        // "commit" sits mid-word in "miscommitted"; not a word boundary
        let table = RuleTable::standard();
        let (category, warning) = classify(&desc("miscommitted", Mutability::Nonpayable), &table);
        assert_eq!(category, Category::Admin);
        assert!(matches!(
            warning,
            Some(Warning::SuspiciousClassification { .. })
        ));
    }

    #[test]
    fn test_bucket_inventory_preserves_order() {
        let table = RuleTable::standard();
        let inventory = vec![
            desc("pause", Mutability::Nonpayable),
            desc("swap", Mutability::Payable),
            desc("unpauseLater", Mutability::Nonpayable),
            desc("balanceOf", Mutability::View),
        ];
        let (buckets, _) = bucket_inventory(&inventory, &table);
        assert_eq!(buckets.admin.functions[0].name, "pause");
        assert_eq!(buckets.admin.functions[1].name, "unpauseLater");
        assert_eq!(buckets.core.functions[0].name, "swap");
        assert_eq!(buckets.view.functions[0].name, "balanceOf");
        assert_eq!(buckets.total_functions(), 4);
    }
}
