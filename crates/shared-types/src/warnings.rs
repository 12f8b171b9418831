//! Non-fatal consistency warnings.
//!
//! Warnings are accumulated alongside successful output and returned to the
//! caller; they never block a stage and are never silently dropped.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single non-fatal advisory produced by a pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// A module's size estimate is close to (but under) the hard ceiling.
    NearSizeCeiling {
        /// Module name.
        module: String,
        /// Estimated size in bytes.
        size: usize,
        /// Hard ceiling in bytes.
        ceiling: usize,
    },

    /// A function descriptor arrived without an explicit mutability; the
    /// extractor defaulted it to `nonpayable`.
    MissingMutability {
        /// Canonical signature of the affected function.
        signature: String,
    },

    /// A classification rule matched on an interior substring of the name,
    /// which may indicate a misclassified function.
    SuspiciousClassification {
        /// Canonical signature of the affected function.
        signature: String,
        /// The keyword that fired.
        keyword: String,
        /// The category the function was assigned to.
        category: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NearSizeCeiling {
                module,
                size,
                ceiling,
            } => write!(f, "module {module} is near the size ceiling: {size}/{ceiling} bytes"),
            Self::MissingMutability { signature } => {
                write!(f, "{signature}: missing mutability, defaulted to nonpayable")
            }
            Self::SuspiciousClassification {
                signature,
                keyword,
                category,
            } => write!(
                f,
                "{signature}: classified as {category} on interior keyword '{keyword}'"
            ),
        }
    }
}

/// An append-only collection of warnings threaded through the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warnings(Vec<Warning>);

impl Warnings {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a warning.
    pub fn push(&mut self, warning: Warning) {
        self.0.push(warning);
    }

    /// Absorbs all warnings from another collection.
    pub fn extend(&mut self, other: Warnings) {
        self.0.extend(other.0);
    }

    /// Returns the accumulated warnings.
    #[must_use]
    pub fn as_slice(&self) -> &[Warning] {
        &self.0
    }

    /// Returns the number of accumulated warnings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no warnings were accumulated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for Warnings {
    type Item = Warning;
    type IntoIter = std::vec::IntoIter<Warning>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warnings_accumulate() {
        let mut warnings = Warnings::new();
        assert!(warnings.is_empty());

        warnings.push(Warning::MissingMutability {
            signature: "foo()".to_string(),
        });
        warnings.push(Warning::NearSizeCeiling {
            module: "CoreFacet".to_string(),
            size: 23_000,
            ceiling: 24_576,
        });

        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_warnings_extend() {
        let mut a = Warnings::new();
        a.push(Warning::MissingMutability {
            signature: "a()".to_string(),
        });

        let mut b = Warnings::new();
        b.push(Warning::MissingMutability {
            signature: "b()".to_string(),
        });

        a.extend(b);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn test_warning_display() {
        let warning = Warning::SuspiciousClassification {
            signature: "invGovernorPrice()".to_string(),
            keyword: "govern".to_string(),
            category: "admin".to_string(),
        };
        let text = warning.to_string();
        assert!(text.contains("invGovernorPrice()"));
        assert!(text.contains("govern"));
    }
}
