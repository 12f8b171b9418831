//! Semantic categories and bucket containers.

use serde::{Deserialize, Serialize};
use shared_types::FunctionDescriptor;
use std::fmt;

/// Semantic category of a function.
///
/// The variant order encodes deployment/initialization precedence:
/// administrative modules initialize before general ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Administrative, governance, and lifecycle functions.
    Admin,
    /// Routing, dispatch, and general state-changing functions.
    Core,
    /// Read-only (view/pure) and introspection-adjacent functions.
    View,
    /// Pricing, math, and other stateless utility functions.
    Util,
}

impl Category {
    /// All categories in initialization-precedence order.
    pub const ALL: [Self; 4] = [Self::Admin, Self::Core, Self::View, Self::Util];

    /// Base facet name for modules generated from this category.
    #[must_use]
    pub const fn facet_base_name(&self) -> &'static str {
        match self {
            Self::Admin => "AdminFacet",
            Self::Core => "CoreFacet",
            Self::View => "ViewFacet",
            Self::Util => "UtilFacet",
        }
    }

    /// Initialization rank; lower ranks initialize first.
    #[must_use]
    pub const fn init_rank(&self) -> u8 {
        match self {
            Self::Admin => 0,
            Self::Core => 1,
            Self::View => 2,
            Self::Util => 3,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Admin => "admin",
            Self::Core => "core",
            Self::View => "view",
            Self::Util => "util",
        };
        write!(f, "{name}")
    }
}

/// One category's functions, in original inventory order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    /// Functions assigned to this bucket, inventory order preserved.
    pub functions: Vec<FunctionDescriptor>,
}

impl Bucket {
    /// Number of functions in the bucket.
    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Returns true if the bucket holds no functions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

/// The full classified inventory, one bucket per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buckets {
    /// Administrative bucket.
    pub admin: Bucket,
    /// Core/dispatch bucket.
    pub core: Bucket,
    /// View/read-only bucket.
    pub view: Bucket,
    /// Utility bucket.
    pub util: Bucket,
}

impl Buckets {
    /// Returns the bucket for a category.
    #[must_use]
    pub fn get(&self, category: Category) -> &Bucket {
        match category {
            Category::Admin => &self.admin,
            Category::Core => &self.core,
            Category::View => &self.view,
            Category::Util => &self.util,
        }
    }

    /// Mutable access to the bucket for a category.
    pub fn get_mut(&mut self, category: Category) -> &mut Bucket {
        match category {
            Category::Admin => &mut self.admin,
            Category::Core => &mut self.core,
            Category::View => &mut self.view,
            Category::Util => &mut self.util,
        }
    }

    /// Iterates non-empty buckets in initialization-precedence order.
    pub fn iter_non_empty(&self) -> impl Iterator<Item = (Category, &Bucket)> {
        Category::ALL
            .iter()
            .map(|c| (*c, self.get(*c)))
            .filter(|(_, bucket)| !bucket.is_empty())
    }

    /// Total function count across all buckets.
    #[must_use]
    pub fn total_functions(&self) -> usize {
        self.admin.len() + self.core.len() + self.view.len() + self.util.len()
    }
}
