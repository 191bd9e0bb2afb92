//! Category types for product organization.

use crate::ids::CategorySlug;
use serde::{Deserialize, Serialize};

/// A product category.
///
/// The catalog's categories form a closed set; every product names one of
/// them and category suggestions are drawn from the same list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Category {
    /// Display name (e.g., "Nose Pins").
    pub name: String,
    /// URL-friendly slug (e.g., "nose-pins").
    pub slug: CategorySlug,
}

impl Category {
    /// Create a category, deriving its slug from the name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let slug = CategorySlug::from_name(&name);
        Self { name, slug }
    }

    /// Check whether a product category string names this category.
    ///
    /// Comparison ignores case and surrounding whitespace.
    pub fn matches(&self, name: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(name.trim())
            || self.slug.as_str() == CategorySlug::from_name(name).as_str()
    }
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        Category::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_slug() {
        let cat = Category::new("Nose Pins");
        assert_eq!(cat.name, "Nose Pins");
        assert_eq!(cat.slug.as_str(), "nose-pins");
    }

    #[test]
    fn test_category_matches() {
        let cat = Category::new("Earrings");
        assert!(cat.matches("earrings"));
        assert!(cat.matches(" EARRINGS "));
        assert!(!cat.matches("Rings"));
        assert!(Category::new("Nose Pins").matches("nose-pins"));
    }
}
