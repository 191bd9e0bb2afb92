//! Collections page filters.

use crate::catalog::{MetalType, Product};
use crate::ids::CategorySlug;
use crate::money::Money;
use crate::search::normalize::normalize;
use crate::search::suggest::product_matches;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A browse filter. Multiple filters combine with AND.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Filter {
    /// Filter by category name or slug.
    Category(String),
    /// Filter by any of several categories (OR).
    Categories(Vec<String>),
    /// Filter by metal.
    MetalType(MetalType),
    /// Filter by price range (inclusive).
    PriceRange {
        min: Option<Money>,
        max: Option<Money>,
    },
    /// Only show in-stock pieces.
    InStock,
    /// Only show new arrivals.
    NewArrival,
    /// Filter by tag.
    Tag(String),
    /// Filter by any of several tags (OR).
    Tags(Vec<String>),
    /// Filter by purity code (e.g., "22K").
    Purity(String),
    /// Substring search in name, category and tags.
    Text(String),
}

impl Filter {
    /// Create a category filter.
    pub fn category(name: impl Into<String>) -> Self {
        Filter::Category(name.into())
    }

    /// Create a metal filter.
    pub fn metal(metal: MetalType) -> Self {
        Filter::MetalType(metal)
    }

    /// Create a price range filter.
    pub fn price_range(min: Option<Money>, max: Option<Money>) -> Self {
        Filter::PriceRange { min, max }
    }

    /// Create an in-stock filter.
    pub fn in_stock() -> Self {
        Filter::InStock
    }

    /// Create a new-arrivals filter.
    pub fn new_arrival() -> Self {
        Filter::NewArrival
    }

    /// Create a tag filter.
    pub fn tag(tag: impl Into<String>) -> Self {
        Filter::Tag(tag.into())
    }

    /// Create a purity filter.
    pub fn purity(purity: impl Into<String>) -> Self {
        Filter::Purity(purity.into())
    }

    /// Create a text search filter.
    pub fn text(query: impl Into<String>) -> Self {
        Filter::Text(query.into())
    }

    /// Check whether a product passes this filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Filter::Category(name) => same_category(&product.category, name),
            Filter::Categories(names) => names.iter().any(|n| same_category(&product.category, n)),
            Filter::MetalType(metal) => product.metal_type == *metal,
            Filter::PriceRange { min, max } => {
                let above_min = min.map_or(true, |min| {
                    matches!(
                        product.price.try_cmp(&min),
                        Some(Ordering::Greater | Ordering::Equal)
                    )
                });
                let below_max = max.map_or(true, |max| {
                    matches!(
                        product.price.try_cmp(&max),
                        Some(Ordering::Less | Ordering::Equal)
                    )
                });
                above_min && below_max
            }
            Filter::InStock => product.in_stock,
            Filter::NewArrival => product.new_arrival,
            Filter::Tag(tag) => has_tag(product, tag),
            Filter::Tags(tags) => tags.iter().any(|t| has_tag(product, t)),
            Filter::Purity(purity) => product.purity.trim().eq_ignore_ascii_case(purity.trim()),
            Filter::Text(query) => {
                let q = normalize(query);
                q.is_empty() || product_matches(product, &q)
            }
        }
    }

    /// Short label for an active-filter chip.
    pub fn label(&self) -> String {
        match self {
            Filter::Category(name) => name.clone(),
            Filter::Categories(names) => names.join(" / "),
            Filter::MetalType(metal) => metal.display_name().to_string(),
            Filter::PriceRange { min, max } => match (min, max) {
                (Some(min), Some(max)) => format!("{} - {}", min, max),
                (Some(min), None) => format!("From {}", min),
                (None, Some(max)) => format!("Up to {}", max),
                (None, None) => "Any price".to_string(),
            },
            Filter::InStock => "In stock".to_string(),
            Filter::NewArrival => "New arrivals".to_string(),
            Filter::Tag(tag) => format!("#{}", tag),
            Filter::Tags(tags) => tags.iter().map(|t| format!("#{}", t)).collect::<Vec<_>>().join(" "),
            Filter::Purity(purity) => purity.clone(),
            Filter::Text(query) => format!("\"{}\"", query),
        }
    }
}

fn same_category(product_category: &str, wanted: &str) -> bool {
    product_category.trim().eq_ignore_ascii_case(wanted.trim())
        || CategorySlug::from_name(product_category) == CategorySlug::from_name(wanted)
}

fn has_tag(product: &Product, tag: &str) -> bool {
    let tag = normalize(tag);
    product.tags.iter().any(|t| normalize(t) == tag)
}
