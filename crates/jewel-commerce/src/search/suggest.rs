//! Autocomplete suggestions for the search dropdown.

use std::collections::HashSet;

use serde::Serialize;

use crate::catalog::{Category, Product};
use crate::ids::CategorySlug;
use crate::search::normalize::{is_searchable, normalize};

/// Default number of suggestions shown in the dropdown.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 8;

/// What a suggestion points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Product,
    Category,
    Tag,
}

impl SuggestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionKind::Product => "product",
            SuggestionKind::Category => "category",
            SuggestionKind::Tag => "tag",
        }
    }
}

/// A typed candidate for the search dropdown.
///
/// Borrowed from the catalog and recomputed on every query change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchSuggestion<'a> {
    pub kind: SuggestionKind,
    /// Display text.
    pub text: String,
    /// The matched product, for product suggestions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<&'a Product>,
    /// The matched category, for category suggestions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_slug: Option<CategorySlug>,
}

impl<'a> SearchSuggestion<'a> {
    fn product(product: &'a Product) -> Self {
        Self {
            kind: SuggestionKind::Product,
            text: product.name.clone(),
            product: Some(product),
            category_slug: None,
        }
    }

    fn category(category: &Category) -> Self {
        Self {
            kind: SuggestionKind::Category,
            text: category.name.clone(),
            product: None,
            category_slug: Some(category.slug.clone()),
        }
    }

    fn tag(tag: &str) -> Self {
        Self {
            kind: SuggestionKind::Tag,
            text: tag.to_string(),
            product: None,
            category_slug: None,
        }
    }
}

/// Suggestions for a raw query.
///
/// Products whose name or tags contain the query come first, then matching
/// categories, then matching tags; each group keeps catalog order. At most
/// `limit` suggestions are returned, and queries shorter than
/// [`MIN_QUERY_LEN`](crate::search::MIN_QUERY_LEN) return none.
pub fn suggest<'a>(
    query: &str,
    products: &'a [Product],
    categories: &[Category],
    limit: usize,
) -> Vec<SearchSuggestion<'a>> {
    let q = normalize(query);
    if !is_searchable(&q) || limit == 0 {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(limit.min(16));

    for product in products {
        if out.len() == limit {
            return out;
        }
        let tag_hit = || product.tags.iter().any(|t| normalize(t).contains(&q));
        if normalize(&product.name).contains(&q) || tag_hit() {
            out.push(SearchSuggestion::product(product));
        }
    }

    for category in categories {
        if out.len() == limit {
            return out;
        }
        if normalize(&category.name).contains(&q) {
            out.push(SearchSuggestion::category(category));
        }
    }

    let mut seen_tags = HashSet::new();
    for tag in products.iter().flat_map(|p| p.tags.iter()) {
        if out.len() == limit {
            break;
        }
        let normalized = normalize(tag);
        if normalized.contains(&q) && seen_tags.insert(normalized) {
            out.push(SearchSuggestion::tag(tag));
        }
    }

    out
}

/// Products whose name, category, or any tag contains the term.
///
/// Catalog order is preserved and the result is not capped. This is the
/// matcher used to populate correction results and the browse text filter.
pub fn match_products<'a>(term: &str, products: &'a [Product]) -> Vec<&'a Product> {
    let q = normalize(term);
    if q.is_empty() {
        return Vec::new();
    }
    products
        .iter()
        .filter(|p| product_matches(p, &q))
        .collect()
}

/// Check a product against an already-normalized term.
pub(crate) fn product_matches(product: &Product, normalized_term: &str) -> bool {
    normalize(&product.name).contains(normalized_term)
        || normalize(&product.category).contains(normalized_term)
        || product
            .tags
            .iter()
            .any(|t| normalize(t).contains(normalized_term))
}
