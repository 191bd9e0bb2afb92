//! "Did you mean" correction for queries with no direct match.

use std::collections::HashSet;

use serde::Serialize;

use crate::catalog::{Category, Product};
use crate::search::normalize::{char_len, is_searchable, normalize};
use crate::search::suggest::match_products;

/// Minimum similarity a candidate needs to be offered as a correction.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.6;

/// Product-name words shorter than this are not correction candidates.
const MIN_WORD_LEN: usize = 3;

/// Outcome of fuzzy correction.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Correction<'a> {
    /// The corrected term, as displayed in the catalog.
    pub correction: Option<String>,
    /// Products matching the corrected term, in catalog order.
    pub results: Vec<&'a Product>,
}

impl<'a> Correction<'a> {
    /// No correction above threshold.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_some(&self) -> bool {
        self.correction.is_some()
    }
}

/// A scored correction candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredTerm {
    pub display: String,
    pub normalized: String,
    pub score: f64,
}

/// Similarity in `[0, 1]` between two normalized strings.
///
/// Levenshtein distance over characters, normalized by the longer length.
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}

/// Terms a query may be corrected to: category names, product names,
/// product-name words, and tags, deduplicated by normalized form.
///
/// The first spelling seen is kept for display.
pub fn candidate_terms(products: &[Product], categories: &[Category]) -> Vec<(String, String)> {
    let mut seen = HashSet::new();
    let mut terms = Vec::new();

    let mut push = |display: &str| {
        let normalized = normalize(display);
        if !normalized.is_empty() && seen.insert(normalized.clone()) {
            terms.push((display.trim().to_string(), normalized));
        }
    };

    for category in categories {
        push(&category.name);
    }
    for product in products {
        push(&product.name);
        for word in product.name.split_whitespace() {
            if char_len(word) >= MIN_WORD_LEN {
                push(word);
            }
        }
    }
    for tag in products.iter().flat_map(|p| p.tags.iter()) {
        push(tag);
    }

    terms
}

/// Score every candidate against a query, best first.
///
/// Candidates below `threshold` are dropped. Ties prefer the shorter
/// candidate, then lexicographic order.
pub fn rank_candidates(
    query: &str,
    products: &[Product],
    categories: &[Category],
    threshold: f64,
) -> Vec<ScoredTerm> {
    let q = normalize(query);
    if !is_searchable(&q) {
        return Vec::new();
    }

    let mut scored: Vec<ScoredTerm> = candidate_terms(products, categories)
        .into_iter()
        .filter_map(|(display, normalized)| {
            let score = similarity(&q, &normalized);
            (score >= threshold).then_some(ScoredTerm {
                display,
                normalized,
                score,
            })
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| char_len(&a.normalized).cmp(&char_len(&b.normalized)))
            .then_with(|| a.normalized.cmp(&b.normalized))
            .then_with(|| a.display.cmp(&b.display))
    });
    scored
}

/// Best-effort correction for a query that produced no suggestions.
///
/// The highest-ranked candidate that matches at least one product wins, and
/// `results` holds exactly what [`match_products`] returns for it. Short
/// queries, an empty catalog, or no candidate above `threshold` yield
/// [`Correction::none`].
pub fn fuzzy_correct<'a>(
    query: &str,
    products: &'a [Product],
    categories: &[Category],
    threshold: f64,
) -> Correction<'a> {
    if products.is_empty() {
        return Correction::none();
    }

    for candidate in rank_candidates(query, products, categories, threshold) {
        let results = match_products(&candidate.display, products);
        if !results.is_empty() {
            tracing::debug!(
                query,
                correction = %candidate.display,
                score = candidate.score,
                results = results.len(),
                "fuzzy correction"
            );
            return Correction {
                correction: Some(candidate.display),
                results,
            };
        }
    }

    Correction::none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};

    fn products() -> Vec<Product> {
        vec![
            Product::new("1", "Diamond Studded Jhumkas", "Earrings", Money::new(100, Currency::INR))
                .with_tags(["diamond", "jhumka"]),
            Product::new("2", "Gold Chandbalis", "Earrings", Money::new(100, Currency::INR))
                .with_tags(["gold", "chandbali"]),
        ]
    }

    fn categories() -> Vec<Category> {
        ["Earrings", "Rings", "Necklaces"].into_iter().map(Category::new).collect()
    }

    #[test]
    fn test_similarity_bounds() {
        assert_eq!(similarity("earrings", "earrings"), 1.0);
        assert_eq!(similarity("abc", "xyz"), 0.0);
        assert!((similarity("earings", "earrings") - 0.875).abs() < 1e-9);
    }

    #[test]
    fn test_missing_letter_corrects_to_category() {
        let products = products();
        let c = fuzzy_correct("earings", &products, &categories(), DEFAULT_SIMILARITY_THRESHOLD);
        assert_eq!(c.correction.as_deref(), Some("Earrings"));
        let ids: Vec<_> = c.results.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_no_similar_term() {
        let products = products();
        let c = fuzzy_correct("zzzzz", &products, &categories(), DEFAULT_SIMILARITY_THRESHOLD);
        assert_eq!(c, Correction::none());
    }

    #[test]
    fn test_short_query_not_corrected() {
        let products = products();
        assert!(!fuzzy_correct("x", &products, &categories(), 0.0).is_some());
    }

    #[test]
    fn test_empty_catalog() {
        let c = fuzzy_correct("earings", &[], &categories(), DEFAULT_SIMILARITY_THRESHOLD);
        assert!(c.correction.is_none());
        assert!(c.results.is_empty());
    }

    #[test]
    fn test_category_without_products_is_skipped() {
        let products = products();
        let mut categories = categories();
        categories.push(Category::new("Bangles"));
        // "Bangles" is the only close term and nothing is filed under it.
        let c = fuzzy_correct("bangels", &products, &categories, 0.5);
        assert_eq!(c, Correction::none());
    }

    #[test]
    fn test_tie_prefers_shorter_then_lexicographic() {
        let products = vec![
            Product::new("1", "Bali", "Earrings", Money::new(1, Currency::INR)),
            Product::new("2", "Balis", "Earrings", Money::new(1, Currency::INR)),
            Product::new("3", "Pali", "Earrings", Money::new(1, Currency::INR)),
        ];
        // "xali" is one edit from "bali" and "pali" (0.75) and two from "balis" (0.6).
        let ranked = rank_candidates("xali", &products, &[], 0.6);
        let order: Vec<_> = ranked.iter().map(|t| t.normalized.as_str()).collect();
        assert_eq!(order, vec!["bali", "pali", "balis"]);
    }

    #[test]
    fn test_candidates_deduplicate() {
        let products = products();
        let terms = candidate_terms(&products, &categories());
        let normalized: Vec<_> = terms.iter().map(|(_, n)| n.as_str()).collect();
        assert_eq!(normalized.iter().filter(|n| **n == "diamond").count(), 1);
        // Category spelling wins over later occurrences.
        assert_eq!(terms[0].0, "Earrings");
    }
}
