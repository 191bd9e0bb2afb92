//! Browse results and pagination.

use serde::{Deserialize, Serialize};

/// Pagination info.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
    /// Total number of items.
    pub total: usize,
    /// Total number of pages.
    pub total_pages: usize,
    /// Whether there's a next page.
    pub has_next: bool,
    /// Whether there's a previous page.
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination info.
    pub fn new(page: usize, per_page: usize, total: usize) -> Self {
        let per_page = per_page.max(1);
        let total_pages = if total == 0 {
            1
        } else {
            total.div_ceil(per_page)
        };

        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }

    /// Get page numbers for display (e.g., [3, 4, 5, 6, 7]).
    pub fn page_numbers(&self, max_visible: usize) -> Vec<usize> {
        if max_visible == 0 {
            return Vec::new();
        }
        if self.total_pages <= max_visible {
            return (1..=self.total_pages).collect();
        }

        let half = max_visible / 2;
        let start = self.page.saturating_sub(half).max(1);
        let end = start
            .saturating_add(max_visible - 1)
            .min(self.total_pages);
        let start = (end + 1).saturating_sub(max_visible).max(1);

        (start..=end).collect()
    }

    /// Check if on first page.
    pub fn is_first(&self) -> bool {
        self.page == 1
    }

    /// Check if on last page.
    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }

    /// Get start item number (1-indexed).
    pub fn start_item(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            self.offset().saturating_add(1).min(self.total)
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> usize {
        self.page.saturating_mul(self.per_page).min(self.total)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, 24, 0)
    }
}

/// Browse results container.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults<T> {
    /// The result items on this page.
    pub items: Vec<T>,
    /// Pagination info.
    pub pagination: Pagination,
    /// Time spent filtering and sorting, in microseconds.
    pub query_time_us: u64,
    /// Facets over the filtered set (if requested).
    pub facets: Vec<Facet>,
}

impl<T> SearchResults<T> {
    /// Create new results.
    pub fn new(items: Vec<T>, pagination: Pagination) -> Self {
        Self {
            items,
            pagination,
            query_time_us: 0,
            facets: Vec::new(),
        }
    }

    /// Create empty results.
    pub fn empty() -> Self {
        Self::new(Vec::new(), Pagination::default())
    }

    /// Set query time.
    pub fn with_query_time(mut self, us: u64) -> Self {
        self.query_time_us = us;
        self
    }

    /// Set facets.
    pub fn with_facets(mut self, facets: Vec<Facet>) -> Self {
        self.facets = facets;
        self
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Find a facet by field.
    pub fn facet(&self, field: &str) -> Option<&Facet> {
        self.facets.iter().find(|f| f.field == field)
    }
}

/// A facet for refining results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Facet {
    /// Facet name (e.g., "Category", "Metal").
    pub name: String,
    /// Field this facet filters on.
    pub field: String,
    /// Facet values.
    pub values: Vec<FacetValue>,
}

impl Facet {
    /// Create a new terms facet.
    pub fn terms(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
            values: Vec::new(),
        }
    }

    /// Add a value to the facet.
    pub fn add_value(&mut self, value: impl Into<String>, count: usize, selected: bool) {
        self.values.push(FacetValue {
            value: value.into(),
            count,
            selected,
        });
    }

    /// Count for a value, if present.
    pub fn count(&self, value: &str) -> Option<usize> {
        self.values.iter().find(|v| v.value == value).map(|v| v.count)
    }
}

/// A single facet value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FacetValue {
    /// The value.
    pub value: String,
    /// Number of items with this value.
    pub count: usize,
    /// Whether currently selected.
    pub selected: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_basics() {
        let p = Pagination::new(2, 10, 45);
        assert_eq!(p.total_pages, 5);
        assert!(p.has_next);
        assert!(p.has_prev);
        assert_eq!(p.offset(), 10);
    }

    #[test]
    fn test_pagination_last_page() {
        let p = Pagination::new(5, 10, 45);
        assert!(p.has_prev);
        assert!(!p.has_next);
        assert!(p.is_last());
        assert_eq!(p.start_item(), 41);
        assert_eq!(p.end_item(), 45);
    }

    #[test]
    fn test_pagination_empty() {
        let p = Pagination::new(1, 10, 0);
        assert_eq!(p.total_pages, 1);
        assert_eq!(p.start_item(), 0);
        assert_eq!(p.end_item(), 0);
        assert!(p.is_first());
    }

    #[test]
    fn test_pagination_page_past_the_end() {
        let p = Pagination::new(usize::MAX / 2, 24, 14);
        assert_eq!(p.total_pages, 1);
        assert!(!p.has_next);
        assert_eq!(p.offset(), usize::MAX);
        assert_eq!(p.start_item(), 14);
        assert_eq!(p.end_item(), 14);
        assert!(p.page_numbers(5).iter().all(|&n| n <= p.total_pages));
    }

    #[test]
    fn test_pagination_page_numbers() {
        let p = Pagination::new(5, 10, 100);
        assert_eq!(p.page_numbers(5), vec![3, 4, 5, 6, 7]);

        let p = Pagination::new(10, 10, 100);
        assert_eq!(p.page_numbers(5), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_facet_values() {
        let mut facet = Facet::terms("Metal", "metal_type");
        facet.add_value("gold", 3, true);
        assert_eq!(facet.count("gold"), Some(3));
        assert_eq!(facet.count("silver"), None);
    }
}
