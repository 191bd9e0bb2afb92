//! Collections page query builder.

use std::cmp::Ordering;
use std::time::Instant;

use crate::catalog::{Catalog, MetalType, Product};
use crate::search::results::{Facet, Pagination, SearchResults};
use crate::search::Filter;
use serde::{Deserialize, Serialize};

/// Sort options for browse results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    /// Catalog order.
    #[default]
    Featured,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
    /// Sort by name A-Z.
    NameAsc,
    /// Sort by name Z-A.
    NameDesc,
    /// New arrivals first, then catalog order.
    Newest,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Featured => "featured",
            SortOption::PriceAsc => "price_asc",
            SortOption::PriceDesc => "price_desc",
            SortOption::NameAsc => "name_asc",
            SortOption::NameDesc => "name_desc",
            SortOption::Newest => "newest",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "featured" => Some(SortOption::Featured),
            "price_asc" => Some(SortOption::PriceAsc),
            "price_desc" => Some(SortOption::PriceDesc),
            "name_asc" => Some(SortOption::NameAsc),
            "name_desc" => Some(SortOption::NameDesc),
            "newest" => Some(SortOption::Newest),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Featured => "Featured",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
            SortOption::NameAsc => "Name: A-Z",
            SortOption::NameDesc => "Name: Z-A",
            SortOption::Newest => "New Arrivals",
        }
    }

    /// Compare two products. Sorting is stable, so equal products keep
    /// catalog order.
    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOption::Featured => Ordering::Equal,
            SortOption::PriceAsc => a.price.amount_cents.cmp(&b.price.amount_cents),
            SortOption::PriceDesc => b.price.amount_cents.cmp(&a.price.amount_cents),
            SortOption::NameAsc => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortOption::NameDesc => b.name.to_lowercase().cmp(&a.name.to_lowercase()),
            SortOption::Newest => b.new_arrival.cmp(&a.new_arrival),
        }
    }
}

/// A collections page query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductQuery {
    /// Text query from the collections search bar.
    pub query: Option<String>,
    /// Filters to apply.
    pub filters: Vec<Filter>,
    /// Sort option.
    pub sort: SortOption,
    /// Current page (1-indexed).
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
    /// Whether to include facets in results.
    pub include_facets: bool,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductQuery {
    /// Create a new query.
    pub fn new() -> Self {
        Self {
            query: None,
            filters: Vec::new(),
            sort: SortOption::Featured,
            page: 1,
            per_page: 24,
            include_facets: false,
        }
    }

    /// Set the text query.
    pub fn with_query(mut self, q: impl Into<String>) -> Self {
        let q = q.into();
        if !q.trim().is_empty() {
            self.query = Some(q.clone());
            self.filters.push(Filter::Text(q));
        }
        self
    }

    /// Add a filter.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set sort option.
    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Set pagination.
    pub fn with_pagination(mut self, page: usize, per_page: usize) -> Self {
        self.page = page.max(1);
        self.per_page = per_page.clamp(1, 100);
        self
    }

    /// Enable facets.
    pub fn with_facets(mut self) -> Self {
        self.include_facets = true;
        self
    }

    /// Check a product against every filter.
    pub fn matches(&self, product: &Product) -> bool {
        self.filters.iter().all(|f| f.matches(product))
    }

    /// Filter, sort and paginate the catalog.
    pub fn run<'a>(&self, catalog: &'a Catalog) -> SearchResults<&'a Product> {
        let started = Instant::now();

        let mut matched: Vec<&'a Product> = catalog
            .products()
            .iter()
            .filter(|p| self.matches(p))
            .collect();
        matched.sort_by(|a, b| self.sort.compare(a, b));

        let facets = if self.include_facets {
            self.facets(catalog, &matched)
        } else {
            Vec::new()
        };

        let pagination = Pagination::new(self.page, self.per_page, matched.len());
        let items: Vec<&'a Product> = matched
            .into_iter()
            .skip(pagination.offset())
            .take(pagination.per_page)
            .collect();

        SearchResults::new(items, pagination)
            .with_facets(facets)
            .with_query_time(started.elapsed().as_micros() as u64)
    }

    fn facets(&self, catalog: &Catalog, matched: &[&Product]) -> Vec<Facet> {
        let mut categories = Facet::terms("Category", "category");
        for category in catalog.categories() {
            let count = matched.iter().filter(|p| category.matches(&p.category)).count();
            if count > 0 {
                let selected = self.filters.iter().any(|f| match f {
                    Filter::Category(name) => category.matches(name),
                    Filter::Categories(names) => names.iter().any(|n| category.matches(n)),
                    _ => false,
                });
                categories.add_value(category.name.clone(), count, selected);
            }
        }

        let mut metals = Facet::terms("Metal", "metal_type");
        for metal in MetalType::all() {
            let count = matched.iter().filter(|p| p.metal_type == metal).count();
            if count > 0 {
                let selected = self.filters.contains(&Filter::MetalType(metal));
                metals.add_value(metal.as_str(), count, selected);
            }
        }

        vec![categories, metals]
    }
}
