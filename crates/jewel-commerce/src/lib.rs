//! Jewellery catalog types and storefront search matching.
//!
//! This crate provides the pieces behind the storefront search bar and the
//! collections page filter:
//!
//! - **Catalog**: Products, categories, metal types, catalog loading/validation
//! - **Search**: Query normalization, suggestions, "did you mean" correction,
//!   the search session state machine, and input debouncing
//! - **Browse**: In-memory filters, sorting, pagination and facets
//!
//! # Example
//!
//! ```rust,ignore
//! use jewel_commerce::prelude::*;
//!
//! let catalog = Catalog::builtin()?;
//! let engine = SearchEngine::new(&catalog, SearchConfig::default());
//!
//! match engine.search("earings") {
//!     SearchOutcome::Suggested(suggestions) => { /* render dropdown */ }
//!     SearchOutcome::Corrected(c) => println!("Did you mean {:?}?", c.correction),
//!     SearchOutcome::Empty | SearchOutcome::Idle => {}
//! }
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        Catalog, CatalogDocument, CatalogIssue, Category, LoadReport, MetalType, Product,
        ProductRecord,
    };

    // Search
    pub use crate::search::{
        fuzzy_correct, match_products, normalize, suggest, Correction, Debouncer, Facet,
        Filter, Pagination, ProductQuery, SearchConfig, SearchEngine, SearchOutcome,
        SearchResults, SearchSession, SearchState, SearchSuggestion, SortOption,
        SuggestionKind, DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_SUGGESTION_LIMIT,
        MAX_SUGGESTION_LIMIT,
    };
}
