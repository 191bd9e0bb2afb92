//! Search module.
//!
//! The storefront search bar runs [`normalize`] → [`suggest`] → (if nothing
//! matched) [`fuzzy_correct`], wrapped by [`SearchEngine`]. The collections
//! page uses [`ProductQuery`] for filters, sorting, and pagination.

mod debounce;
mod engine;
mod filter;
mod fuzzy;
mod normalize;
mod query;
mod results;
mod session;
mod suggest;

pub use debounce::Debouncer;
pub use engine::{SearchConfig, SearchEngine, SearchOutcome, MAX_SUGGESTION_LIMIT};
pub use filter::Filter;
pub use fuzzy::{
    candidate_terms, fuzzy_correct, rank_candidates, similarity, Correction, ScoredTerm,
    DEFAULT_SIMILARITY_THRESHOLD,
};
pub use normalize::{char_len, is_searchable, normalize, MIN_QUERY_LEN};
pub use query::{ProductQuery, SortOption};
pub use results::{Facet, FacetValue, Pagination, SearchResults};
pub use session::{SearchSession, SearchState};
pub use suggest::{match_products, suggest, SearchSuggestion, SuggestionKind, DEFAULT_SUGGESTION_LIMIT};
