//! Search pipeline: normalize, suggest, then fall back to correction.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::CommerceError;
use crate::search::fuzzy::{fuzzy_correct, Correction, DEFAULT_SIMILARITY_THRESHOLD};
use crate::search::normalize::{char_len, normalize, MIN_QUERY_LEN};
use crate::search::suggest::{match_products, suggest, SearchSuggestion, DEFAULT_SUGGESTION_LIMIT};

/// Upper bound accepted for `max_suggestions`.
pub const MAX_SUGGESTION_LIMIT: usize = 10;

/// Search tuning, loaded from the `[search]` config section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Minimum normalized query length before anything is matched.
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,

    /// Dropdown cap.
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,

    /// Minimum similarity for a "did you mean" correction.
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,

    /// Quiet period before a typed query is searched.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_min_query_len() -> usize {
    MIN_QUERY_LEN
}

fn default_max_suggestions() -> usize {
    DEFAULT_SUGGESTION_LIMIT
}

fn default_similarity_threshold() -> f64 {
    DEFAULT_SIMILARITY_THRESHOLD
}

fn default_debounce_ms() -> u64 {
    150
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_len: default_min_query_len(),
            max_suggestions: default_max_suggestions(),
            similarity_threshold: default_similarity_threshold(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl SearchConfig {
    /// Check the settings are usable.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.min_query_len < MIN_QUERY_LEN {
            return Err(CommerceError::InvalidConfig(format!(
                "min_query_len must be at least {}",
                MIN_QUERY_LEN
            )));
        }
        if self.max_suggestions == 0 || self.max_suggestions > MAX_SUGGESTION_LIMIT {
            return Err(CommerceError::InvalidConfig(format!(
                "max_suggestions must be 1-{}",
                MAX_SUGGESTION_LIMIT
            )));
        }
        if !(self.similarity_threshold > 0.0 && self.similarity_threshold <= 1.0) {
            return Err(CommerceError::InvalidConfig(
                "similarity_threshold must be in (0, 1]".to_string(),
            ));
        }
        Ok(())
    }

    /// Debounce window as a duration.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// What the search UI should show for a query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum SearchOutcome<'a> {
    /// Query too short; show the default panel.
    Idle,
    /// Direct matches for the dropdown.
    Suggested(Vec<SearchSuggestion<'a>>),
    /// No direct match, but a close term was found.
    Corrected(Correction<'a>),
    /// Nothing matched and nothing was close enough.
    Empty,
}

impl<'a> SearchOutcome<'a> {
    pub fn kind(&self) -> &'static str {
        match self {
            SearchOutcome::Idle => "idle",
            SearchOutcome::Suggested(_) => "suggested",
            SearchOutcome::Corrected(_) => "corrected",
            SearchOutcome::Empty => "empty",
        }
    }

    /// Number of suggestions or corrected results.
    pub fn result_count(&self) -> usize {
        match self {
            SearchOutcome::Suggested(s) => s.len(),
            SearchOutcome::Corrected(c) => c.results.len(),
            SearchOutcome::Idle | SearchOutcome::Empty => 0,
        }
    }
}

/// Search over one immutable catalog.
#[derive(Debug, Clone)]
pub struct SearchEngine<'a> {
    catalog: &'a Catalog,
    config: SearchConfig,
}

impl<'a> SearchEngine<'a> {
    pub fn new(catalog: &'a Catalog, config: SearchConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Check whether a raw query is long enough to search.
    pub fn accepts(&self, query: &str) -> bool {
        char_len(&normalize(query)) >= self.config.min_query_len
    }

    /// Dropdown cap in effect, never above [`MAX_SUGGESTION_LIMIT`].
    pub fn suggestion_limit(&self) -> usize {
        self.config.max_suggestions.min(MAX_SUGGESTION_LIMIT)
    }

    /// Dropdown suggestions only.
    pub fn suggest(&self, query: &str) -> Vec<SearchSuggestion<'a>> {
        if !self.accepts(query) {
            return Vec::new();
        }
        suggest(
            query,
            self.catalog.products(),
            self.catalog.categories(),
            self.suggestion_limit(),
        )
    }

    /// Correction only, regardless of whether direct matches exist.
    pub fn correct(&self, query: &str) -> Correction<'a> {
        if !self.accepts(query) {
            return Correction::none();
        }
        fuzzy_correct(
            query,
            self.catalog.products(),
            self.catalog.categories(),
            self.config.similarity_threshold,
        )
    }

    /// Uncapped product matches for a term.
    pub fn products_matching(&self, term: &str) -> Vec<&'a crate::catalog::Product> {
        match_products(term, self.catalog.products())
    }

    /// Full pipeline.
    ///
    /// Correction runs only when the query is long enough and produced no
    /// suggestions.
    pub fn search(&self, query: &str) -> SearchOutcome<'a> {
        if !self.accepts(query) {
            return SearchOutcome::Idle;
        }

        let suggestions = self.suggest(query);
        if !suggestions.is_empty() {
            return SearchOutcome::Suggested(suggestions);
        }

        let correction = self.correct(query);
        if correction.is_some() {
            SearchOutcome::Corrected(correction)
        } else {
            SearchOutcome::Empty
        }
    }
}
