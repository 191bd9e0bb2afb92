//! State machine behind the search input.
//!
//! ```text
//! Idle --input--> Querying --resolve--> Suggested | Corrected | Empty
//!   ^                                         |
//!   +------------------ clear ----------------+
//! ```
//!
//! Every `input` re-enters `Querying`; the caller resolves once its
//! debounce window elapses.

use serde::Serialize;

use crate::search::engine::{SearchEngine, SearchOutcome};
use crate::search::normalize::normalize;

/// Where the search UI currently is.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SearchState {
    /// No query.
    #[default]
    Idle,
    /// Query typed, waiting for the debounce window.
    Querying { query: String },
    /// Direct matches shown.
    Suggested { query: String, count: usize },
    /// No direct match; a correction is shown.
    Corrected { query: String, correction: String },
    /// No direct match and no correction above threshold.
    Empty { query: String },
}

impl SearchState {
    pub fn name(&self) -> &'static str {
        match self {
            SearchState::Idle => "idle",
            SearchState::Querying { .. } => "querying",
            SearchState::Suggested { .. } => "suggested",
            SearchState::Corrected { .. } => "corrected",
            SearchState::Empty { .. } => "empty",
        }
    }

    /// The query this state belongs to, if any.
    pub fn query(&self) -> Option<&str> {
        match self {
            SearchState::Idle => None,
            SearchState::Querying { query }
            | SearchState::Suggested { query, .. }
            | SearchState::Corrected { query, .. }
            | SearchState::Empty { query } => Some(query),
        }
    }

    /// Check whether this is one of the resolved leaf states.
    pub fn is_resolved(&self) -> bool {
        matches!(
            self,
            SearchState::Suggested { .. } | SearchState::Corrected { .. } | SearchState::Empty { .. }
        )
    }
}

/// One search box's worth of state.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    state: SearchState,
    resolutions: u64,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Number of times the matcher has run in this session.
    pub fn resolutions(&self) -> u64 {
        self.resolutions
    }

    /// Record new input text. Blank text returns to `Idle`.
    pub fn input(&mut self, text: &str) -> &SearchState {
        self.state = if normalize(text).is_empty() {
            SearchState::Idle
        } else {
            SearchState::Querying {
                query: text.to_string(),
            }
        };
        &self.state
    }

    /// Close or clear the search box.
    pub fn clear(&mut self) {
        self.state = SearchState::Idle;
    }

    /// Run the pending query.
    ///
    /// Returns `None` (and leaves the state alone) unless a query is pending.
    pub fn resolve<'a>(&mut self, engine: &SearchEngine<'a>) -> Option<SearchOutcome<'a>> {
        let query = match &self.state {
            SearchState::Querying { query } => query.clone(),
            _ => return None,
        };

        let outcome = engine.search(&query);
        self.resolutions += 1;
        self.state = match &outcome {
            SearchOutcome::Idle => SearchState::Idle,
            SearchOutcome::Suggested(s) => SearchState::Suggested {
                query,
                count: s.len(),
            },
            SearchOutcome::Corrected(c) => SearchState::Corrected {
                query,
                correction: c.correction.clone().unwrap_or_default(),
            },
            SearchOutcome::Empty => SearchState::Empty { query },
        };
        Some(outcome)
    }
}
