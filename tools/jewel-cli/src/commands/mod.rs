//! CLI command implementations.

pub mod browse;
pub mod catalog;
pub mod config;
pub mod correct;
pub mod search;
pub mod suggest;
pub mod typing;

use clap::{Args, Subcommand};
use jewel_commerce::search::{SearchEngine, SearchOutcome};
use jewel_observability::SearchMetricsCollector;

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Query text, as typed.
    pub query: String,

    /// Print phase timings.
    #[arg(long)]
    pub metrics: bool,
}

/// Arguments for the suggest command.
#[derive(Args)]
pub struct SuggestArgs {
    /// Query text, as typed.
    pub query: String,

    /// Maximum suggestions (overrides search.max_suggestions).
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the correct command.
#[derive(Args)]
pub struct CorrectArgs {
    /// Query text, as typed.
    pub query: String,

    /// Minimum similarity (overrides search.similarity_threshold).
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Show every candidate above the threshold.
    #[arg(long)]
    pub candidates: bool,
}

/// Arguments for the browse command.
#[derive(Args)]
pub struct BrowseArgs {
    /// Free-text filter over name, category and tags.
    #[arg(short, long)]
    pub query: Option<String>,

    /// Category name or slug (repeat for any-of).
    #[arg(long = "category")]
    pub categories: Vec<String>,

    /// Metal type (gold, white_gold, rose_gold, platinum, silver).
    #[arg(short, long)]
    pub metal: Option<String>,

    /// Minimum price, in catalog currency.
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Maximum price, in catalog currency.
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Only in-stock pieces.
    #[arg(long)]
    pub in_stock: bool,

    /// Only new arrivals.
    #[arg(long)]
    pub new_arrivals: bool,

    /// Tag (repeat for any-of).
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Purity code (e.g., 22K).
    #[arg(long)]
    pub purity: Option<String>,

    /// Sort order (featured, price_asc, price_desc, name_asc, name_desc, newest).
    #[arg(short, long, default_value = "featured")]
    pub sort: String,

    /// Page number (1-indexed).
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Items per page.
    #[arg(long, default_value_t = 24)]
    pub per_page: usize,

    /// Show category and metal facets.
    #[arg(long)]
    pub facets: bool,
}

/// Arguments for the type command.
#[derive(Args)]
pub struct TypeArgs {
    /// Text to type, one character per keystroke.
    pub text: String,

    /// Delay between keystrokes in milliseconds.
    #[arg(short, long, default_value_t = 60)]
    pub interval_ms: u64,

    /// Debounce window (overrides search.debounce_ms).
    #[arg(long)]
    pub debounce_ms: Option<u64>,
}

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommand,
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List products
    List {
        /// Only products in this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Show one product
    Show {
        /// Product id
        id: String,
    },

    /// List categories with product counts
    Categories,

    /// Validate a catalog file
    Validate {
        /// Catalog file (default: the catalog in effect)
        path: Option<String>,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize a jewel.toml in the current directory
    Init {
        /// Overwrite an existing file without asking
        #[arg(short, long)]
        force: bool,

        /// Catalog path to record in the new file
        #[arg(long)]
        catalog_path: Option<String>,
    },

    /// Validate configuration
    Validate,
}

/// Run the search pipeline, timing the suggest and fuzzy phases.
///
/// Produces the same outcome as [`SearchEngine::search`].
pub fn timed_search<'a>(
    engine: &SearchEngine<'a>,
    query: &str,
    metrics: &mut SearchMetricsCollector,
) -> SearchOutcome<'a> {
    metrics.set_query(query);
    if !engine.accepts(query) {
        return SearchOutcome::Idle;
    }

    metrics.start_phase("suggest");
    let suggestions = engine.suggest(query);
    metrics.end_phase("suggest");
    metrics.record_suggestions(suggestions.len());
    if !suggestions.is_empty() {
        return SearchOutcome::Suggested(suggestions);
    }

    metrics.start_phase("fuzzy");
    let correction = engine.correct(query);
    metrics.end_phase("fuzzy");
    metrics.record_results(correction.results.len());
    match correction.correction {
        Some(ref term) => {
            metrics.record_correction(term.clone());
            SearchOutcome::Corrected(correction)
        }
        None => SearchOutcome::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jewel_commerce::catalog::Catalog;
    use jewel_commerce::search::SearchConfig;
    use jewel_observability::QueryId;

    #[test]
    fn test_timed_search_matches_engine() {
        let catalog = Catalog::builtin().unwrap();
        let engine = SearchEngine::new(&catalog, SearchConfig::default());

        for query in ["", "d", "dia", "earings", "zzzzz", "Rose Gold"] {
            let mut metrics = SearchMetricsCollector::new(QueryId::from_string("t"));
            assert_eq!(timed_search(&engine, query, &mut metrics), engine.search(query));
        }
    }

    #[test]
    fn test_timed_search_records_phases() {
        let catalog = Catalog::builtin().unwrap();
        let engine = SearchEngine::new(&catalog, SearchConfig::default());

        let mut metrics = SearchMetricsCollector::new(QueryId::from_string("t"));
        let outcome = timed_search(&engine, "earings", &mut metrics);
        let metrics = metrics.finalize(outcome.kind());

        assert!(metrics.phases.contains_key("suggest"));
        assert!(metrics.phases.contains_key("fuzzy"));
        assert_eq!(metrics.corrected_to.as_deref(), Some("Earrings"));
        assert_eq!(metrics.suggestion_count, 0);
        assert!(metrics.result_count > 0);
    }
}
