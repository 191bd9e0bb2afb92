//! Full search pipeline command.

use anyhow::Result;
use jewel_commerce::search::{SearchEngine, SearchOutcome};
use jewel_observability::{QueryId, SearchMetrics, SearchMetricsCollector};
use serde::Serialize;

use super::{timed_search, SearchArgs};
use crate::context::Context;

#[derive(Serialize)]
struct SearchReport<'a> {
    query: &'a str,
    query_id: String,
    outcome: &'a SearchOutcome<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metrics: Option<&'a SearchMetrics>,
}

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let report = ctx.load_catalog()?;
    let config = ctx.search_config()?;
    let min_query_len = config.min_query_len;
    let engine = SearchEngine::new(&report.catalog, config);

    let query_id = QueryId::generate();
    let logger = ctx.logger(query_id.clone(), "search").with_query(&args.query);
    let mut collector = SearchMetricsCollector::new(query_id.clone());

    let outcome = timed_search(&engine, &args.query, &mut collector);
    let metrics = collector.finalize(outcome.kind());

    logger
        .debug_builder("search complete")
        .field("outcome", outcome.kind())
        .field_u64("results", outcome.result_count() as u64)
        .field_u64("total_us", metrics.total_duration_us)
        .emit();

    if ctx.output.is_json() {
        ctx.output.json(&SearchReport {
            query: &args.query,
            query_id: query_id.to_string(),
            outcome: &outcome,
            metrics: args.metrics.then_some(&metrics),
        });
        return Ok(());
    }

    print_outcome(ctx, &args.query, &outcome, min_query_len);

    if args.metrics {
        ctx.output.header("Metrics");
        ctx.output.line(&metrics.to_summary());
    }

    Ok(())
}

/// Render a search outcome the way the search panel would.
pub fn print_outcome(ctx: &Context, query: &str, outcome: &SearchOutcome<'_>, min_query_len: usize) {
    match outcome {
        SearchOutcome::Idle => {
            ctx.output.info(&format!(
                "Type at least {} characters to search",
                min_query_len
            ));
        }
        SearchOutcome::Suggested(suggestions) => {
            ctx.output
                .header(&format!("Suggestions for '{}' ({})", query, suggestions.len()));
            for suggestion in suggestions {
                ctx.output.suggestion(suggestion);
            }
        }
        SearchOutcome::Corrected(correction) => {
            ctx.output.warn(&format!("No results for '{}'", query));
            if let Some(ref term) = correction.correction {
                ctx.output.info(&format!("Did you mean {}?", console::style(term).bold()));
            }
            ctx.output.products(&correction.results);
        }
        SearchOutcome::Empty => {
            ctx.output.info(&format!("No results for '{}'", query));
        }
    }
}
