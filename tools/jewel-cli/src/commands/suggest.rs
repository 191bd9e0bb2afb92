//! Dropdown suggestions command.

use anyhow::{Context as _, Result};
use jewel_commerce::search::{SearchConfig, SearchEngine};
use jewel_observability::QueryId;

use super::SuggestArgs;
use crate::context::Context;

/// Run the suggest command.
pub async fn run(args: SuggestArgs, ctx: &Context) -> Result<()> {
    let report = ctx.load_catalog()?;
    let config = SearchConfig {
        max_suggestions: args.limit.unwrap_or(ctx.config.search.max_suggestions),
        ..ctx.config.search.clone()
    };
    config.validate().context("Invalid suggestion limit")?;

    let min_query_len = config.min_query_len;
    let engine = SearchEngine::new(&report.catalog, config);
    let suggestions = engine.suggest(&args.query);

    ctx.logger(QueryId::generate(), "suggest")
        .with_query(&args.query)
        .debug_builder("suggestions computed")
        .field_u64("count", suggestions.len() as u64)
        .emit();

    if ctx.output.is_json() {
        ctx.output.json(&suggestions);
        return Ok(());
    }

    if !engine.accepts(&args.query) {
        ctx.output.info(&format!(
            "Type at least {} characters to search",
            min_query_len
        ));
        return Ok(());
    }

    if suggestions.is_empty() {
        ctx.output.info(&format!("No suggestions for '{}'", args.query));
        ctx.output.info("Try `jewel correct` for a spelling suggestion.");
        return Ok(());
    }

    ctx.output
        .header(&format!("Suggestions for '{}'", args.query));
    for suggestion in &suggestions {
        ctx.output.suggestion(suggestion);
    }

    Ok(())
}
