//! "Did you mean" correction command.

use anyhow::{Context as _, Result};
use jewel_commerce::search::{rank_candidates, SearchConfig, SearchEngine};
use jewel_observability::QueryId;
use serde::Serialize;

use super::CorrectArgs;
use crate::context::Context;

#[derive(Serialize)]
struct CandidateRow<'a> {
    term: &'a str,
    score: f64,
}

/// Run the correct command.
pub async fn run(args: CorrectArgs, ctx: &Context) -> Result<()> {
    let report = ctx.load_catalog()?;
    let config = SearchConfig {
        similarity_threshold: args
            .threshold
            .unwrap_or(ctx.config.search.similarity_threshold),
        ..ctx.config.search.clone()
    };
    config.validate().context("Invalid similarity threshold")?;

    let threshold = config.similarity_threshold;
    let engine = SearchEngine::new(&report.catalog, config);
    let correction = engine.correct(&args.query);

    let logger = ctx.logger(QueryId::generate(), "correct").with_query(&args.query);
    logger
        .debug_builder("correction computed")
        .field("correction", correction.correction.clone().unwrap_or_default())
        .field_u64("results", correction.results.len() as u64)
        .field_f64("threshold", threshold)
        .emit();

    let candidates = if args.candidates {
        rank_candidates(
            &args.query,
            report.catalog.products(),
            report.catalog.categories(),
            threshold,
        )
    } else {
        Vec::new()
    };

    if ctx.output.is_json() {
        let rows: Vec<CandidateRow<'_>> = candidates
            .iter()
            .map(|c| CandidateRow {
                term: &c.display,
                score: c.score,
            })
            .collect();
        ctx.output.json(&serde_json::json!({
            "query": args.query,
            "correction": correction,
            "candidates": rows,
        }));
        return Ok(());
    }

    match correction.correction {
        Some(ref term) => {
            ctx.output.success(&format!("Did you mean {}?", term));
            ctx.output.products(&correction.results);
        }
        None => {
            ctx.output
                .info(&format!("No correction for '{}' at threshold {}", args.query, threshold));
        }
    }

    if args.candidates {
        ctx.output.header("Candidates");
        for candidate in &candidates {
            ctx.output.table_row(
                &[format!("{:.3}", candidate.score).as_str(), candidate.display.as_str()],
                &[6, 0],
            );
        }
    }

    Ok(())
}
