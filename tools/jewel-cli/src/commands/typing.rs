//! Simulated typing through the debounced search box.

use std::time::Duration;

use anyhow::Result;
use jewel_commerce::search::{Debouncer, SearchEngine, SearchOutcome, SearchSession, SearchState};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::time::Instant;

use super::search::print_outcome;
use super::TypeArgs;
use crate::context::Context;

/// Grace period for the final debounce window to fire.
const SETTLE_GRACE: Duration = Duration::from_millis(500);

/// One debounced search that actually ran.
#[derive(Debug, Clone, Serialize)]
pub struct TypingEvent {
    /// Milliseconds since the first keystroke.
    pub elapsed_ms: u64,
    pub query: String,
    pub state: SearchState,
}

/// Result of a typing simulation.
#[derive(Debug, Serialize)]
pub struct Simulation<'a> {
    pub keystrokes: usize,
    pub events: Vec<TypingEvent>,
    pub final_state: SearchState,
    #[serde(skip)]
    pub last_outcome: Option<SearchOutcome<'a>>,
}

/// Run the type command.
pub async fn run(args: TypeArgs, ctx: &Context) -> Result<()> {
    let report = ctx.load_catalog()?;
    let config = ctx.search_config()?;
    let delay = args
        .debounce_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.debounce());
    let min_query_len = config.min_query_len;
    let engine = SearchEngine::new(&report.catalog, config);

    ctx.output.debug(&format!(
        "Keystroke every {}ms, debounce {}ms",
        args.interval_ms,
        delay.as_millis()
    ));

    let spinner = ctx.output.spinner("Typing...");
    let simulation = simulate(
        &engine,
        &args.text,
        Duration::from_millis(args.interval_ms),
        delay,
        |typed| spinner.set_message(format!("Typing: {}", typed)),
    )
    .await?;
    spinner.finish_and_clear();

    if ctx.output.is_json() {
        ctx.output.json(&simulation);
        return Ok(());
    }

    ctx.output.header(&format!(
        "{} keystrokes, {} searches",
        simulation.keystrokes,
        simulation.events.len()
    ));
    for event in &simulation.events {
        ctx.output.table_row(
            &[
                format!("+{}ms", event.elapsed_ms).as_str(),
                format!("'{}'", event.query).as_str(),
                event.state.name(),
            ],
            &[8, 24, 0],
        );
    }

    match simulation.last_outcome {
        Some(ref outcome) => {
            let query = simulation.final_state.query().unwrap_or_default();
            print_outcome(ctx, query, outcome, min_query_len);
        }
        None => ctx.output.info("No search ran."),
    }

    Ok(())
}

/// Type `text` one character at a time, searching whenever the debounce
/// window closes.
///
/// Fires for a query that has since been extended are ignored.
pub async fn simulate<'a, F>(
    engine: &SearchEngine<'a>,
    text: &str,
    interval: Duration,
    delay: Duration,
    mut on_key: F,
) -> Result<Simulation<'a>>
where
    F: FnMut(&str),
{
    let (fired_tx, mut fired_rx) = mpsc::unbounded_channel::<String>();
    let debouncer = Debouncer::spawn(delay, move |query: String| {
        let _ = fired_tx.send(query);
    });

    let started = Instant::now();
    let mut session = SearchSession::new();
    let mut simulation = Simulation {
        keystrokes: 0,
        events: Vec::new(),
        final_state: SearchState::Idle,
        last_outcome: None,
    };

    let mut typed = String::new();
    for ch in text.chars() {
        typed.push(ch);
        simulation.keystrokes += 1;
        on_key(&typed);

        session.input(&typed);
        debouncer.push(typed.clone())?;
        tokio::time::sleep(interval).await;

        while let Ok(query) = fired_rx.try_recv() {
            resolve(engine, &mut session, &query, started, &mut simulation);
        }
    }

    if matches!(session.state(), SearchState::Querying { .. }) {
        if let Ok(Some(query)) = tokio::time::timeout(delay + SETTLE_GRACE, fired_rx.recv()).await {
            resolve(engine, &mut session, &query, started, &mut simulation);
        }
    }

    debouncer.shutdown().await;
    simulation.final_state = session.state().clone();
    Ok(simulation)
}

fn resolve<'a>(
    engine: &SearchEngine<'a>,
    session: &mut SearchSession,
    query: &str,
    started: Instant,
    simulation: &mut Simulation<'a>,
) {
    if session.state().query() != Some(query) {
        return;
    }
    if let Some(outcome) = session.resolve(engine) {
        simulation.events.push(TypingEvent {
            elapsed_ms: started.elapsed().as_millis() as u64,
            query: query.to_string(),
            state: session.state().clone(),
        });
        simulation.last_outcome = Some(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jewel_commerce::catalog::Catalog;
    use jewel_commerce::search::SearchConfig;

    #[tokio::test(start_paused = true)]
    async fn test_fast_typing_searches_once() {
        let catalog = Catalog::builtin().unwrap();
        let engine = SearchEngine::new(&catalog, SearchConfig::default());

        let mut keys = Vec::new();
        let simulation = simulate(
            &engine,
            "earings",
            Duration::from_millis(50),
            Duration::from_millis(150),
            |typed| keys.push(typed.to_string()),
        )
        .await
        .unwrap();

        assert_eq!(keys.len(), 7);
        assert_eq!(simulation.keystrokes, 7);
        assert_eq!(simulation.events.len(), 1);
        assert_eq!(simulation.events[0].query, "earings");
        assert_eq!(
            simulation.final_state,
            SearchState::Corrected {
                query: "earings".to_string(),
                correction: "Earrings".to_string(),
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_typing_searches_each_prefix() {
        let catalog = Catalog::builtin().unwrap();
        let engine = SearchEngine::new(&catalog, SearchConfig::default());

        let simulation = simulate(
            &engine,
            "ring",
            Duration::from_millis(300),
            Duration::from_millis(150),
            |_| {},
        )
        .await
        .unwrap();

        let queries: Vec<&str> = simulation.events.iter().map(|e| e.query.as_str()).collect();
        assert_eq!(queries, vec!["r", "ri", "rin", "ring"]);
        assert_eq!(simulation.events[0].state, SearchState::Idle);
        assert_eq!(simulation.final_state.name(), "suggested");
    }
}
