//! Per-query timing metrics.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::QueryId;

/// Metrics for a single executed query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchMetrics {
    /// Query ID for correlation.
    pub query_id: String,
    /// Raw query text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Outcome name (idle, suggested, corrected, empty).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
    /// Phase timings, keyed by phase name.
    pub phases: BTreeMap<String, PhaseMetrics>,
    /// Number of suggestions returned.
    pub suggestion_count: usize,
    /// Number of products returned.
    pub result_count: usize,
    /// Term substituted by fuzzy correction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrected_to: Option<String>,
    /// Total duration (microseconds).
    pub total_duration_us: u64,
}

/// Timing for one phase of query handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseMetrics {
    /// Phase name (e.g., "suggest", "fuzzy").
    pub name: String,
    /// Time from query start to phase start (microseconds).
    pub start_us: u64,
    /// Phase duration (microseconds).
    pub duration_us: u64,
}

/// Collector for search metrics.
#[derive(Debug)]
pub struct SearchMetricsCollector {
    query_id: QueryId,
    query: Option<String>,
    start: Instant,
    open_phases: BTreeMap<String, Instant>,
    phases: BTreeMap<String, PhaseMetrics>,
    suggestion_count: usize,
    result_count: usize,
    corrected_to: Option<String>,
}

impl SearchMetricsCollector {
    /// Create a new metrics collector.
    pub fn new(query_id: QueryId) -> Self {
        Self {
            query_id,
            query: None,
            start: Instant::now(),
            open_phases: BTreeMap::new(),
            phases: BTreeMap::new(),
            suggestion_count: 0,
            result_count: 0,
            corrected_to: None,
        }
    }

    /// Set the raw query text.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = Some(query.into());
    }

    /// Record phase start.
    pub fn start_phase(&mut self, name: &str) {
        self.open_phases.insert(name.to_string(), Instant::now());
    }

    /// Record phase end. A phase that was never started is recorded with zero duration.
    pub fn end_phase(&mut self, name: &str) {
        let now = Instant::now();
        let started = self.open_phases.remove(name).unwrap_or(now);
        self.insert_phase(name, started, now.duration_since(started));
    }

    /// Record an already-measured phase ending now.
    pub fn record_phase(&mut self, name: &str, duration: Duration) {
        let now = Instant::now();
        let started = now.checked_sub(duration).unwrap_or(self.start).max(self.start);
        self.insert_phase(name, started, duration);
    }

    fn insert_phase(&mut self, name: &str, started: Instant, duration: Duration) {
        self.phases.insert(
            name.to_string(),
            PhaseMetrics {
                name: name.to_string(),
                start_us: started.duration_since(self.start).as_micros() as u64,
                duration_us: duration.as_micros() as u64,
            },
        );
    }

    /// Record how many suggestions were produced.
    pub fn record_suggestions(&mut self, count: usize) {
        self.suggestion_count = count;
    }

    /// Record how many products were produced.
    pub fn record_results(&mut self, count: usize) {
        self.result_count = count;
    }

    /// Record the term a fuzzy correction substituted.
    pub fn record_correction(&mut self, term: impl Into<String>) {
        self.corrected_to = Some(term.into());
    }

    /// Get total elapsed time.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Finalize and return the metrics. Phases still open are closed now.
    pub fn finalize(mut self, outcome: &str) -> SearchMetrics {
        let open: Vec<String> = self.open_phases.keys().cloned().collect();
        for name in open {
            self.end_phase(&name);
        }

        SearchMetrics {
            query_id: self.query_id.to_string(),
            query: self.query,
            outcome: Some(outcome.to_string()),
            phases: self.phases,
            suggestion_count: self.suggestion_count,
            result_count: self.result_count,
            corrected_to: self.corrected_to,
            total_duration_us: self.start.elapsed().as_micros() as u64,
        }
    }
}

impl SearchMetrics {
    /// Format as JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Format as JSON (pretty printed).
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Format as human-readable summary.
    pub fn to_summary(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Query: {}", self.query_id));

        if let Some(ref query) = self.query {
            lines.push(format!("  Text: {:?}", query));
        }

        if let Some(ref outcome) = self.outcome {
            lines.push(format!("  Outcome: {}", outcome));
        }

        if let Some(ref term) = self.corrected_to {
            lines.push(format!("  Corrected to: {}", term));
        }

        lines.push(format!(
            "  Suggestions: {}  Results: {}",
            self.suggestion_count, self.result_count
        ));

        lines.push(format!(
            "  Total: {}us ({:.2}ms)",
            self.total_duration_us,
            self.total_duration_us as f64 / 1000.0
        ));

        if !self.phases.is_empty() {
            lines.push("  Phases:".to_string());
            for phase in self.phases.values() {
                lines.push(format!(
                    "    {}: {}us ({:.2}ms)",
                    phase.name,
                    phase.duration_us,
                    phase.duration_us as f64 / 1000.0
                ));
            }
        }

        lines.join("\n")
    }
}
