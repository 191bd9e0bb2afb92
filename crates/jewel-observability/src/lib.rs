//! Observability for the storefront search tools.
//!
//! This crate provides:
//! - `QueryId` - Identifier correlating log lines and metrics for one query
//! - `StructuredLogger` - Structured logging with query context
//! - `SearchMetricsCollector` - Per-phase timings for one search

mod id;
mod logging;
mod metrics;

pub use id::*;
pub use logging::*;
pub use metrics::*;
