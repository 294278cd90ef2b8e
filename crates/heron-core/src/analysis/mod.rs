mod aggregator;
mod ranker;

pub use aggregator::{Aggregator, MAX_ERROR_RATE, analyze_file};
pub use ranker::Ranker;

use serde::Serialize;

/// Latency statistics for a single endpoint
///
/// Field order matches the report JSON schema consumed by the HTML template.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointStats {
    pub count: usize,
    pub count_perc: f64,
    pub time_sum: f64,
    pub time_perc: f64,
    pub time_avg: f64,
    pub time_max: f64,
    pub time_med: f64,
    pub url: String,
}

/// Result of aggregating one log file
#[derive(Debug, Clone, Serialize)]
pub struct Statistics {
    /// Per-endpoint stats, in first-seen order
    pub endpoints: Vec<EndpointStats>,
    pub total_count: usize,
    pub total_time: f64,
    pub total_lines: usize,
    pub unmatched_lines: usize,
}
