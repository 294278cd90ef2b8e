use super::EndpointStats;

/// Orders endpoints by total time spent and keeps the heaviest ones
pub struct Ranker {
    report_size: usize,
}

impl Ranker {
    pub fn new(report_size: usize) -> Self {
        Self { report_size }
    }

    /// Sort by `time_sum` descending and truncate to the report size
    ///
    /// The sort is stable, so endpoints with equal totals keep their
    /// first-seen order.
    pub fn rank(&self, mut endpoints: Vec<EndpointStats>) -> Vec<EndpointStats> {
        endpoints.sort_by(|a, b| b.time_sum.total_cmp(&a.time_sum));
        endpoints.truncate(self.report_size);

        tracing::debug!("Ranked report holds {} endpoints", endpoints.len());

        endpoints
    }
}
