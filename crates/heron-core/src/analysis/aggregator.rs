use super::{EndpointStats, Statistics};
use crate::access_log::{LineParser, LogReader, ParsedEntry};
use crate::{Error, Result};
use std::collections::HashMap;
use std::path::Path;

/// Largest tolerated share of unmatched lines in a single log file
pub const MAX_ERROR_RATE: f64 = 0.5;

/// Groups response times by endpoint over a single pass of a log file
#[derive(Debug, Default)]
pub struct Aggregator {
    index: HashMap<String, usize>,
    buckets: Vec<(String, Vec<f64>)>,
    total_lines: usize,
    unmatched: usize,
    total_time: f64,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw line and account for it, matched or not
    pub fn record_line(&mut self, line: &str) {
        match LineParser::parse(line) {
            Some(entry) => self.push(entry),
            None => self.record_unmatched(),
        }
    }

    pub fn push(&mut self, entry: ParsedEntry) {
        self.total_lines += 1;
        self.total_time += entry.time;

        match self.index.get(&entry.url) {
            Some(&slot) => self.buckets[slot].1.push(entry.time),
            None => {
                self.index.insert(entry.url.clone(), self.buckets.len());
                self.buckets.push((entry.url, vec![entry.time]));
            }
        }
    }

    pub fn record_unmatched(&mut self) {
        self.total_lines += 1;
        self.unmatched += 1;
    }

    pub fn total_lines(&self) -> usize {
        self.total_lines
    }

    pub fn unmatched(&self) -> usize {
        self.unmatched
    }

    /// Share of attempted lines that failed to parse; 0 when nothing was read
    pub fn error_rate(&self) -> f64 {
        if self.total_lines == 0 {
            0.0
        } else {
            self.unmatched as f64 / self.total_lines as f64
        }
    }

    /// Close the pass and compute per-endpoint statistics
    ///
    /// Fails with [`Error::ParseQuality`] when more than half of the lines
    /// could not be parsed.
    pub fn finish(self) -> Result<Statistics> {
        let error_rate = self.error_rate();
        tracing::debug!(
            "Aggregation pass done: {} lines, {} unmatched ({:.2}%)",
            self.total_lines,
            self.unmatched,
            error_rate * 100.0
        );

        if error_rate > MAX_ERROR_RATE {
            return Err(Error::ParseQuality {
                unmatched: self.unmatched,
                total: self.total_lines,
                rate_percent: error_rate * 100.0,
            });
        }

        let total_count = self.total_lines - self.unmatched;
        let total_time = self.total_time;

        let endpoints: Vec<EndpointStats> = self
            .buckets
            .into_iter()
            .map(|(url, times)| summarize(url, times, total_count, total_time))
            .collect();

        tracing::info!(
            "Aggregated {} requests across {} endpoints",
            total_count,
            endpoints.len()
        );

        Ok(Statistics {
            endpoints,
            total_count,
            total_time,
            total_lines: self.total_lines,
            unmatched_lines: self.unmatched,
        })
    }
}

/// Read, parse and aggregate a whole log file
pub fn analyze_file(path: &Path) -> Result<Statistics> {
    tracing::debug!("Analyzing log file: {}", path.display());

    let mut aggregator = Aggregator::new();
    for line in LogReader::open(path)? {
        aggregator.record_line(&line?);
    }

    aggregator.finish()
}

fn summarize(url: String, mut times: Vec<f64>, total_count: usize, total_time: f64) -> EndpointStats {
    let count = times.len();
    let time_sum = round3(times.iter().sum());
    let time_avg = round3(time_sum / count as f64);
    let time_max = times.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    // Upper-middle element for even counts, never an averaged median
    times.sort_by(f64::total_cmp);
    let time_med = times[count / 2];

    let time_perc = if total_time > 0.0 {
        round3(time_sum / total_time * 100.0)
    } else {
        0.0
    };

    EndpointStats {
        count,
        count_perc: round3(count as f64 / total_count as f64 * 100.0),
        time_sum,
        time_perc,
        time_avg,
        time_max,
        time_med,
        url,
    }
}

/// Round to 3 decimals from the exact binary value
///
/// Scaling by 1000 first can land a value just below a tie on an exact `.5`,
/// which `f64::round` then pushes up.
fn round3(value: f64) -> f64 {
    format!("{value:.3}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(url: &str, time: f64) -> ParsedEntry {
        ParsedEntry {
            url: url.to_string(),
            time,
        }
    }

    fn aggregate(data: &[(&str, Vec<f64>)]) -> Statistics {
        let mut agg = Aggregator::new();
        for (url, times) in data {
            for time in times {
                agg.push(entry(url, *time));
            }
        }
        agg.finish().unwrap()
    }

    fn find<'a>(stats: &'a Statistics, url: &str) -> &'a EndpointStats {
        stats.endpoints.iter().find(|s| s.url == url).unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_statistics_correctness() {
        let stats = aggregate(&[("/api/1", vec![0.2, 0.4, 0.6]), ("/api/2", vec![0.1, 0.2, 0.3, 0.4])]);

        assert_eq!(stats.total_count, 7);
        assert_close(stats.total_time, 2.2);

        let first = find(&stats, "/api/1");
        assert_eq!(first.count, 3);
        assert_close(first.count_perc, 42.857);
        assert_close(first.time_sum, 1.2);
        assert_close(first.time_perc, 54.545);
        assert_close(first.time_avg, 0.4);
        assert_eq!(first.time_max, 0.6);
        assert_eq!(first.time_med, 0.4);

        let second = find(&stats, "/api/2");
        assert_eq!(second.count, 4);
        assert_close(second.count_perc, 57.143);
        assert_close(second.time_sum, 1.0);
        assert_close(second.time_perc, 45.455);
        assert_close(second.time_avg, 0.25);
        assert_eq!(second.time_max, 0.4);
        assert_eq!(second.time_med, 0.3);
    }

    #[test]
    fn test_median_uses_index_half_of_sorted_times() {
        let stats = aggregate(&[("/unsorted", vec![0.4, 0.1, 0.3, 0.2])]);
        assert_eq!(find(&stats, "/unsorted").time_med, 0.3);
    }

    #[test]
    fn test_single_sample_endpoint() {
        let stats = aggregate(&[("/one", vec![0.731])]);
        let one = find(&stats, "/one");
        assert_eq!(one.time_max, 0.731);
        assert_eq!(one.time_med, 0.731);
        assert_eq!(one.time_avg, 0.731);
        assert_close(one.count_perc, 100.0);
        assert_close(one.time_perc, 100.0);
    }

    #[test]
    fn test_count_percentages_sum_to_hundred() {
        let stats = aggregate(&[
            ("/a", vec![0.1, 0.2]),
            ("/b", vec![0.3]),
            ("/c", vec![0.4, 0.5, 0.6]),
        ]);
        let total: f64 = stats.endpoints.iter().map(|s| s.count_perc).sum();
        assert!((total - 100.0).abs() < 0.01, "got {total}");
    }

    #[test]
    fn test_endpoints_keep_first_seen_order() {
        let mut agg = Aggregator::new();
        agg.push(entry("/b", 0.1));
        agg.push(entry("/a", 0.2));
        agg.push(entry("/b", 0.3));
        agg.push(entry("/c", 0.4));

        let stats = agg.finish().unwrap();
        let urls: Vec<&str> = stats.endpoints.iter().map(|s| s.url.as_str()).collect();
        assert_eq!(urls, vec!["/b", "/a", "/c"]);
    }

    #[test]
    fn test_error_rate_above_half_is_fatal() {
        let mut agg = Aggregator::new();
        for _ in 0..4 {
            agg.push(entry("/ok", 0.1));
        }
        for _ in 0..6 {
            agg.record_unmatched();
        }

        assert_close(agg.error_rate(), 0.6);
        match agg.finish() {
            Err(Error::ParseQuality {
                unmatched, total, ..
            }) => {
                assert_eq!(unmatched, 6);
                assert_eq!(total, 10);
            }
            other => panic!("expected ParseQuality error, got {other:?}"),
        }
    }

    #[test]
    fn test_error_rate_of_exactly_half_passes() {
        let mut agg = Aggregator::new();
        agg.record_line("garbage");
        agg.record_line(r#""GET /x HTTP/1.1" 200 1 0.5"#);

        assert_eq!(agg.total_lines(), 2);
        assert_eq!(agg.unmatched(), 1);
        let stats = agg.finish().unwrap();
        assert_eq!(stats.unmatched_lines, 1);
        assert_eq!(stats.endpoints.len(), 1);
    }

    #[test]
    fn test_empty_input_is_not_an_error() {
        let agg = Aggregator::new();
        assert_eq!(agg.error_rate(), 0.0);

        let stats = agg.finish().unwrap();
        assert!(stats.endpoints.is_empty());
        assert_eq!(stats.total_count, 0);
    }

    #[test]
    fn test_zero_total_time_gives_zero_time_share() {
        let stats = aggregate(&[("/fast", vec![0.0, 0.0])]);
        let fast = find(&stats, "/fast");
        assert_eq!(fast.time_perc, 0.0);
        assert_eq!(fast.time_sum, 0.0);
    }

    #[test]
    fn test_round3() {
        assert_eq!(round3(1.2000000000000002), 1.2);
        assert_eq!(round3(0.12345), 0.123);
        assert_eq!(round3(2.0), 2.0);
        assert_eq!(round3(1.0005), 1.0);
    }

    #[test]
    fn test_average_rounds_from_exact_value() {
        // 2.001 / 2 is stored just below 1.0005
        let stats = aggregate(&[("/x", vec![1.0, 1.001])]);
        let x = find(&stats, "/x");
        assert_eq!(x.time_sum, 2.001);
        assert_eq!(x.time_avg, 1.0);
    }
}
