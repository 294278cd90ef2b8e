use crate::OutputFormat;
use anyhow::{Context, Result};
use heron_core::analysis::{EndpointStats, Ranker, analyze_file};
use serde::Serialize;
use std::path::Path;

/// Ranked latency statistics for one log file
#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    pub file: String,
    pub total_lines: usize,
    pub unmatched_lines: usize,
    pub total_requests: usize,
    pub total_time: f64,
    pub endpoints: Vec<EndpointStats>,
}

/// Analyze a log file and keep the `report_size` slowest endpoints
pub fn analyze_log(file: &Path, report_size: usize) -> Result<StatsReport> {
    tracing::debug!("Reading log file: {}", file.display());

    let statistics =
        analyze_file(file).with_context(|| format!("Failed to analyze {}", file.display()))?;

    Ok(StatsReport {
        file: file.display().to_string(),
        total_lines: statistics.total_lines,
        unmatched_lines: statistics.unmatched_lines,
        total_requests: statistics.total_count,
        total_time: statistics.total_time,
        endpoints: Ranker::new(report_size).rank(statistics.endpoints),
    })
}

pub fn execute(file: &Path, report_size: usize, format: OutputFormat) -> Result<()> {
    tracing::info!("Extracting statistics from log file: {}", file.display());

    let report = analyze_log(file, report_size)?;

    match format {
        OutputFormat::Json => output_json(&report)?,
        OutputFormat::Table => output_table(&report),
        OutputFormat::Pretty => output_pretty(&report),
    }

    Ok(())
}

fn output_pretty(report: &StatsReport) {
    use console::style;

    println!("\n{}", style("Access Log Latency Report").bold().cyan());
    println!("{}", style("=========================").cyan());

    println!("\n{}", style("Summary:").bold());
    println!("  File:             {}", report.file);
    println!("  Lines Read:       {}", report.total_lines);
    println!("  Unmatched Lines:  {}", report.unmatched_lines);
    println!("  Requests:         {}", report.total_requests);
    println!("  Total Time:       {:.3} s", report.total_time);

    if report.endpoints.is_empty() {
        println!("\n  No requests found.");
        println!();
        return;
    }

    println!("\n{}", style("Slowest Endpoints (by total time):").bold());
    for (i, e) in report.endpoints.iter().enumerate() {
        println!(
            "  {:>3}. [{:>9.3} s {:>6.2}%] {:>6} req avg={:.3} med={:.3} max={:.3}  {}",
            i + 1,
            e.time_sum,
            e.time_perc,
            e.count,
            e.time_avg,
            e.time_med,
            e.time_max,
            style(&e.url).dim()
        );
    }

    println!(); // trailing newline
}

fn output_json(report: &StatsReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{}", json);
    Ok(())
}

fn output_table(report: &StatsReport) {
    println!("url,count,count_perc,time_sum,time_perc,time_avg,time_max,time_med");
    for e in &report.endpoints {
        println!(
            "{},{},{},{},{},{},{},{}",
            e.url, e.count, e.count_perc, e.time_sum, e.time_perc, e.time_avg, e.time_max, e.time_med
        );
    }
}
