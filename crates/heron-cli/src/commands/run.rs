//! The batch pipeline behind `heron run`.
//!
//! Finds the newest access log in the configured log directory, skips it if
//! its report already exists, otherwise aggregates it and writes
//! `report_<YYYYMMDD>.html` into the reports directory.

use anyhow::{Context, Result};
use heron_core::Config;
use heron_core::access_log::find_latest_log;
use heron_core::analysis::{Ranker, analyze_file};
use heron_core::report::{ReportRenderer, ReportWriter};
use std::fs;
use std::path::PathBuf;

/// What a run ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// A new report was written
    Generated(PathBuf),
    /// The report for the latest log already existed
    AlreadyGenerated(PathBuf),
    /// The log directory holds no access log
    NoLogFound,
}

pub fn execute(config: &Config) -> Result<RunOutcome> {
    let latest = find_latest_log(&config.log_dir).with_context(|| {
        format!("Failed to list log directory {}", config.log_dir.display())
    })?;

    let Some(latest) = latest else {
        tracing::error!("No log file was found in {}", config.log_dir.display());
        return Ok(RunOutcome::NoLogFound);
    };

    let date_stamp = latest.date_stamp();
    let report_path = ReportWriter::report_path(&config.reports_dir, &date_stamp);

    if ReportWriter::exists(&config.reports_dir, &date_stamp) {
        tracing::info!(
            "The latest log {} has already been parsed into {}",
            latest.path.display(),
            report_path.display()
        );
        return Ok(RunOutcome::AlreadyGenerated(report_path));
    }

    let template = fs::read_to_string(&config.template).with_context(|| {
        format!("Failed to read report template {}", config.template.display())
    })?;

    let statistics = analyze_file(&latest.path)
        .with_context(|| format!("Failed to analyze {}", latest.path.display()))?;

    let ranked = Ranker::new(config.report_size).rank(statistics.endpoints);
    let html = ReportRenderer::render(&template, &ranked)?;

    let written = ReportWriter::to_file(&config.reports_dir, &date_stamp, &html)
        .with_context(|| format!("Failed to write report {}", report_path.display()))?;

    tracing::info!(
        "Report {} was generated with {} endpoints",
        written.display(),
        ranked.len()
    );

    Ok(RunOutcome::Generated(written))
}
