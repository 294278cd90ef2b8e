use crate::Result;
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

lazy_static! {
    static ref LOG_NAME_PATTERN: Regex =
        Regex::new(r"^[\w.-]+-access-ui\.log-(\d{8})(\.gz)?$").unwrap();
}

/// The newest access log found in a log directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestLog {
    pub path: PathBuf,
    pub date: NaiveDate,
}

impl LatestLog {
    /// Date stamp in `YYYYMMDD` form, as embedded in the file name
    pub fn date_stamp(&self) -> String {
        self.date.format("%Y%m%d").to_string()
    }
}

/// Find the most recent `<prefix>-access-ui.log-<YYYYMMDD>[.gz]` in `dir`
///
/// Returns `Ok(None)` when the directory holds no matching file. When a
/// plain and a gzipped log share the same date, the plain one wins.
pub fn find_latest_log(dir: &Path) -> Result<Option<LatestLog>> {
    tracing::debug!("Searching for access logs in: {}", dir.display());

    let mut latest: Option<(NaiveDate, bool, PathBuf)> = None;

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };

        let Some((date, gzipped)) = match_log_name(name) else {
            continue;
        };

        let is_newer = match &latest {
            None => true,
            Some((best_date, best_gzipped, _)) => {
                date > *best_date || (date == *best_date && *best_gzipped && !gzipped)
            }
        };

        if is_newer {
            latest = Some((date, gzipped, entry.path()));
        }
    }

    let latest = latest.map(|(date, _, path)| LatestLog { path, date });

    match &latest {
        Some(log) => tracing::info!("Found latest log file: {}", log.path.display()),
        None => tracing::debug!("No access log matched in {}", dir.display()),
    }

    Ok(latest)
}

/// Match a file name against the log naming scheme, returning its date and
/// whether it is gzipped
fn match_log_name(name: &str) -> Option<(NaiveDate, bool)> {
    let captures = LOG_NAME_PATTERN.captures(name)?;

    match NaiveDate::parse_from_str(&captures[1], "%Y%m%d") {
        Ok(date) => Some((date, captures.get(2).is_some())),
        Err(e) => {
            tracing::debug!("Skipping {name}: invalid date stamp ({e})");
            None
        }
    }
}
