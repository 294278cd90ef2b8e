use crate::Result;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub struct ReportWriter;

impl ReportWriter {
    /// `report_<YYYYMMDD>.html` inside the reports directory
    pub fn report_path(reports_dir: &Path, date_stamp: &str) -> PathBuf {
        reports_dir.join(format!("report_{date_stamp}.html"))
    }

    /// Whether the report for this date has already been generated
    pub fn exists(reports_dir: &Path, date_stamp: &str) -> bool {
        Self::report_path(reports_dir, date_stamp).is_file()
    }

    /// Write a rendered report, creating the reports directory if needed
    ///
    /// The HTML goes to a temporary sibling first and is renamed into place,
    /// so a partial report is never visible under the final name.
    pub fn to_file(reports_dir: &Path, date_stamp: &str, html: &str) -> Result<PathBuf> {
        fs::create_dir_all(reports_dir)?;

        let path = Self::report_path(reports_dir, date_stamp);
        let tmp_path = path.with_extension("html.tmp");
        tracing::debug!("Writing report to: {}", tmp_path.display());

        {
            let mut writer = BufWriter::new(File::create(&tmp_path)?);
            writer.write_all(html.as_bytes())?;
            writer.flush()?;
        }
        fs::rename(&tmp_path, &path)?;

        tracing::info!("Wrote report {}", path.display());

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_report_path() {
        let path = ReportWriter::report_path(Path::new("reports"), "20170630");
        assert_eq!(path, PathBuf::from("reports/report_20170630.html"));
    }

    #[test]
    fn test_write_creates_directory_and_file() {
        let dir = TempDir::new().unwrap();
        let reports = dir.path().join("nested").join("reports");

        assert!(!ReportWriter::exists(&reports, "20170630"));

        let path = ReportWriter::to_file(&reports, "20170630", "<html></html>").unwrap();

        assert!(ReportWriter::exists(&reports, "20170630"));
        assert_eq!(fs::read_to_string(path).unwrap(), "<html></html>");
        assert!(!reports.join("report_20170630.html.tmp").exists());
    }

    #[test]
    fn test_exists_is_per_date() {
        let dir = TempDir::new().unwrap();
        ReportWriter::to_file(dir.path(), "20170630", "x").unwrap();

        assert!(ReportWriter::exists(dir.path(), "20170630"));
        assert!(!ReportWriter::exists(dir.path(), "20170701"));
    }
}
