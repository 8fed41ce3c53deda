//! CSV file report.

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};

use super::{ReportError, ResultRecord, ResultSink};

/// Default report file name, relative to the working directory.
pub const DEFAULT_REPORT_FILE: &str = "wifi_test_results.csv";

/// Column names of every report file.
pub const REPORT_HEADER: [&str; 3] = ["Timestamp", "MAC", "Status"];

/// Appends result rows to a CSV file.
///
/// The header is written when the file is created (or found empty);
/// existing rows are never touched.
#[derive(Debug, Clone)]
pub struct CsvReport {
    path: PathBuf,
}

impl CsvReport {
    /// Creates a report writing to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the report file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append_blocking(path: &Path, records: &[ResultRecord]) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let is_new = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if is_new {
            writer.write_record(REPORT_HEADER)?;
        }
        for record in records {
            writer.write_record([
                record.formatted_timestamp(),
                record.mac.clone(),
                record.status.to_string(),
            ])?;
        }
        writer.flush()
    }
}

impl ResultSink for CsvReport {
    async fn append(&self, records: &[ResultRecord]) -> Result<(), ReportError> {
        if records.is_empty() {
            return Ok(());
        }

        let rows = records.to_vec();
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || {
            Self::append_blocking(&path, &rows).map_err(|source| ReportError::Write {
                path: path.clone(),
                source,
            })
        })
        .await
        .map_err(ReportError::Task)??;

        tracing::info!(
            "Appended {} result(s) to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }
}
