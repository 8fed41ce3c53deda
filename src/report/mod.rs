//! Result reporting.
//!
//! This module provides:
//! - The record type produced by the engine ([`ResultRecord`])
//! - The sink abstraction the engine's records are handed to ([`ResultSink`])
//! - A CSV file sink ([`CsvReport`])

mod csv_file;
mod record;

pub use csv_file::{CsvReport, DEFAULT_REPORT_FILE, REPORT_HEADER};
pub use record::{ResultRecord, TIMESTAMP_FORMAT};

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Failed to create or append to the report file.
    #[error("Failed to write report '{}': {source}", path.display())]
    Write {
        /// Report file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The background write task did not complete.
    #[error("Report write task failed: {0}")]
    Task(#[source] tokio::task::JoinError),
}

/// Destination for result records.
///
/// Appending never rewrites or reorders rows already stored.
pub trait ResultSink: Send + Sync {
    /// Appends `records` in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the records cannot be stored.
    fn append(
        &self,
        records: &[ResultRecord],
    ) -> impl std::future::Future<Output = Result<(), ReportError>> + Send;
}
