//! Result records handed to report sinks.

use chrono::{DateTime, Local};

use crate::engine::TestOutcome;

/// Format of the timestamp column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One finished adapter test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    /// Local time the test finished.
    pub timestamp: DateTime<Local>,
    /// Hardware address, or `Unknown`.
    pub mac: String,
    /// `Pass` or `Fail`.
    pub status: TestOutcome,
}

impl ResultRecord {
    /// Creates a record.
    #[must_use]
    pub fn new(timestamp: DateTime<Local>, mac: impl Into<String>, status: TestOutcome) -> Self {
        Self {
            timestamp,
            mac: mac.into(),
            status,
        }
    }

    /// Returns the timestamp as `YYYY-MM-DD HH:MM:SS`.
    #[must_use]
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamp_is_second_precision_local_time() {
        let record = ResultRecord::new(
            Local.with_ymd_and_hms(2025, 1, 9, 7, 5, 3).unwrap(),
            "02:00:00:ab:cd:ef",
            TestOutcome::Pass,
        );

        assert_eq!(record.formatted_timestamp(), "2025-01-09 07:05:03");
    }
}
