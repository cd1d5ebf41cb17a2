//! Dashboard error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type for dashboard operations.
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Errors raised by the dashboard core and its exporters.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The requested range starts after it ends.
    #[error("start date {start} is after end date {end}")]
    InvalidDateRange {
        /// Requested first day
        start: NaiveDate,
        /// Requested last day
        end: NaiveDate,
    },

    /// The requested range covers more days than a dashboard allows.
    #[error("date range {start} to {end} spans more than {max_days} days")]
    RangeTooLong {
        /// Requested first day
        start: NaiveDate,
        /// Requested last day
        end: NaiveDate,
        /// Longest allowed span
        max_days: u32,
    },

    /// A platform name that is not one of the supported platforms.
    #[error("unknown platform '{0}' (expected instagram, tiktok, facebook or all)")]
    UnknownPlatform(String),

    /// Failed to read or write CSV data.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Underlying IO failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
