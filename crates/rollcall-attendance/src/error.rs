//! Error types for attendance aggregation.

use chrono::NaiveDate;
use thiserror::Error;

/// Invalid calendar input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("Invalid month {0}: expected a value between 1 and 12")]
    InvalidMonth(u32),

    #[error("Year {0} is outside the supported calendar range")]
    InvalidYear(i32),

    #[error("Invalid date range: {start} is after {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },

    #[error("Malformed month-year '{0}': expected YYYY-MM, MM-YYYY or 'Month YYYY'")]
    MalformedMonthYear(String),
}

/// A stored status string that could not be mapped under the reject policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatusError {
    #[error("Unrecognized attendance status '{0}'")]
    Unknown(String),
}

/// Any failure while composing monthly or yearly aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregationError {
    #[error(transparent)]
    Calendar(#[from] CalendarError),

    #[error(transparent)]
    Status(#[from] StatusError),
}
