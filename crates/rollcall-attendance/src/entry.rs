//! Checks applied before attendance may be saved for a date.

use chrono::{Datelike, NaiveDate, Weekday};
use thiserror::Error;

use crate::calendar::DateRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EntryRejection {
    #[error("Attendance cannot be marked for a future date ({0})")]
    FutureDate(NaiveDate),

    #[error("Attendance cannot be marked on a Sunday ({0})")]
    Sunday(NaiveDate),

    #[error("Attendance cannot be marked on a holiday ({0})")]
    Holiday(NaiveDate),

    #[error("{0} is outside the academic session")]
    OutsideSession(NaiveDate),
}

impl EntryRejection {
    /// Short label used for metrics.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::FutureDate(_) => "future_date",
            Self::Sunday(_) => "sunday",
            Self::Holiday(_) => "holiday",
            Self::OutsideSession(_) => "outside_session",
        }
    }
}

/// Whether attendance may be recorded for `date`.
///
/// Checks run in order: future date, Sunday, holiday, session bounds.
pub fn check_markable(
    date: NaiveDate,
    today: NaiveDate,
    session: Option<DateRange>,
    is_holiday: bool,
) -> Result<(), EntryRejection> {
    if date > today {
        return Err(EntryRejection::FutureDate(date));
    }
    if date.weekday() == Weekday::Sun {
        return Err(EntryRejection::Sunday(date));
    }
    if is_holiday {
        return Err(EntryRejection::Holiday(date));
    }
    if !session.is_some_and(|s| s.contains(date)) {
        return Err(EntryRejection::OutsideSession(date));
    }
    Ok(())
}
