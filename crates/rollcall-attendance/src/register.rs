//! The day-by-day monthly register for one student.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use utoipa::ToSchema;

use crate::calendar::{DateRange, effective_window};
use crate::compositor::{AttendanceSource, MonthlyAggregate, compose_month};
use crate::error::{AggregationError, StatusError};
use crate::status::{AttendanceStatus, UnknownStatusPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DayKind {
    Working,
    Sunday,
    Holiday,
    OutsideSession,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RegisterDay {
    pub date: NaiveDate,
    /// Day of the month
    pub day: u32,
    pub kind: DayKind,
    pub status: Option<AttendanceStatus>,
    /// Register abbreviation of `status`, e.g. `P` or `HD`
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RegisterRow {
    pub days: Vec<RegisterDay>,
    pub summary: MonthlyAggregate,
}

/// Builds one register row covering every day of the natural month.
///
/// Days outside the session are still listed so the row lines up with the
/// month's column headers.
pub fn build_register_row<S>(
    source: &S,
    student: &S::Student,
    year: i32,
    month: u32,
    session: Option<DateRange>,
    policy: UnknownStatusPolicy,
) -> Result<RegisterRow, AggregationError>
where
    S: AttendanceSource + ?Sized,
{
    let natural = DateRange::month(year, month)?;
    let window = effective_window(year, month, session)?;

    let holidays: BTreeSet<NaiveDate> = window
        .map(|w| source.holidays_in(w).into_iter().collect())
        .unwrap_or_default();
    let marks: BTreeMap<NaiveDate, &str> = window
        .map(|w| {
            source
                .attendance_in(student, w)
                .into_iter()
                .map(|m| (m.date, m.status))
                .collect()
        })
        .unwrap_or_default();

    let mut days = Vec::with_capacity(natural.len_days() as usize);
    for date in natural.days() {
        let kind = if !window.is_some_and(|w| w.contains(date)) {
            DayKind::OutsideSession
        } else if date.weekday() == Weekday::Sun {
            DayKind::Sunday
        } else if holidays.contains(&date) {
            DayKind::Holiday
        } else {
            DayKind::Working
        };

        let status = match marks.get(&date) {
            Some(raw) => match (AttendanceStatus::parse_code(raw), policy) {
                (Some(status), _) => Some(status),
                (None, UnknownStatusPolicy::Ignore) => None,
                (None, UnknownStatusPolicy::Reject) => {
                    return Err(StatusError::Unknown(raw.to_string()).into());
                }
            },
            None => None,
        };

        days.push(RegisterDay {
            date,
            day: date.day(),
            kind,
            status,
            code: status.map(|s| s.short_code().to_string()),
        });
    }

    let summary = compose_month(source, student, year, month, session, policy)?;

    Ok(RegisterRow { days, summary })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::InMemoryLedger;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_register_row_classifies_days() {
        let session = DateRange::new(date(2024, 4, 3), date(2025, 3, 31)).unwrap();
        let mut ledger = InMemoryLedger::new();
        ledger.add_holiday(date(2024, 4, 10));
        ledger.mark("s1", date(2024, 4, 4), "P");
        ledger.mark("s1", date(2024, 4, 5), "hd");

        let row = build_register_row(
            &ledger,
            &"s1",
            2024,
            4,
            Some(session),
            UnknownStatusPolicy::Ignore,
        )
        .unwrap();

        assert_eq!(row.days.len(), 30);
        assert_eq!(row.days[0].kind, DayKind::OutsideSession);
        assert_eq!(row.days[3].status, Some(AttendanceStatus::Present));
        assert_eq!(row.days[3].code.as_deref(), Some("P"));
        assert_eq!(row.days[4].code.as_deref(), Some("HD"));
        assert_eq!(row.days[6].kind, DayKind::Sunday);
        assert_eq!(row.days[9].kind, DayKind::Holiday);
        assert_eq!(row.days[10].kind, DayKind::Working);
        assert_eq!(row.days[10].status, None);

        assert_eq!(row.summary.present, 1);
        assert_eq!(row.summary.half_day, 1);
        // 28 days in session, 4 Sundays, 1 holiday
        assert_eq!(row.summary.working_days, 23);
    }

    #[test]
    fn test_register_row_unknown_status() {
        let session = DateRange::new(date(2024, 4, 1), date(2025, 3, 31)).unwrap();
        let mut ledger = InMemoryLedger::new();
        ledger.mark(1, date(2024, 4, 2), "sick");

        let row =
            build_register_row(&ledger, &1, 2024, 4, Some(session), UnknownStatusPolicy::Ignore)
                .unwrap();
        assert_eq!(row.days[1].status, None);

        let err =
            build_register_row(&ledger, &1, 2024, 4, Some(session), UnknownStatusPolicy::Reject)
                .unwrap_err();
        assert!(matches!(err, AggregationError::Status(_)));
    }

    #[test]
    fn test_register_row_invalid_month() {
        let ledger: InMemoryLedger<u32> = InMemoryLedger::new();
        let err = build_register_row(&ledger, &1, 2024, 13, None, UnknownStatusPolicy::Ignore)
            .unwrap_err();
        assert!(matches!(err, AggregationError::Calendar(_)));
    }
}
