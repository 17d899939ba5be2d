//! Month calendars clipped to an academic session.
//!
//! A month only counts the days that fall inside the session. Sundays are
//! never working days, and a holiday that lands on a Sunday is only counted
//! once (as a Sunday).

use std::collections::BTreeSet;

use chrono::{Datelike, Month, NaiveDate, Weekday};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::CalendarError;

/// Academic year order: April through March.
pub const ACADEMIC_MONTHS: [u32; 12] = [4, 5, 6, 7, 8, 9, 10, 11, 12, 1, 2, 3];

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CalendarError> {
        if start > end {
            return Err(CalendarError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The full natural month, first day through last day.
    pub fn month(year: i32, month: u32) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth(month));
        }

        let start =
            NaiveDate::from_ymd_opt(year, month, 1).ok_or(CalendarError::InvalidYear(year))?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        let end = next
            .and_then(|d| d.pred_opt())
            .ok_or(CalendarError::InvalidYear(year))?;

        Ok(Self { start, end })
    }

    #[must_use]
    pub fn intersect(&self, other: &DateRange) -> Option<DateRange> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start <= end).then_some(DateRange { start, end })
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    #[must_use]
    pub fn len_days(&self) -> u32 {
        u32::try_from((self.end - self.start).num_days() + 1).unwrap_or(0)
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

/// Day counts for one month of an academic session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct MonthCalendar {
    pub year: i32,
    pub month: u32,
    /// The part of the month inside the session, if any
    pub effective: Option<DateRange>,
    pub total_days: u32,
    pub sundays: u32,
    /// Distinct non-Sunday holidays inside the effective range
    pub holidays: u32,
    pub working_days: u32,
}

impl MonthCalendar {
    fn outside_session(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            effective: None,
            total_days: 0,
            sundays: 0,
            holidays: 0,
            working_days: 0,
        }
    }
}

/// The slice of `year`-`month` covered by `session`.
pub fn effective_window(
    year: i32,
    month: u32,
    session: Option<DateRange>,
) -> Result<Option<DateRange>, CalendarError> {
    let natural = DateRange::month(year, month)?;
    Ok(session.and_then(|s| natural.intersect(&s)))
}

/// Resolves the working-day calendar for a month.
///
/// `holidays` may contain dates outside the month, duplicates, or Sundays;
/// only distinct non-Sunday dates inside the effective range are counted.
pub fn resolve_month(
    year: i32,
    month: u32,
    session: Option<DateRange>,
    holidays: &[NaiveDate],
) -> Result<MonthCalendar, CalendarError> {
    let Some(effective) = effective_window(year, month, session)? else {
        return Ok(MonthCalendar::outside_session(year, month));
    };

    let total_days = effective.len_days();
    let sundays = count_sundays(&effective);
    let holidays = holidays
        .iter()
        .filter(|d| effective.contains(**d) && d.weekday() != Weekday::Sun)
        .collect::<BTreeSet<_>>()
        .len();
    let holidays = u32::try_from(holidays).unwrap_or(u32::MAX);

    Ok(MonthCalendar {
        year,
        month,
        effective: Some(effective),
        total_days,
        sundays,
        holidays,
        working_days: total_days.saturating_sub(sundays).saturating_sub(holidays),
    })
}

#[must_use]
pub fn count_sundays(range: &DateRange) -> u32 {
    range
        .days()
        .filter(|d| d.weekday() == Weekday::Sun)
        .fold(0, |n, _| n + 1)
}

/// Calendar year of `month` in an academic year starting in `start_year`.
///
/// January through March belong to the following calendar year.
#[must_use]
pub fn calendar_year_for(month: u32, start_year: i32) -> i32 {
    if month <= 3 { start_year + 1 } else { start_year }
}

/// English month name, or an empty string for an out-of-range month.
#[must_use]
pub fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or("")
}

/// Parses `YYYY-MM`, `MM-YYYY`, `MM/YYYY` or `Month YYYY` into `(year, month)`.
///
/// Month names may be full or three-letter abbreviations, in any case.
pub fn parse_month_year(input: &str) -> Result<(i32, u32), CalendarError> {
    let malformed = || CalendarError::MalformedMonthYear(input.to_string());

    let parts: Vec<&str> = input
        .trim()
        .split(|c: char| c == '-' || c == '/' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();
    let [first, second] = parts.as_slice() else {
        return Err(malformed());
    };

    let is_year = |s: &str| s.len() == 4 && s.chars().all(|c| c.is_ascii_digit());
    let (year_part, month_part) = if is_year(first) {
        (*first, *second)
    } else if is_year(second) {
        (*second, *first)
    } else {
        return Err(malformed());
    };

    let year: i32 = year_part.parse().map_err(|_| malformed())?;
    let month = match month_part.parse::<u32>() {
        Ok(m) => m,
        Err(_) => month_part
            .parse::<Month>()
            .map_err(|_| malformed())?
            .number_from_month(),
    };

    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidMonth(month));
    }

    Ok((year, month))
}
