//! Monthly and yearly attendance aggregates.
//!
//! Composition pulls holidays and attendance records from an
//! [`AttendanceSource`], resolves each month's calendar, tallies statuses and
//! rolls the counts up. The yearly figure is computed from the summed totals,
//! never by averaging monthly percentages.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::hash::Hash;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

use crate::calendar::{
    ACADEMIC_MONTHS, DateRange, calendar_year_for, effective_window, month_name, resolve_month,
};
use crate::error::AggregationError;
use crate::rollup::{ColorTag, Grade, roll_up, round2};
use crate::status::{UnknownStatusPolicy, tally};

/// One stored attendance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkedDay<'a> {
    pub date: NaiveDate,
    pub status: &'a str,
}

/// Read access to holidays and attendance records.
///
/// Implementations return every record whose date falls inside `range`
/// (inclusive), at most one per date.
pub trait AttendanceSource {
    type Student: ?Sized;

    fn holidays_in(&self, range: DateRange) -> Vec<NaiveDate>;

    fn attendance_in(&self, student: &Self::Student, range: DateRange) -> Vec<MarkedDay<'_>>;
}

/// An [`AttendanceSource`] backed by in-memory maps.
///
/// Report services load a session's holidays and records once and compose
/// every month from this ledger.
#[derive(Debug, Clone)]
pub struct InMemoryLedger<K> {
    holidays: BTreeSet<NaiveDate>,
    attendance: HashMap<K, BTreeMap<NaiveDate, String>>,
}

impl<K> Default for InMemoryLedger<K> {
    fn default() -> Self {
        Self {
            holidays: BTreeSet::new(),
            attendance: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash> InMemoryLedger<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_holiday(&mut self, date: NaiveDate) {
        self.holidays.insert(date);
    }

    /// Records a status for a student on a date, replacing any earlier one.
    pub fn mark(&mut self, student: K, date: NaiveDate, status: impl Into<String>) {
        self.attendance
            .entry(student)
            .or_default()
            .insert(date, status.into());
    }
}

impl<K: Eq + Hash> AttendanceSource for InMemoryLedger<K> {
    type Student = K;

    fn holidays_in(&self, range: DateRange) -> Vec<NaiveDate> {
        self.holidays
            .range(range.start..=range.end)
            .copied()
            .collect()
    }

    fn attendance_in(&self, student: &K, range: DateRange) -> Vec<MarkedDay<'_>> {
        self.attendance
            .get(student)
            .map(|days| {
                days.range(range.start..=range.end)
                    .map(|(date, status)| MarkedDay {
                        date: *date,
                        status: status.as_str(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// A student's attendance for one month.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MonthlyAggregate {
    /// Month number (1-12)
    pub month: u32,
    pub month_name: String,
    pub working_days: u32,
    pub present: u32,
    /// Working days not covered by present, late or half day
    pub absent: u32,
    pub late: u32,
    pub half_day: u32,
    pub holidays: u32,
    pub attendance_percentage: f64,
    #[serde(skip)]
    pub unrecognized: u32,
}

impl MonthlyAggregate {
    /// An all-zero month, used for months outside the session.
    #[must_use]
    pub fn empty(month: u32) -> Self {
        Self {
            month,
            month_name: month_name(month).to_string(),
            working_days: 0,
            present: 0,
            absent: 0,
            late: 0,
            half_day: 0,
            holidays: 0,
            attendance_percentage: 0.0,
            unrecognized: 0,
        }
    }
}

/// A student's attendance for a whole academic year, April through March.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct YearlyAggregate {
    pub months: Vec<MonthlyAggregate>,
    pub total_working_days: u32,
    pub total_present: u32,
    pub total_absent: u32,
    pub total_late: u32,
    pub total_half_day: u32,
    pub total_holidays: u32,
    pub attendance_percentage: f64,
    pub grade: Grade,
    pub color: ColorTag,
    #[serde(skip)]
    pub unrecognized_statuses: u32,
}

impl YearlyAggregate {
    /// Sums monthly aggregates and rolls the totals up.
    #[must_use]
    pub fn from_months(months: Vec<MonthlyAggregate>) -> Self {
        let total_working_days = total(&months, |m| m.working_days);
        let total_present = total(&months, |m| m.present);
        let total_late = total(&months, |m| m.late);
        let total_half_day = total(&months, |m| m.half_day);
        let total_holidays = total(&months, |m| m.holidays);
        let unrecognized_statuses = total(&months, |m| m.unrecognized);

        let rollup = roll_up(total_working_days, total_present, total_late, total_half_day);

        Self {
            months,
            total_working_days,
            total_present,
            total_absent: rollup.effective_absent,
            total_late,
            total_half_day,
            total_holidays,
            attendance_percentage: rollup.percentage,
            grade: rollup.grade,
            color: rollup.color,
            unrecognized_statuses,
        }
    }
}

fn total(months: &[MonthlyAggregate], field: impl Fn(&MonthlyAggregate) -> u32) -> u32 {
    months.iter().map(field).sum()
}

/// Composes one month of attendance for `student`.
pub fn compose_month<S>(
    source: &S,
    student: &S::Student,
    year: i32,
    month: u32,
    session: Option<DateRange>,
    policy: UnknownStatusPolicy,
) -> Result<MonthlyAggregate, AggregationError>
where
    S: AttendanceSource + ?Sized,
{
    let Some(window) = effective_window(year, month, session)? else {
        return Ok(MonthlyAggregate::empty(month));
    };

    let holidays = source.holidays_in(window);
    let calendar = resolve_month(year, month, session, &holidays)?;

    let records = source.attendance_in(student, window);
    let counts = tally(records.iter().map(|r| r.status), policy)?;
    let rollup = roll_up(
        calendar.working_days,
        counts.present,
        counts.late,
        counts.half_day,
    );

    Ok(MonthlyAggregate {
        month,
        month_name: month_name(month).to_string(),
        working_days: calendar.working_days,
        present: counts.present,
        absent: rollup.effective_absent,
        late: counts.late,
        half_day: counts.half_day,
        holidays: calendar.holidays,
        attendance_percentage: rollup.percentage,
        unrecognized: counts.unrecognized,
    })
}

/// Composes the twelve academic months for `student`.
///
/// Months are ordered April through March; January to March fall in the
/// calendar year after the session starts. Without a session every month is
/// empty and the grade is `N/A`.
pub fn compose_year<S>(
    source: &S,
    student: &S::Student,
    session: Option<DateRange>,
    policy: UnknownStatusPolicy,
) -> Result<YearlyAggregate, AggregationError>
where
    S: AttendanceSource + ?Sized,
{
    let start_year = session.map(|s| s.start.year());

    let months = ACADEMIC_MONTHS
        .iter()
        .map(|&month| match start_year {
            Some(year) => compose_month(
                source,
                student,
                calendar_year_for(month, year),
                month,
                session,
                policy,
            ),
            None => Ok(MonthlyAggregate::empty(month)),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(YearlyAggregate::from_months(months))
}

/// Class-wide figures for one month.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MonthlyStatistic {
    pub month: u32,
    pub month_name: String,
    pub working_days: u32,
    pub students: u32,
    /// Sum of effective present days across students
    pub total_present: u32,
    pub total_absent: u32,
    pub class_percentage: f64,
}

/// Aggregates per-student years into per-month class statistics.
///
/// Working days depend only on the session and its holidays, so every
/// student passed in must have been composed against the same session and
/// ledger. Mixing sessions trips a debug assertion.
#[must_use]
pub fn summarize_months(students: &[YearlyAggregate]) -> Vec<MonthlyStatistic> {
    let count = u32::try_from(students.len()).unwrap_or(u32::MAX);

    ACADEMIC_MONTHS
        .iter()
        .enumerate()
        .map(|(index, &month)| {
            let months: Vec<&MonthlyAggregate> =
                students.iter().filter_map(|s| s.months.get(index)).collect();

            let working_days = months.iter().map(|m| m.working_days).max().unwrap_or(0);
            debug_assert!(
                months.iter().all(|m| m.working_days == working_days),
                "students of one report must share a session calendar"
            );
            let (total_present, total_absent) = months.iter().fold((0u32, 0u32), |(p, a), m| {
                (p + m.present + m.late + m.half_day, a + m.absent)
            });

            let possible = u64::from(working_days) * u64::from(count);
            let class_percentage = if possible == 0 {
                0.0
            } else {
                round2(f64::from(total_present) / possible as f64 * 100.0).min(100.0)
            };

            MonthlyStatistic {
                month,
                month_name: month_name(month).to_string(),
                working_days,
                students: count,
                total_present,
                total_absent,
                class_percentage,
            }
        })
        .collect()
}
