//! # Rollcall Attendance
//!
//! Attendance aggregation for the Rollcall API. Everything in this crate is
//! pure computation over data the caller has already loaded; no module here
//! performs I/O.
//!
//! - [`calendar`]: month windows clipped to an academic session, Sunday and
//!   holiday counting, working days, month-year parsing
//! - [`status`]: attendance status codes and per-status tallies
//! - [`rollup`]: effective present/absent, percentage, grade and color
//! - [`compositor`]: monthly and yearly aggregates for a student, and
//!   class-wide monthly statistics
//! - [`entry`]: checks applied before attendance may be saved for a date
//! - [`register`]: the day-by-day monthly register
//!
//! # Data flow
//!
//! ```text
//! session dates ─► calendar::resolve_month ─► status::tally ─► rollup::roll_up
//!                         (per month)           (per student)      (per month)
//!                                                                      │
//!                                        compositor::compose_year ◄────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use rollcall_attendance::{compose_year, DateRange, InMemoryLedger, UnknownStatusPolicy};
//!
//! let session = DateRange::new(start, end)?;
//! let mut ledger = InMemoryLedger::new();
//! ledger.add_holiday(independence_day);
//! ledger.mark(student_id, date, "P");
//!
//! let year = compose_year(&ledger, &student_id, Some(session), UnknownStatusPolicy::Ignore)?;
//! println!("{} ({})", year.attendance_percentage, year.grade);
//! ```

pub mod calendar;
pub mod compositor;
pub mod entry;
pub mod error;
pub mod register;
pub mod rollup;
pub mod status;

pub use calendar::{
    ACADEMIC_MONTHS, DateRange, MonthCalendar, calendar_year_for, count_sundays,
    effective_window, month_name, parse_month_year, resolve_month,
};
pub use compositor::{
    AttendanceSource, InMemoryLedger, MarkedDay, MonthlyAggregate, MonthlyStatistic,
    YearlyAggregate, compose_month, compose_year, summarize_months,
};
pub use entry::{EntryRejection, check_markable};
pub use error::{AggregationError, CalendarError, StatusError};
pub use register::{DayKind, RegisterDay, RegisterRow, build_register_row};
pub use rollup::{ColorTag, Grade, Rollup, roll_up, round2};
pub use status::{AttendanceStatus, StatusTally, UnknownStatusPolicy, tally};
