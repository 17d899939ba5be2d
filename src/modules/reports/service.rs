use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::{Span, instrument, warn};

use rollcall_attendance::{
    AggregationError, DateRange, InMemoryLedger, UnknownStatusPolicy,
    YearlyAggregate, build_register_row, compose_year, effective_window, month_name,
    parse_month_year, resolve_month, summarize_months,
};
use rollcall_core::AppError;
use rollcall_models::academic_sessions::AcademicSession;
use rollcall_models::ids::{SchoolId, StudentId};

use crate::metrics::{track_report_generated, track_unknown_statuses};
use crate::modules::holidays::model::Holiday;
use crate::modules::holidays::service::HolidayService;
use crate::modules::reports::model::{
    HolidayEntry, MonthlyRegisterReport, MonthlyReportParams, StudentRegister,
    StudentReportParams, StudentYearlyReport, YearlyAttendanceReport, YearlyReportParams,
};
use crate::modules::students::model::Student;
use crate::modules::students::service::StudentService;
use crate::utils::auth_helpers::resolve_session;
use crate::utils::tracing::{record_error, record_success};

/// Calendar problems are the caller's input (400); statuses that cannot be
/// mapped under the reject policy are stored data the report refuses (422).
pub fn aggregation_error(err: AggregationError) -> AppError {
    match err {
        AggregationError::Calendar(e) => AppError::bad_request(e),
        AggregationError::Status(e) => AppError::unprocessable(e),
    }
}

/// Runs a pure composition inside `span`, recording its outcome.
fn compose_in<T>(
    span: &Span,
    compose: impl FnOnce() -> Result<T, AggregationError>,
) -> Result<T, AppError> {
    match span.in_scope(compose) {
        Ok(value) => {
            record_success(span);
            Ok(value)
        }
        Err(e) => {
            record_error(span, &e.to_string());
            Err(aggregation_error(e))
        }
    }
}

fn session_range(session: Option<&AcademicSession>) -> Result<Option<DateRange>, AppError> {
    session
        .map(AcademicSession::date_range)
        .transpose()
        .map_err(AppError::internal)
}

fn warn_missing_session(school_id: SchoolId, report: &'static str) {
    warn!(
        school.id = %school_id,
        report,
        "No academic session resolved; reporting zero attendance"
    );
}

pub struct ReportService;

impl ReportService {
    /// Active holidays and non-deleted records of `students` between the
    /// range bounds, loaded into a ledger.
    #[instrument(skip(db, session, students), fields(session.id = %session.id, students = students.len()))]
    async fn load_ledger(
        db: &PgPool,
        school_id: SchoolId,
        session: &AcademicSession,
        students: &[StudentId],
        range: DateRange,
    ) -> Result<(InMemoryLedger<StudentId>, Vec<Holiday>), AppError> {
        let holidays =
            HolidayService::get_holidays_between(db, school_id, session.id, range.start, range.end)
                .await?;

        let records = sqlx::query_as::<_, (StudentId, NaiveDate, String)>(
            r#"SELECT student_id, attendance_date, status
               FROM attendance_records
               WHERE school_id = $1
                 AND academic_session_id = $2
                 AND NOT is_deleted
                 AND student_id = ANY($3)
                 AND attendance_date BETWEEN $4 AND $5"#,
        )
        .bind(school_id)
        .bind(session.id)
        .bind(students)
        .bind(range.start)
        .bind(range.end)
        .fetch_all(db)
        .await?;

        let mut ledger = InMemoryLedger::new();
        for holiday in &holidays {
            ledger.add_holiday(holiday.holiday_date);
        }
        for (student_id, date, status) in records {
            ledger.mark(student_id, date, status);
        }

        Ok((ledger, holidays))
    }

    /// Yearly report for every active student of a class.
    #[instrument(skip(db))]
    pub async fn yearly_report(
        db: &PgPool,
        school_id: SchoolId,
        params: YearlyReportParams,
        policy: UnknownStatusPolicy,
    ) -> Result<YearlyAttendanceReport, AppError> {
        let session = resolve_session(db, school_id, params.session_id).await?;
        let range = session_range(session.as_ref())?;

        let students = StudentService::get_class_roster(
            db,
            school_id,
            params.class_name.as_deref(),
            params.section.as_deref(),
        )
        .await?;
        let ids: Vec<StudentId> = students.iter().map(|s| s.id).collect();

        let ledger = match (&session, range) {
            (Some(session), Some(range)) => {
                Self::load_ledger(db, school_id, session, &ids, range).await?.0
            }
            _ => {
                warn_missing_session(school_id, "yearly");
                InMemoryLedger::new()
            }
        };

        let span = crate::business_span!("report.yearly", students = students.len());
        let years = compose_in(&span, || {
            ids.iter()
                .map(|id| compose_year(&ledger, id, range, policy))
                .collect::<Result<Vec<YearlyAggregate>, _>>()
        })?;

        track_unknown_statuses(years.iter().map(|y| y.unrecognized_statuses).sum());
        track_report_generated("yearly");

        let monthly_statistics = summarize_months(&years);
        let students = students
            .iter()
            .zip(years)
            .zip(1u32..)
            .map(|((student, year), serial_no)| StudentYearlyReport::new(serial_no, student, year))
            .collect();

        Ok(YearlyAttendanceReport {
            students,
            monthly_statistics,
            session_name: session.as_ref().map(|s| s.name.clone()).unwrap_or_default(),
            session_year: session
                .as_ref()
                .map(AcademicSession::session_year)
                .unwrap_or_default(),
        })
    }

    /// Yearly summary for a single student.
    #[instrument(skip(db))]
    pub async fn student_yearly_report(
        db: &PgPool,
        school_id: SchoolId,
        student_id: StudentId,
        params: StudentReportParams,
        policy: UnknownStatusPolicy,
    ) -> Result<StudentYearlyReport, AppError> {
        let student = StudentService::get_student_by_id(db, student_id, school_id).await?;
        let session = resolve_session(db, school_id, params.session_id).await?;
        let range = session_range(session.as_ref())?;

        let ledger = match (&session, range) {
            (Some(session), Some(range)) => {
                Self::load_ledger(db, school_id, session, &[student.id], range)
                    .await?
                    .0
            }
            _ => {
                warn_missing_session(school_id, "student_yearly");
                InMemoryLedger::new()
            }
        };

        let span = crate::business_span!("report.student_yearly", student.id = %student.id);
        let year = compose_in(&span, || compose_year(&ledger, &student.id, range, policy))?;

        track_unknown_statuses(year.unrecognized_statuses);
        track_report_generated("student_yearly");

        Ok(StudentYearlyReport::new(1, &student, year))
    }

    /// Day-by-day register for one month.
    #[instrument(skip(db))]
    pub async fn monthly_register(
        db: &PgPool,
        school_id: SchoolId,
        params: MonthlyReportParams,
        policy: UnknownStatusPolicy,
    ) -> Result<MonthlyRegisterReport, AppError> {
        let (year, month) = parse_month_year(&params.month).map_err(AppError::bad_request)?;

        let session = resolve_session(db, school_id, params.session_id).await?;
        let range = session_range(session.as_ref())?;
        let window = effective_window(year, month, range).map_err(AppError::bad_request)?;

        let students: Vec<Student> = StudentService::get_class_roster(
            db,
            school_id,
            params.class_name.as_deref(),
            params.section.as_deref(),
        )
        .await?;
        let ids: Vec<StudentId> = students.iter().map(|s| s.id).collect();

        let (ledger, holidays) = match (&session, window) {
            (Some(session), Some(window)) => {
                Self::load_ledger(db, school_id, session, &ids, window).await?
            }
            (None, _) => {
                warn_missing_session(school_id, "monthly");
                (InMemoryLedger::new(), Vec::new())
            }
            (Some(_), None) => (InMemoryLedger::new(), Vec::new()),
        };

        let holiday_dates: Vec<NaiveDate> = holidays.iter().map(|h| h.holiday_date).collect();
        let calendar =
            resolve_month(year, month, range, &holiday_dates).map_err(AppError::bad_request)?;

        let span = crate::business_span!("report.monthly", year, month);
        let rows = compose_in(&span, || {
            ids.iter()
                .map(|id| build_register_row(&ledger, id, year, month, range, policy))
                .collect::<Result<Vec<_>, _>>()
        })?;

        track_unknown_statuses(rows.iter().map(|r| r.summary.unrecognized).sum());
        track_report_generated("monthly");

        let students = students
            .iter()
            .zip(rows)
            .zip(1u32..)
            .map(|((student, row), serial_no)| StudentRegister {
                serial_no,
                student_id: student.id,
                admission_no: student.admission_no.clone(),
                roll_number: student.roll_number,
                name: student.full_name(),
                days: row.days,
                summary: row.summary,
            })
            .collect();

        Ok(MonthlyRegisterReport {
            year,
            month,
            month_name: month_name(month).to_string(),
            session_name: session.as_ref().map(|s| s.name.clone()).unwrap_or_default(),
            working_days: calendar.working_days,
            holidays: holidays
                .into_iter()
                .map(|h| HolidayEntry {
                    date: h.holiday_date,
                    name: h.name,
                })
                .collect(),
            students,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use rollcall_attendance::{CalendarError, StatusError};

    #[test]
    fn test_aggregation_error_status() {
        let calendar = aggregation_error(CalendarError::InvalidMonth(13).into());
        assert_eq!(calendar.status, StatusCode::BAD_REQUEST);

        let status = aggregation_error(StatusError::Unknown("sick".to_string()).into());
        assert_eq!(status.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(status.error.to_string().contains("sick"));
    }
}
