use std::collections::BTreeMap;

use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::instrument;

use rollcall_attendance::{AttendanceStatus, EntryRejection, check_markable};
use rollcall_core::AppError;
use rollcall_models::academic_sessions::AcademicSession;
use rollcall_models::ids::{AttendanceRecordId, SchoolId, StudentId, UserId};

use crate::metrics::{track_attendance_saved, track_entry_rejected};
use crate::modules::attendance::model::{
    DailyAttendanceParams, DailyAttendanceResponse, DailyAttendanceRow, DateCheckResponse,
    SaveAttendanceDto, SaveAttendanceResponse,
};
use crate::modules::holidays::model::Holiday;
use crate::modules::holidays::service::HolidayService;
use crate::modules::students::service::StudentService;

pub struct AttendanceService;

impl AttendanceService {
    /// Runs the entry checks for `date`, returning the holiday found on it.
    async fn evaluate_date(
        db: &PgPool,
        school_id: SchoolId,
        session: Option<&AcademicSession>,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<(Result<(), EntryRejection>, Option<Holiday>), AppError> {
        let holiday = match session {
            Some(s) => HolidayService::find_holiday_on(db, school_id, s.id, date).await?,
            None => None,
        };
        let range = session
            .map(AcademicSession::date_range)
            .transpose()
            .map_err(AppError::internal)?;

        Ok((check_markable(date, today, range, holiday.is_some()), holiday))
    }

    /// Whether attendance may be recorded for `date` under `session`.
    ///
    /// Without a session every date is rejected as outside the session.
    #[instrument(skip(db, session))]
    pub async fn check_date(
        db: &PgPool,
        school_id: SchoolId,
        session: Option<&AcademicSession>,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<DateCheckResponse, AppError> {
        let (verdict, holiday) = Self::evaluate_date(db, school_id, session, date, today).await?;

        let response = match verdict {
            Ok(()) => DateCheckResponse {
                date,
                markable: true,
                reason: None,
                message: None,
                holiday_name: None,
            },
            Err(rejection) => DateCheckResponse {
                date,
                markable: false,
                reason: Some(rejection.reason().to_string()),
                message: Some(rejection.to_string()),
                holiday_name: match rejection {
                    EntryRejection::Holiday(_) => holiday.map(|h| h.name),
                    _ => None,
                },
            },
        };

        Ok(response)
    }

    /// Insert or update one record per entry for `dto.date`.
    ///
    /// Later entries for the same student replace earlier ones. Soft-deleted
    /// records are revived. Nothing is written unless every student belongs
    /// to the school.
    #[instrument(skip(db, session, dto), fields(date = %dto.date, entries = dto.entries.len()))]
    pub async fn save_attendance(
        db: &PgPool,
        school_id: SchoolId,
        session: &AcademicSession,
        marked_by: Option<UserId>,
        dto: SaveAttendanceDto,
        today: NaiveDate,
    ) -> Result<SaveAttendanceResponse, AppError> {
        let (verdict, _) =
            Self::evaluate_date(db, school_id, Some(session), dto.date, today).await?;
        if let Err(rejection) = verdict {
            track_entry_rejected(rejection.reason());
            return Err(AppError::bad_request(rejection));
        }

        let entries: BTreeMap<StudentId, AttendanceStatus> = dto
            .entries
            .into_iter()
            .map(|entry| (entry.student_id, entry.status))
            .collect();
        let student_ids: Vec<StudentId> = entries.keys().copied().collect();
        let statuses: Vec<&'static str> = entries.values().map(AttendanceStatus::as_str).collect();

        let unknown = StudentService::find_unknown_students(db, school_id, &student_ids).await?;
        if !unknown.is_empty() {
            let ids = unknown
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Unknown students: {ids}"
            )));
        }

        let mut tx = db.begin().await?;

        let result = sqlx::query(
            r#"INSERT INTO attendance_records
                   (school_id, academic_session_id, student_id, attendance_date, status, marked_by)
               SELECT $1, $2, entry.student_id, $3, entry.status, $4
               FROM UNNEST($5::UUID[], $6::TEXT[]) AS entry(student_id, status)
               ON CONFLICT (student_id, attendance_date) DO UPDATE
               SET status = EXCLUDED.status,
                   academic_session_id = EXCLUDED.academic_session_id,
                   marked_by = EXCLUDED.marked_by,
                   is_deleted = FALSE,
                   updated_at = NOW()"#,
        )
        .bind(school_id)
        .bind(session.id)
        .bind(dto.date)
        .bind(marked_by)
        .bind(&student_ids)
        .bind(&statuses)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let saved = result.rows_affected();
        track_attendance_saved(saved);
        crate::audit_event!(
            "save",
            "attendance",
            attendance.date = %dto.date,
            attendance.records = saved,
            session.id = %session.id
        );

        Ok(SaveAttendanceResponse {
            date: dto.date,
            session_id: session.id,
            saved,
        })
    }

    /// Every active student of the class with their status on `date`.
    #[instrument(skip(db))]
    pub async fn get_daily_attendance(
        db: &PgPool,
        school_id: SchoolId,
        params: DailyAttendanceParams,
    ) -> Result<DailyAttendanceResponse, AppError> {
        let entries = sqlx::query_as::<_, DailyAttendanceRow>(
            r#"SELECT
                s.id AS student_id,
                s.admission_no,
                s.roll_number,
                s.first_name,
                s.last_name,
                s.class_name,
                s.section,
                a.id AS record_id,
                a.status
               FROM students s
               LEFT JOIN attendance_records a
                 ON a.student_id = s.id AND a.attendance_date = $2 AND NOT a.is_deleted
               WHERE s.school_id = $1
                 AND s.is_active
                 AND ($3::TEXT IS NULL OR s.class_name = $3)
                 AND ($4::TEXT IS NULL OR s.section = $4)
               ORDER BY s.class_name, s.section NULLS FIRST, s.roll_number NULLS LAST, s.first_name, s.last_name"#,
        )
        .bind(school_id)
        .bind(params.date)
        .bind(&params.class_name)
        .bind(&params.section)
        .fetch_all(db)
        .await?;

        Ok(DailyAttendanceResponse {
            date: params.date,
            entries,
        })
    }

    /// Soft-delete a record.
    #[instrument(skip(db))]
    pub async fn delete_attendance(
        db: &PgPool,
        id: AttendanceRecordId,
        school_id: SchoolId,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"UPDATE attendance_records
               SET is_deleted = TRUE, updated_at = NOW()
               WHERE id = $1 AND school_id = $2 AND NOT is_deleted"#,
        )
        .bind(id)
        .bind(school_id)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Attendance record not found"
            )));
        }

        crate::audit_event!("delete", "attendance", attendance.id = %id);

        Ok(())
    }
}
