use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::instrument;

use rollcall_core::AppError;
use rollcall_models::academic_sessions::AcademicSession;
use rollcall_models::ids::{AcademicSessionId, HolidayId, SchoolId};

use crate::modules::holidays::model::{CreateHolidayDto, Holiday};

const HOLIDAY_COLUMNS: &str =
    "id, school_id, academic_session_id, holiday_date, name, is_active, created_at";

pub struct HolidayService;

impl HolidayService {
    /// Declare a holiday within `session`.
    ///
    /// The date must fall inside the session and must not already carry an
    /// active holiday.
    #[instrument(skip(db, session), fields(session.id = %session.id))]
    pub async fn create_holiday(
        db: &PgPool,
        school_id: SchoolId,
        session: &AcademicSession,
        dto: CreateHolidayDto,
    ) -> Result<Holiday, AppError> {
        if dto.holiday_date < session.start_date || dto.holiday_date > session.end_date {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Holiday date {} is outside the academic session ({} to {})",
                dto.holiday_date,
                session.start_date,
                session.end_date
            )));
        }

        let holiday = sqlx::query_as::<_, Holiday>(&format!(
            r#"INSERT INTO holidays (school_id, academic_session_id, holiday_date, name)
               VALUES ($1, $2, $3, $4)
               RETURNING {HOLIDAY_COLUMNS}"#
        ))
        .bind(school_id)
        .bind(session.id)
        .bind(dto.holiday_date)
        .bind(dto.name.trim())
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::bad_request(anyhow::anyhow!(
                        "A holiday is already declared on {}",
                        dto.holiday_date
                    ));
                }
            }
            AppError::from(e)
        })?;

        crate::audit_event!(
            "create",
            "holiday",
            holiday.id = %holiday.id,
            holiday.date = %holiday.holiday_date
        );

        Ok(holiday)
    }

    /// Active holidays of a session in date order.
    #[instrument(skip(db))]
    pub async fn get_holidays_by_session(
        db: &PgPool,
        school_id: SchoolId,
        session_id: AcademicSessionId,
    ) -> Result<Vec<Holiday>, AppError> {
        let holidays = sqlx::query_as::<_, Holiday>(&format!(
            r#"SELECT {HOLIDAY_COLUMNS}
               FROM holidays
               WHERE school_id = $1 AND academic_session_id = $2 AND is_active
               ORDER BY holiday_date"#
        ))
        .bind(school_id)
        .bind(session_id)
        .fetch_all(db)
        .await?;

        Ok(holidays)
    }

    /// Active holidays of a session between `start` and `end` inclusive.
    #[instrument(skip(db))]
    pub async fn get_holidays_between(
        db: &PgPool,
        school_id: SchoolId,
        session_id: AcademicSessionId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Holiday>, AppError> {
        let holidays = sqlx::query_as::<_, Holiday>(&format!(
            r#"SELECT {HOLIDAY_COLUMNS}
               FROM holidays
               WHERE school_id = $1 AND academic_session_id = $2 AND is_active
                 AND holiday_date BETWEEN $3 AND $4
               ORDER BY holiday_date"#
        ))
        .bind(school_id)
        .bind(session_id)
        .bind(start)
        .bind(end)
        .fetch_all(db)
        .await?;

        Ok(holidays)
    }

    /// The active holiday on `date`, if one is declared.
    #[instrument(skip(db))]
    pub async fn find_holiday_on(
        db: &PgPool,
        school_id: SchoolId,
        session_id: AcademicSessionId,
        date: NaiveDate,
    ) -> Result<Option<Holiday>, AppError> {
        let holidays = Self::get_holidays_between(db, school_id, session_id, date, date).await?;
        Ok(holidays.into_iter().next())
    }

    /// Deactivate a holiday. The row is kept.
    #[instrument(skip(db))]
    pub async fn delete_holiday(
        db: &PgPool,
        id: HolidayId,
        school_id: SchoolId,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"UPDATE holidays SET is_active = FALSE
               WHERE id = $1 AND school_id = $2 AND is_active"#,
        )
        .bind(id)
        .bind(school_id)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Holiday not found")));
        }

        crate::audit_event!("delete", "holiday", holiday.id = %id);

        Ok(())
    }
}
