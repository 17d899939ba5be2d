use sqlx::PgPool;
use tracing::instrument;

use rollcall_core::{AppError, PaginationMeta};
use rollcall_models::ids::{AcademicSessionId, SchoolId};

use crate::modules::academic_sessions::model::{
    AcademicSession, AcademicSessionFilterParams, CreateAcademicSessionDto,
    PaginatedAcademicSessionsResponse,
};

const SESSION_COLUMNS: &str =
    "id, school_id, name, description, start_date, end_date, is_active, created_at, updated_at";

pub struct AcademicSessionService;

impl AcademicSessionService {
    /// Create a new academic session.
    ///
    /// Validates that:
    /// - start_date < end_date
    /// - Session name is unique within the school
    #[instrument(skip(db))]
    pub async fn create_academic_session(
        db: &PgPool,
        school_id: SchoolId,
        dto: CreateAcademicSessionDto,
    ) -> Result<AcademicSession, AppError> {
        if dto.start_date >= dto.end_date {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Start date must be before end date"
            )));
        }

        let session = sqlx::query_as::<_, AcademicSession>(&format!(
            r#"INSERT INTO academic_sessions (school_id, name, description, start_date, end_date)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING {SESSION_COLUMNS}"#
        ))
        .bind(school_id)
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(dto.start_date)
        .bind(dto.end_date)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::bad_request(anyhow::anyhow!(
                        "An academic session with this name already exists in this school"
                    ));
                }
            }
            AppError::from(e)
        })?;

        Ok(session)
    }

    /// Get paginated list of academic sessions for a school, newest first.
    #[instrument(skip(db))]
    pub async fn get_academic_sessions_by_school(
        db: &PgPool,
        school_id: SchoolId,
        filters: AcademicSessionFilterParams,
    ) -> Result<PaginatedAcademicSessionsResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let total = sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM academic_sessions
               WHERE school_id = $1 AND ($2::BOOLEAN IS NULL OR is_active = $2)"#,
        )
        .bind(school_id)
        .bind(filters.is_active)
        .fetch_one(db)
        .await?;

        let sessions = sqlx::query_as::<_, AcademicSession>(&format!(
            r#"SELECT {SESSION_COLUMNS}
               FROM academic_sessions
               WHERE school_id = $1 AND ($2::BOOLEAN IS NULL OR is_active = $2)
               ORDER BY start_date DESC
               LIMIT $3 OFFSET $4"#
        ))
        .bind(school_id)
        .bind(filters.is_active)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

        Ok(PaginatedAcademicSessionsResponse {
            data: sessions,
            meta: PaginationMeta::from_params(total, &filters.pagination),
        })
    }

    /// Get an academic session by ID with school filtering.
    #[instrument(skip(db))]
    pub async fn get_academic_session_by_id(
        db: &PgPool,
        session_id: AcademicSessionId,
        school_id: SchoolId,
    ) -> Result<AcademicSession, AppError> {
        let session = sqlx::query_as::<_, AcademicSession>(&format!(
            "SELECT {SESSION_COLUMNS} FROM academic_sessions WHERE id = $1 AND school_id = $2"
        ))
        .bind(session_id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Academic session not found")))?;

        Ok(session)
    }

    /// Get the active academic session for a school.
    #[instrument(skip(db))]
    pub async fn get_active_academic_session(
        db: &PgPool,
        school_id: SchoolId,
    ) -> Result<Option<AcademicSession>, AppError> {
        let session = sqlx::query_as::<_, AcademicSession>(&format!(
            "SELECT {SESSION_COLUMNS} FROM academic_sessions WHERE school_id = $1 AND is_active = TRUE"
        ))
        .bind(school_id)
        .fetch_optional(db)
        .await?;

        Ok(session)
    }

    /// Make this session the school's only active session.
    ///
    /// Deactivation of the others and activation of this one commit together.
    #[instrument(skip(db))]
    pub async fn activate_academic_session(
        db: &PgPool,
        session_id: AcademicSessionId,
        school_id: SchoolId,
    ) -> Result<AcademicSession, AppError> {
        let mut tx = db.begin().await?;

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM academic_sessions WHERE id = $1 AND school_id = $2)",
        )
        .bind(session_id)
        .bind(school_id)
        .fetch_one(&mut *tx)
        .await?;

        if !exists {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Academic session not found"
            )));
        }

        sqlx::query(
            "UPDATE academic_sessions SET is_active = FALSE, updated_at = NOW() WHERE school_id = $1 AND is_active",
        )
        .bind(school_id)
        .execute(&mut *tx)
        .await?;

        let session = sqlx::query_as::<_, AcademicSession>(&format!(
            r#"UPDATE academic_sessions
               SET is_active = TRUE, updated_at = NOW()
               WHERE id = $1 AND school_id = $2
               RETURNING {SESSION_COLUMNS}"#
        ))
        .bind(session_id)
        .bind(school_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        crate::audit_event!(
            "activate",
            "academic_session",
            session.id = %session.id,
            school.id = %school_id
        );

        Ok(session)
    }
}
