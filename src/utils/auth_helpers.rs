use rollcall_core::AppError;
use rollcall_db::PgPool;
use rollcall_models::academic_sessions::AcademicSession;
use rollcall_models::ids::{AcademicSessionId, SchoolId};

use crate::modules::academic_sessions::service::AcademicSessionService;

/// Resolve the academic session a request refers to.
///
/// Priority:
/// 1. An explicit `session_id`, which must belong to the school (404 otherwise)
/// 2. The school's active session, if any
pub async fn resolve_session(
    db: &PgPool,
    school_id: SchoolId,
    session_id: Option<AcademicSessionId>,
) -> Result<Option<AcademicSession>, AppError> {
    match session_id {
        Some(id) => AcademicSessionService::get_academic_session_by_id(db, id, school_id)
            .await
            .map(Some),
        None => AcademicSessionService::get_active_academic_session(db, school_id).await,
    }
}

/// Like [`resolve_session`], but writes need a session to attach records to.
pub async fn require_session(
    db: &PgPool,
    school_id: SchoolId,
    session_id: Option<AcademicSessionId>,
) -> Result<AcademicSession, AppError> {
    resolve_session(db, school_id, session_id)
        .await?
        .ok_or_else(|| {
            AppError::bad_request(anyhow::anyhow!(
                "No active academic session; specify session_id"
            ))
        })
}
