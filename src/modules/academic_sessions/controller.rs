use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use rollcall_core::AppError;
use rollcall_models::ids::AcademicSessionId;

use crate::middleware::auth::{RequireSessionsManage, RequireSessionsRead};
use crate::modules::academic_sessions::model::{
    AcademicSession, AcademicSessionFilterParams, CreateAcademicSessionDto,
    PaginatedAcademicSessionsResponse,
};
use crate::modules::academic_sessions::service::AcademicSessionService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Create a new academic session
#[utoipa::path(
    post,
    path = "/api/academic-sessions",
    request_body = CreateAcademicSessionDto,
    responses(
        (status = 201, description = "Academic session created successfully", body = AcademicSession),
        (status = 400, description = "Duplicate name or malformed body"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires sessions:manage permission"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Academic Sessions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_academic_session(
    State(state): State<AppState>,
    RequireSessionsManage(auth_user): RequireSessionsManage,
    ValidatedJson(dto): ValidatedJson<CreateAcademicSessionDto>,
) -> Result<(StatusCode, Json<AcademicSession>), AppError> {
    let school_id = auth_user.school_id()?;

    let session =
        AcademicSessionService::create_academic_session(&state.db, school_id, dto).await?;

    Ok((StatusCode::CREATED, Json(session)))
}

/// List the school's academic sessions
#[utoipa::path(
    get,
    path = "/api/academic-sessions",
    params(AcademicSessionFilterParams),
    responses(
        (status = 200, description = "List of academic sessions", body = PaginatedAcademicSessionsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires sessions:read permission")
    ),
    tag = "Academic Sessions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_academic_sessions(
    State(state): State<AppState>,
    RequireSessionsRead(auth_user): RequireSessionsRead,
    Query(filters): Query<AcademicSessionFilterParams>,
) -> Result<Json<PaginatedAcademicSessionsResponse>, AppError> {
    let school_id = auth_user.school_id()?;

    let sessions =
        AcademicSessionService::get_academic_sessions_by_school(&state.db, school_id, filters)
            .await?;

    Ok(Json(sessions))
}

/// Get the active academic session
#[utoipa::path(
    get,
    path = "/api/academic-sessions/active",
    responses(
        (status = 200, description = "Active academic session, or null", body = Option<AcademicSession>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires sessions:read permission")
    ),
    tag = "Academic Sessions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_active_academic_session(
    State(state): State<AppState>,
    RequireSessionsRead(auth_user): RequireSessionsRead,
) -> Result<Json<Option<AcademicSession>>, AppError> {
    let school_id = auth_user.school_id()?;

    let session = AcademicSessionService::get_active_academic_session(&state.db, school_id).await?;

    Ok(Json(session))
}

/// Get an academic session by ID
#[utoipa::path(
    get,
    path = "/api/academic-sessions/{id}",
    params(
        ("id" = Uuid, Path, description = "Academic session ID")
    ),
    responses(
        (status = 200, description = "Academic session details", body = AcademicSession),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires sessions:read permission"),
        (status = 404, description = "Academic session not found")
    ),
    tag = "Academic Sessions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_academic_session_by_id(
    State(state): State<AppState>,
    RequireSessionsRead(auth_user): RequireSessionsRead,
    Path(id): Path<Uuid>,
) -> Result<Json<AcademicSession>, AppError> {
    let school_id = auth_user.school_id()?;

    let session = AcademicSessionService::get_academic_session_by_id(
        &state.db,
        AcademicSessionId::from(id),
        school_id,
    )
    .await?;

    Ok(Json(session))
}

/// Activate an academic session
#[utoipa::path(
    post,
    path = "/api/academic-sessions/{id}/activate",
    params(
        ("id" = Uuid, Path, description = "Academic session ID")
    ),
    responses(
        (status = 200, description = "Academic session activated successfully", body = AcademicSession),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires sessions:manage permission"),
        (status = 404, description = "Academic session not found")
    ),
    tag = "Academic Sessions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn activate_academic_session(
    State(state): State<AppState>,
    RequireSessionsManage(auth_user): RequireSessionsManage,
    Path(id): Path<Uuid>,
) -> Result<Json<AcademicSession>, AppError> {
    let school_id = auth_user.school_id()?;

    let session = AcademicSessionService::activate_academic_session(
        &state.db,
        AcademicSessionId::from(id),
        school_id,
    )
    .await?;

    Ok(Json(session))
}
