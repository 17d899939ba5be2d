use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use rollcall_core::AppError;
use rollcall_models::ids::AttendanceRecordId;

use crate::middleware::auth::{RequireAttendanceMark, RequireAttendanceRead};
use crate::modules::attendance::model::{
    DailyAttendanceParams, DailyAttendanceResponse, DateCheckParams, DateCheckResponse,
    SaveAttendanceDto, SaveAttendanceResponse,
};
use crate::modules::attendance::service::AttendanceService;
use crate::state::AppState;
use crate::utils::auth_helpers::{require_session, resolve_session};
use crate::validator::ValidatedJson;

/// Check whether attendance can be marked for a date
#[utoipa::path(
    get,
    path = "/api/attendance/date-check",
    params(DateCheckParams),
    responses(
        (status = 200, description = "Markability of the date", body = DateCheckResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires attendance:read permission"),
        (status = 404, description = "Academic session not found")
    ),
    tag = "Attendance",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn check_date(
    State(state): State<AppState>,
    RequireAttendanceRead(auth_user): RequireAttendanceRead,
    Query(params): Query<DateCheckParams>,
) -> Result<Json<DateCheckResponse>, AppError> {
    let school_id = auth_user.school_id()?;
    let session = resolve_session(&state.db, school_id, params.session_id).await?;
    let today = Utc::now().date_naive();

    let response = AttendanceService::check_date(
        &state.db,
        school_id,
        session.as_ref(),
        params.date,
        today,
    )
    .await?;

    Ok(Json(response))
}

/// Save a day's attendance for a set of students
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = SaveAttendanceDto,
    responses(
        (status = 200, description = "Attendance saved", body = SaveAttendanceResponse),
        (status = 400, description = "Date not markable, unknown students, or no active session"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires attendance:mark permission"),
        (status = 404, description = "Academic session not found"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Attendance",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn save_attendance(
    State(state): State<AppState>,
    RequireAttendanceMark(auth_user): RequireAttendanceMark,
    ValidatedJson(dto): ValidatedJson<SaveAttendanceDto>,
) -> Result<Json<SaveAttendanceResponse>, AppError> {
    let school_id = auth_user.school_id()?;
    let session = require_session(&state.db, school_id, dto.session_id).await?;
    let marked_by = auth_user.user_id().ok();
    let today = Utc::now().date_naive();

    let response =
        AttendanceService::save_attendance(&state.db, school_id, &session, marked_by, dto, today)
            .await?;

    Ok(Json(response))
}

/// The class sheet for a date
#[utoipa::path(
    get,
    path = "/api/attendance/daily",
    params(DailyAttendanceParams),
    responses(
        (status = 200, description = "Every active student with their status or null", body = DailyAttendanceResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires attendance:read permission")
    ),
    tag = "Attendance",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_daily_attendance(
    State(state): State<AppState>,
    RequireAttendanceRead(auth_user): RequireAttendanceRead,
    Query(params): Query<DailyAttendanceParams>,
) -> Result<Json<DailyAttendanceResponse>, AppError> {
    let school_id = auth_user.school_id()?;

    let response = AttendanceService::get_daily_attendance(&state.db, school_id, params).await?;

    Ok(Json(response))
}

/// Delete an attendance record
#[utoipa::path(
    delete,
    path = "/api/attendance/{id}",
    params(
        ("id" = Uuid, Path, description = "Attendance record ID")
    ),
    responses(
        (status = 204, description = "Record deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires attendance:mark permission"),
        (status = 404, description = "Attendance record not found")
    ),
    tag = "Attendance",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_attendance(
    State(state): State<AppState>,
    RequireAttendanceMark(auth_user): RequireAttendanceMark,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let school_id = auth_user.school_id()?;

    AttendanceService::delete_attendance(&state.db, AttendanceRecordId::from(id), school_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
