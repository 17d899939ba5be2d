use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use rollcall_core::AppError;
use rollcall_models::ids::HolidayId;

use crate::middleware::auth::{RequireHolidaysManage, RequireHolidaysRead};
use crate::modules::holidays::model::{CreateHolidayDto, Holiday, HolidayFilterParams};
use crate::modules::holidays::service::HolidayService;
use crate::state::AppState;
use crate::utils::auth_helpers::{require_session, resolve_session};
use crate::validator::ValidatedJson;

/// Declare a holiday
#[utoipa::path(
    post,
    path = "/api/holidays",
    request_body = CreateHolidayDto,
    responses(
        (status = 201, description = "Holiday declared", body = Holiday),
        (status = 400, description = "Date outside the session, already a holiday, or no active session"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires holidays:manage permission"),
        (status = 404, description = "Academic session not found"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Holidays",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_holiday(
    State(state): State<AppState>,
    RequireHolidaysManage(auth_user): RequireHolidaysManage,
    ValidatedJson(dto): ValidatedJson<CreateHolidayDto>,
) -> Result<(StatusCode, Json<Holiday>), AppError> {
    let school_id = auth_user.school_id()?;
    let session = require_session(&state.db, school_id, dto.session_id).await?;

    let holiday = HolidayService::create_holiday(&state.db, school_id, &session, dto).await?;

    Ok((StatusCode::CREATED, Json(holiday)))
}

/// List a session's holidays
#[utoipa::path(
    get,
    path = "/api/holidays",
    params(HolidayFilterParams),
    responses(
        (status = 200, description = "Active holidays in date order; empty without a session", body = Vec<Holiday>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires holidays:read permission"),
        (status = 404, description = "Academic session not found")
    ),
    tag = "Holidays",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_holidays(
    State(state): State<AppState>,
    RequireHolidaysRead(auth_user): RequireHolidaysRead,
    Query(filters): Query<HolidayFilterParams>,
) -> Result<Json<Vec<Holiday>>, AppError> {
    let school_id = auth_user.school_id()?;

    let Some(session) = resolve_session(&state.db, school_id, filters.session_id).await? else {
        return Ok(Json(Vec::new()));
    };

    let holidays = HolidayService::get_holidays_by_session(&state.db, school_id, session.id).await?;

    Ok(Json(holidays))
}

/// Remove a holiday
#[utoipa::path(
    delete,
    path = "/api/holidays/{id}",
    params(
        ("id" = Uuid, Path, description = "Holiday ID")
    ),
    responses(
        (status = 204, description = "Holiday deactivated"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires holidays:manage permission"),
        (status = 404, description = "Holiday not found")
    ),
    tag = "Holidays",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_holiday(
    State(state): State<AppState>,
    RequireHolidaysManage(auth_user): RequireHolidaysManage,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let school_id = auth_user.school_id()?;

    HolidayService::delete_holiday(&state.db, HolidayId::from(id), school_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
