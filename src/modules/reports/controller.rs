use axum::{
    Json,
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use tracing::instrument;
use uuid::Uuid;

use rollcall_core::AppError;
use rollcall_models::ids::StudentId;

use crate::middleware::auth::RequireReportsRead;
use crate::modules::reports::export::{XLSX_CONTENT_TYPE, yearly_workbook};
use crate::modules::reports::model::{
    MonthlyRegisterReport, MonthlyReportParams, StudentReportParams, StudentYearlyReport,
    YearlyAttendanceReport, YearlyReportParams,
};
use crate::modules::reports::service::ReportService;
use crate::state::AppState;

/// Yearly attendance report for a class
#[utoipa::path(
    get,
    path = "/api/reports/attendance/yearly",
    params(YearlyReportParams),
    responses(
        (status = 200, description = "Twelve months per student plus class statistics", body = YearlyAttendanceReport),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires reports:read permission"),
        (status = 404, description = "Academic session not found"),
        (status = 422, description = "Stored status not recognized under the reject policy")
    ),
    tag = "Reports",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_yearly_report(
    State(state): State<AppState>,
    RequireReportsRead(auth_user): RequireReportsRead,
    Query(params): Query<YearlyReportParams>,
) -> Result<Json<YearlyAttendanceReport>, AppError> {
    let school_id = auth_user.school_id()?;

    let report = ReportService::yearly_report(
        &state.db,
        school_id,
        params,
        state.attendance_config.unknown_status_policy,
    )
    .await?;

    Ok(Json(report))
}

/// Yearly attendance report as an Excel workbook
#[utoipa::path(
    get,
    path = "/api/reports/attendance/yearly/export",
    params(YearlyReportParams),
    responses(
        (status = 200, description = "Workbook attachment", content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires reports:read permission"),
        (status = 404, description = "Academic session not found"),
        (status = 422, description = "Stored status not recognized under the reject policy")
    ),
    tag = "Reports",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn export_yearly_report(
    State(state): State<AppState>,
    RequireReportsRead(auth_user): RequireReportsRead,
    Query(params): Query<YearlyReportParams>,
) -> Result<Response, AppError> {
    let school_id = auth_user.school_id()?;

    let report = ReportService::yearly_report(
        &state.db,
        school_id,
        params,
        state.attendance_config.unknown_status_policy,
    )
    .await?;

    let bytes = yearly_workbook(&report).map_err(AppError::internal)?;
    let filename = if report.session_year.is_empty() {
        "yearly-attendance.xlsx".to_string()
    } else {
        format!("yearly-attendance-{}.xlsx", report.session_year)
    };

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// Yearly attendance summary for one student
#[utoipa::path(
    get,
    path = "/api/reports/attendance/students/{id}/yearly",
    params(
        ("id" = Uuid, Path, description = "Student ID"),
        StudentReportParams
    ),
    responses(
        (status = 200, description = "Student yearly summary", body = StudentYearlyReport),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires reports:read permission"),
        (status = 404, description = "Student or academic session not found"),
        (status = 422, description = "Stored status not recognized under the reject policy")
    ),
    tag = "Reports",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_student_yearly_report(
    State(state): State<AppState>,
    RequireReportsRead(auth_user): RequireReportsRead,
    Path(id): Path<Uuid>,
    Query(params): Query<StudentReportParams>,
) -> Result<Json<StudentYearlyReport>, AppError> {
    let school_id = auth_user.school_id()?;

    let report = ReportService::student_yearly_report(
        &state.db,
        school_id,
        StudentId::from(id),
        params,
        state.attendance_config.unknown_status_policy,
    )
    .await?;

    Ok(Json(report))
}

/// Monthly attendance register
#[utoipa::path(
    get,
    path = "/api/reports/attendance/monthly",
    params(MonthlyReportParams),
    responses(
        (status = 200, description = "Day-by-day register for the month", body = MonthlyRegisterReport),
        (status = 400, description = "Malformed month"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires reports:read permission"),
        (status = 404, description = "Academic session not found"),
        (status = 422, description = "Stored status not recognized under the reject policy")
    ),
    tag = "Reports",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_monthly_register(
    State(state): State<AppState>,
    RequireReportsRead(auth_user): RequireReportsRead,
    Query(params): Query<MonthlyReportParams>,
) -> Result<Json<MonthlyRegisterReport>, AppError> {
    let school_id = auth_user.school_id()?;

    let report = ReportService::monthly_register(
        &state.db,
        school_id,
        params,
        state.attendance_config.unknown_status_policy,
    )
    .await?;

    Ok(Json(report))
}
