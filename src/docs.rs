use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use rollcall_attendance::{
    AttendanceStatus, ColorTag, DayKind, Grade, MonthlyAggregate, MonthlyStatistic, RegisterDay,
};
use rollcall_core::errors::ErrorResponse;
use rollcall_core::{PaginationMeta, PaginationParams};
use rollcall_models::academic_sessions::{
    AcademicSession, AcademicSessionFilterParams, CreateAcademicSessionDto,
    PaginatedAcademicSessionsResponse,
};
use rollcall_models::attendance::{
    AttendanceEntryDto, AttendanceRecord, DailyAttendanceParams, DailyAttendanceResponse,
    DailyAttendanceRow, DateCheckParams, DateCheckResponse, SaveAttendanceDto,
    SaveAttendanceResponse,
};
use rollcall_models::holidays::{CreateHolidayDto, Holiday, HolidayFilterParams};
use rollcall_models::reports::{
    HolidayEntry, MonthlyRegisterReport, MonthlyReportParams, StudentRegister,
    StudentReportParams, StudentYearlyReport, YearlyAttendanceReport, YearlyReportParams,
};
use rollcall_models::students::{
    CreateStudentDto, PaginatedStudentsResponse, Student, StudentFilterParams,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::academic_sessions::controller::create_academic_session,
        crate::modules::academic_sessions::controller::get_academic_sessions,
        crate::modules::academic_sessions::controller::get_active_academic_session,
        crate::modules::academic_sessions::controller::get_academic_session_by_id,
        crate::modules::academic_sessions::controller::activate_academic_session,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::holidays::controller::create_holiday,
        crate::modules::holidays::controller::get_holidays,
        crate::modules::holidays::controller::delete_holiday,
        crate::modules::attendance::controller::check_date,
        crate::modules::attendance::controller::save_attendance,
        crate::modules::attendance::controller::get_daily_attendance,
        crate::modules::attendance::controller::delete_attendance,
        crate::modules::reports::controller::get_yearly_report,
        crate::modules::reports::controller::export_yearly_report,
        crate::modules::reports::controller::get_student_yearly_report,
        crate::modules::reports::controller::get_monthly_register,
    ),
    components(
        schemas(
            ErrorResponse,
            PaginationMeta,
            PaginationParams,
            AcademicSession,
            AcademicSessionFilterParams,
            CreateAcademicSessionDto,
            PaginatedAcademicSessionsResponse,
            Student,
            StudentFilterParams,
            CreateStudentDto,
            PaginatedStudentsResponse,
            Holiday,
            HolidayFilterParams,
            CreateHolidayDto,
            AttendanceStatus,
            AttendanceRecord,
            AttendanceEntryDto,
            SaveAttendanceDto,
            SaveAttendanceResponse,
            DateCheckParams,
            DateCheckResponse,
            DailyAttendanceParams,
            DailyAttendanceRow,
            DailyAttendanceResponse,
            Grade,
            ColorTag,
            DayKind,
            RegisterDay,
            MonthlyAggregate,
            MonthlyStatistic,
            YearlyReportParams,
            StudentReportParams,
            MonthlyReportParams,
            StudentYearlyReport,
            YearlyAttendanceReport,
            HolidayEntry,
            StudentRegister,
            MonthlyRegisterReport,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Academic Sessions", description = "Academic years and the active session"),
        (name = "Students", description = "Student records"),
        (name = "Holidays", description = "The holiday calendar"),
        (name = "Attendance", description = "Daily attendance entry"),
        (name = "Reports", description = "Monthly registers and yearly attendance reports")
    ),
    info(
        title = "Rollcall API",
        version = "0.1.0",
        description = "School attendance tracking and reporting, built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_report_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/reports/attendance/yearly"));
        assert!(doc.paths.paths.contains_key("/api/attendance/date-check"));
        assert!(
            doc.components
                .as_ref()
                .is_some_and(|c| c.security_schemes.contains_key("bearer_auth"))
        );
    }
}
