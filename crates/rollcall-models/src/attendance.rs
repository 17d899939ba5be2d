//! Daily attendance models and DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use rollcall_attendance::AttendanceStatus;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::ids::{AcademicSessionId, AttendanceRecordId, SchoolId, StudentId, UserId};

/// One student's status on one date.
///
/// `status` is stored as text; records written through the API hold the
/// canonical name, imported records may hold legacy codes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AttendanceRecord {
    pub id: AttendanceRecordId,
    pub school_id: SchoolId,
    pub academic_session_id: AcademicSessionId,
    pub student_id: StudentId,
    pub attendance_date: NaiveDate,
    pub status: String,
    pub is_deleted: bool,
    pub marked_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttendanceEntryDto {
    pub student_id: StudentId,
    /// Accepts canonical names and register codes (`P`, `A`, `L`, `HD`, `HO`)
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SaveAttendanceDto {
    pub date: NaiveDate,
    /// Defaults to the active session
    pub session_id: Option<AcademicSessionId>,
    /// Between 1 and 500 entries
    #[validate(length(min = 1, max = 500))]
    pub entries: Vec<AttendanceEntryDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SaveAttendanceResponse {
    pub date: NaiveDate,
    pub session_id: AcademicSessionId,
    /// Number of records inserted or updated
    pub saved: u64,
}

#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DateCheckParams {
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "rollcall_core::serde::deserialize_optional_uuid")]
    pub session_id: Option<AcademicSessionId>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DateCheckResponse {
    pub date: NaiveDate,
    pub markable: bool,
    /// Machine-readable reason when not markable (`future_date`, `sunday`,
    /// `holiday`, `outside_session`)
    pub reason: Option<String>,
    pub message: Option<String>,
    /// Name of the holiday when `reason` is `holiday`
    pub holiday_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DailyAttendanceParams {
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "rollcall_core::serde::deserialize_optional_trimmed")]
    pub class_name: Option<String>,
    #[serde(default, deserialize_with = "rollcall_core::serde::deserialize_optional_trimmed")]
    pub section: Option<String>,
}

/// A student's line on the class sheet for a date.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DailyAttendanceRow {
    pub student_id: StudentId,
    pub admission_no: String,
    pub roll_number: Option<i32>,
    pub first_name: String,
    pub last_name: String,
    pub class_name: String,
    pub section: Option<String>,
    pub record_id: Option<AttendanceRecordId>,
    /// Stored status, `null` when not yet marked
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DailyAttendanceResponse {
    pub date: NaiveDate,
    pub entries: Vec<DailyAttendanceRow>,
}
