//! Holiday calendar models and DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::ids::{AcademicSessionId, HolidayId, SchoolId};

/// A declared non-working day within an academic session.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Holiday {
    pub id: HolidayId,
    pub school_id: SchoolId,
    pub academic_session_id: AcademicSessionId,
    pub holiday_date: NaiveDate,
    pub name: String,
    /// Inactive holidays are ignored everywhere
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateHolidayDto {
    /// Defaults to the active session
    pub session_id: Option<AcademicSessionId>,
    pub holiday_date: NaiveDate,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HolidayFilterParams {
    /// Defaults to the active session
    #[serde(default, deserialize_with = "rollcall_core::serde::deserialize_optional_uuid")]
    pub session_id: Option<AcademicSessionId>,
}
