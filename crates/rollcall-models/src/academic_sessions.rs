//! Academic session models and DTOs.
//!
//! An academic session is a school's academic year (for example
//! "2024-2025", April 1 to March 31). Each school can have many sessions but
//! at most one active one; reports fall back to the active session when the
//! caller does not name one.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rollcall_attendance::{CalendarError, DateRange};
use rollcall_core::{PaginationMeta, PaginationParams};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::ids::{AcademicSessionId, SchoolId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AcademicSession {
    pub id: AcademicSessionId,
    pub school_id: SchoolId,
    /// Display name (e.g., "2024-2025")
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Only one session per school is active at a time
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AcademicSession {
    pub fn date_range(&self) -> Result<DateRange, CalendarError> {
        DateRange::new(self.start_date, self.end_date)
    }

    /// `"<start year>-<end year>"`, e.g. `"2024-2025"`.
    #[must_use]
    pub fn session_year(&self) -> String {
        format!("{}-{}", self.start_date.year(), self.end_date.year())
    }
}

fn validate_session_dates(dto: &CreateAcademicSessionDto) -> Result<(), ValidationError> {
    if dto.start_date >= dto.end_date {
        let mut err = ValidationError::new("date_order");
        err.message = Some("start_date must be before end_date".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_session_dates"))]
pub struct CreateAcademicSessionDto {
    /// Name of the session (1-100 characters)
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    pub start_date: NaiveDate,
    /// Must be after `start_date`
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AcademicSessionFilterParams {
    /// Filter by active status
    #[serde(default, deserialize_with = "rollcall_core::serde::deserialize_optional_bool")]
    pub is_active: Option<bool>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedAcademicSessionsResponse {
    pub data: Vec<AcademicSession>,
    pub meta: PaginationMeta,
}
