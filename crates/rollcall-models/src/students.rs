//! Student models and DTOs.
//!
//! Students belong to one school and sit in a class and section
//! (e.g. class "5", section "A"). Reports list them in roll-number order.

use chrono::{DateTime, Utc};
use rollcall_core::{PaginationMeta, PaginationParams};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::ids::{SchoolId, StudentId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Student {
    pub id: StudentId,
    pub school_id: SchoolId,
    /// Admission number, unique within a school
    pub admission_no: String,
    pub roll_number: Option<i32>,
    pub first_name: String,
    pub last_name: String,
    pub father_name: Option<String>,
    pub class_name: String,
    pub section: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateStudentDto {
    #[validate(length(min = 1, max = 50))]
    pub admission_no: String,
    #[validate(range(min = 1))]
    pub roll_number: Option<i32>,
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(max = 100))]
    pub last_name: String,
    #[validate(length(max = 200))]
    pub father_name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub class_name: String,
    #[validate(length(max = 20))]
    pub section: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StudentFilterParams {
    /// Filter by class (exact match)
    #[serde(default, deserialize_with = "rollcall_core::serde::deserialize_optional_trimmed")]
    pub class_name: Option<String>,
    /// Filter by section (exact match)
    #[serde(default, deserialize_with = "rollcall_core::serde::deserialize_optional_trimmed")]
    pub section: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedStudentsResponse {
    pub data: Vec<Student>,
    pub meta: PaginationMeta,
}
