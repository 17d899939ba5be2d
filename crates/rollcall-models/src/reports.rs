//! Attendance report DTOs.
//!
//! The yearly report lists every student of a class with twelve monthly
//! aggregates (April through March) and yearly totals, followed by per-month
//! class statistics. The monthly register lists every day of one month.

use chrono::NaiveDate;
use rollcall_attendance::{
    ColorTag, Grade, MonthlyAggregate, MonthlyStatistic, RegisterDay, YearlyAggregate,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::ids::{AcademicSessionId, StudentId};
use crate::students::Student;

#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct YearlyReportParams {
    #[serde(default, deserialize_with = "rollcall_core::serde::deserialize_optional_trimmed")]
    pub class_name: Option<String>,
    #[serde(default, deserialize_with = "rollcall_core::serde::deserialize_optional_trimmed")]
    pub section: Option<String>,
    /// Defaults to the active session
    #[serde(default, deserialize_with = "rollcall_core::serde::deserialize_optional_uuid")]
    pub session_id: Option<AcademicSessionId>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StudentReportParams {
    /// Defaults to the active session
    #[serde(default, deserialize_with = "rollcall_core::serde::deserialize_optional_uuid")]
    pub session_id: Option<AcademicSessionId>,
}

#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MonthlyReportParams {
    /// `YYYY-MM`, `MM-YYYY`, `MM/YYYY` or `Month YYYY`
    pub month: String,
    #[serde(default, deserialize_with = "rollcall_core::serde::deserialize_optional_trimmed")]
    pub class_name: Option<String>,
    #[serde(default, deserialize_with = "rollcall_core::serde::deserialize_optional_trimmed")]
    pub section: Option<String>,
    #[serde(default, deserialize_with = "rollcall_core::serde::deserialize_optional_uuid")]
    pub session_id: Option<AcademicSessionId>,
}

/// One student's line in the yearly report.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StudentYearlyReport {
    /// 1-based position in the report
    pub serial_no: u32,
    pub student_id: StudentId,
    pub admission_no: String,
    pub roll_number: Option<i32>,
    pub name: String,
    pub father_name: Option<String>,
    pub class_name: String,
    pub section: Option<String>,
    /// Twelve entries, April through March
    pub monthly_data: Vec<MonthlyAggregate>,
    pub total_working_days: u32,
    pub total_present: u32,
    pub total_absent: u32,
    pub total_late: u32,
    pub total_half_day: u32,
    pub total_holidays: u32,
    pub attendance_percentage: f64,
    pub attendance_grade: Grade,
    pub attendance_color: ColorTag,
}

impl StudentYearlyReport {
    #[must_use]
    pub fn new(serial_no: u32, student: &Student, year: YearlyAggregate) -> Self {
        Self {
            serial_no,
            student_id: student.id,
            admission_no: student.admission_no.clone(),
            roll_number: student.roll_number,
            name: student.full_name(),
            father_name: student.father_name.clone(),
            class_name: student.class_name.clone(),
            section: student.section.clone(),
            monthly_data: year.months,
            total_working_days: year.total_working_days,
            total_present: year.total_present,
            total_absent: year.total_absent,
            total_late: year.total_late,
            total_half_day: year.total_half_day,
            total_holidays: year.total_holidays,
            attendance_percentage: year.attendance_percentage,
            attendance_grade: year.grade,
            attendance_color: year.color,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct YearlyAttendanceReport {
    pub students: Vec<StudentYearlyReport>,
    pub monthly_statistics: Vec<MonthlyStatistic>,
    /// Empty when no session could be resolved
    pub session_name: String,
    /// `"<start year>-<end year>"`, empty when no session could be resolved
    pub session_year: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HolidayEntry {
    pub date: NaiveDate,
    pub name: String,
}

/// One student's row in the monthly register.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StudentRegister {
    pub serial_no: u32,
    pub student_id: StudentId,
    pub admission_no: String,
    pub roll_number: Option<i32>,
    pub name: String,
    pub days: Vec<RegisterDay>,
    pub summary: MonthlyAggregate,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MonthlyRegisterReport {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub session_name: String,
    pub working_days: u32,
    pub holidays: Vec<HolidayEntry>,
    pub students: Vec<StudentRegister>,
}
