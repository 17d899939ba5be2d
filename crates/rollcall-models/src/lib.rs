//! # Rollcall Models
//!
//! Domain models and DTOs for the Rollcall API, shared by the HTTP service
//! and the CLI.
//!
//! # Modules
//!
//! - [`ids`]: Strongly-typed entity IDs
//! - [`academic_sessions`]: Academic years and their activation
//! - [`students`]: Student records
//! - [`holidays`]: The per-session holiday calendar
//! - [`attendance`]: Daily attendance records and the save/check DTOs
//! - [`reports`]: Yearly report and monthly register DTOs
//!
//! # Example
//!
//! ```ignore
//! use rollcall_models::students::{CreateStudentDto, Student};
//! use rollcall_models::ids::StudentId;
//!
//! let id = StudentId::new();
//! ```

pub mod academic_sessions;
pub mod attendance;
pub mod holidays;
pub mod ids;
pub mod reports;
pub mod students;

// Re-export commonly used types at crate root for convenience
pub use academic_sessions::{
    AcademicSession, AcademicSessionFilterParams, CreateAcademicSessionDto,
    PaginatedAcademicSessionsResponse,
};
pub use attendance::{
    AttendanceEntryDto, AttendanceRecord, DailyAttendanceParams, DailyAttendanceResponse,
    DailyAttendanceRow, DateCheckParams, DateCheckResponse, SaveAttendanceDto,
    SaveAttendanceResponse,
};
pub use holidays::{CreateHolidayDto, Holiday, HolidayFilterParams};
pub use ids::{AcademicSessionId, AttendanceRecordId, HolidayId, SchoolId, StudentId, UserId};
pub use reports::{
    HolidayEntry, MonthlyRegisterReport, MonthlyReportParams, StudentRegister,
    StudentReportParams, StudentYearlyReport, YearlyAttendanceReport, YearlyReportParams,
};
pub use students::{CreateStudentDto, PaginatedStudentsResponse, Student, StudentFilterParams};
