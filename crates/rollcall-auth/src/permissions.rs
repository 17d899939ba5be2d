//! Permission names carried in access tokens.

pub const SESSIONS_MANAGE: &str = "sessions:manage";
pub const SESSIONS_READ: &str = "sessions:read";
pub const STUDENTS_MANAGE: &str = "students:manage";
pub const STUDENTS_READ: &str = "students:read";
pub const HOLIDAYS_MANAGE: &str = "holidays:manage";
pub const HOLIDAYS_READ: &str = "holidays:read";
pub const ATTENDANCE_MARK: &str = "attendance:mark";
pub const ATTENDANCE_READ: &str = "attendance:read";
pub const REPORTS_READ: &str = "reports:read";

pub const ALL: [&str; 9] = [
    SESSIONS_MANAGE,
    SESSIONS_READ,
    STUDENTS_MANAGE,
    STUDENTS_READ,
    HOLIDAYS_MANAGE,
    HOLIDAYS_READ,
    ATTENDANCE_MARK,
    ATTENDANCE_READ,
    REPORTS_READ,
];
