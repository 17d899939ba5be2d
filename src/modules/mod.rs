pub mod academic_sessions;
pub mod attendance;
pub mod holidays;
pub mod reports;
pub mod students;
