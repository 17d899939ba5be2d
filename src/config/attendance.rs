use rollcall_attendance::UnknownStatusPolicy;

/// Attendance aggregation settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AttendanceConfig {
    /// What reports do with stored statuses that map to no known code
    pub unknown_status_policy: UnknownStatusPolicy,
}

impl AttendanceConfig {
    /// Reads `ATTENDANCE_UNKNOWN_STATUS_POLICY` (`ignore` or `reject`).
    ///
    /// Unset or unparseable values fall back to `ignore`.
    pub fn from_env() -> Self {
        let unknown_status_policy = match std::env::var("ATTENDANCE_UNKNOWN_STATUS_POLICY") {
            Ok(raw) => raw.parse().unwrap_or_else(|err: String| {
                tracing::warn!(error = %err, "Falling back to the ignore policy");
                UnknownStatusPolicy::Ignore
            }),
            Err(_) => UnknownStatusPolicy::default(),
        };

        Self {
            unknown_status_policy,
        }
    }
}
