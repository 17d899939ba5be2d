//! Attendance status codes.
//!
//! Stored statuses are free text: the entry form writes `present`, `late` and
//! so on, while imported registers carry single letters such as `P` or `HD`.
//! [`AttendanceStatus::parse_code`] maps every accepted spelling onto the five
//! canonical statuses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::error::StatusError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    HalfDay,
    Holiday,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 5] = [
        AttendanceStatus::Present,
        AttendanceStatus::Absent,
        AttendanceStatus::Late,
        AttendanceStatus::HalfDay,
        AttendanceStatus::Holiday,
    ];

    /// Maps a raw status string to a status, ignoring case, surrounding
    /// whitespace, and inner spaces, underscores or hyphens.
    ///
    /// `H` means half day. Holiday is only recognized as `holiday`,
    /// `holy day` or `HO`.
    #[must_use]
    pub fn parse_code(raw: &str) -> Option<Self> {
        let key: String = raw
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "present" | "p" => Some(Self::Present),
            "absent" | "a" => Some(Self::Absent),
            "late" | "l" => Some(Self::Late),
            "halfday" | "hd" | "h" => Some(Self::HalfDay),
            "holiday" | "holyday" | "ho" => Some(Self::Holiday),
            _ => None,
        }
    }

    /// Canonical stored form.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
            Self::Late => "late",
            Self::HalfDay => "half_day",
            Self::Holiday => "holiday",
        }
    }

    /// Register abbreviation.
    #[must_use]
    pub fn short_code(&self) -> &'static str {
        match self {
            Self::Present => "P",
            Self::Absent => "A",
            Self::Late => "L",
            Self::HalfDay => "HD",
            Self::Holiday => "HO",
        }
    }

    /// Whether the status counts towards effective presence.
    #[must_use]
    pub fn counts_as_present(&self) -> bool {
        matches!(self, Self::Present | Self::Late | Self::HalfDay)
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_code(s).ok_or_else(|| StatusError::Unknown(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for AttendanceStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse_code(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!("unrecognized attendance status '{raw}'"))
        })
    }
}

/// What to do with a stored status that does not map to any known status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownStatusPolicy {
    /// Skip the record and log a warning
    #[default]
    Ignore,
    /// Fail the aggregation
    Reject,
}

impl FromStr for UnknownStatusPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "reject" => Ok(Self::Reject),
            other => Err(format!(
                "unknown status policy '{other}': expected 'ignore' or 'reject'"
            )),
        }
    }
}

/// Per-status record counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusTally {
    pub present: u32,
    pub absent: u32,
    pub late: u32,
    pub half_day: u32,
    pub holiday: u32,
    /// Records skipped under [`UnknownStatusPolicy::Ignore`]
    pub unrecognized: u32,
}

impl StatusTally {
    pub fn record(&mut self, status: AttendanceStatus) {
        match status {
            AttendanceStatus::Present => self.present += 1,
            AttendanceStatus::Absent => self.absent += 1,
            AttendanceStatus::Late => self.late += 1,
            AttendanceStatus::HalfDay => self.half_day += 1,
            AttendanceStatus::Holiday => self.holiday += 1,
        }
    }

    #[must_use]
    pub fn effective_present(&self) -> u32 {
        self.present + self.late + self.half_day
    }
}

/// Counts raw statuses, applying `policy` to anything unrecognized.
pub fn tally<'a, I>(statuses: I, policy: UnknownStatusPolicy) -> Result<StatusTally, StatusError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts = StatusTally::default();

    for raw in statuses {
        match AttendanceStatus::parse_code(raw) {
            Some(status) => counts.record(status),
            None => match policy {
                UnknownStatusPolicy::Ignore => {
                    tracing::warn!(status = %raw, "Ignoring unrecognized attendance status");
                    counts.unrecognized += 1;
                }
                UnknownStatusPolicy::Reject => {
                    return Err(StatusError::Unknown(raw.to_string()));
                }
            },
        }
    }

    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_names() {
        for status in AttendanceStatus::ALL {
            assert_eq!(AttendanceStatus::parse_code(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_parse_short_codes() {
        for status in AttendanceStatus::ALL {
            assert_eq!(AttendanceStatus::parse_code(status.short_code()), Some(status));
        }
    }

    #[test]
    fn test_parse_is_lenient() {
        let cases = [
            ("  PRESENT ", AttendanceStatus::Present),
            ("p", AttendanceStatus::Present),
            ("Half Day", AttendanceStatus::HalfDay),
            ("half-day", AttendanceStatus::HalfDay),
            ("HALF_DAY", AttendanceStatus::HalfDay),
            ("h", AttendanceStatus::HalfDay),
            ("Holy Day", AttendanceStatus::Holiday),
            ("ho", AttendanceStatus::Holiday),
            ("L", AttendanceStatus::Late),
        ];

        for (raw, expected) in cases {
            assert_eq!(AttendanceStatus::parse_code(raw), Some(expected), "{raw}");
        }
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(AttendanceStatus::parse_code(""), None);
        assert_eq!(AttendanceStatus::parse_code("excused"), None);
        assert_eq!(AttendanceStatus::parse_code("x"), None);
        assert!("sick".parse::<AttendanceStatus>().is_err());
    }

    #[test]
    fn test_serde_uses_canonical_names_and_accepts_codes() {
        let json = serde_json::to_string(&AttendanceStatus::HalfDay).unwrap();
        assert_eq!(json, "\"half_day\"");

        let parsed: AttendanceStatus = serde_json::from_str("\"HD\"").unwrap();
        assert_eq!(parsed, AttendanceStatus::HalfDay);

        assert!(serde_json::from_str::<AttendanceStatus>("\"nope\"").is_err());
    }

    #[test]
    fn test_tally_counts() {
        let statuses = ["P", "present", "A", "L", "HD", "holiday"];
        let counts = tally(statuses, UnknownStatusPolicy::Ignore).unwrap();

        assert_eq!(counts.present, 2);
        assert_eq!(counts.absent, 1);
        assert_eq!(counts.late, 1);
        assert_eq!(counts.half_day, 1);
        assert_eq!(counts.holiday, 1);
        assert_eq!(counts.effective_present(), 4);
    }

    #[test]
    fn test_tally_ignore_policy_skips_unknown() {
        let counts = tally(["P", "??", "sick"], UnknownStatusPolicy::Ignore).unwrap();
        assert_eq!(counts.present, 1);
        assert_eq!(counts.unrecognized, 2);
    }

    #[test]
    fn test_tally_reject_policy_fails() {
        let err = tally(["P", "sick"], UnknownStatusPolicy::Reject).unwrap_err();
        assert_eq!(err, StatusError::Unknown("sick".to_string()));
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!(
            "Reject".parse::<UnknownStatusPolicy>().unwrap(),
            UnknownStatusPolicy::Reject
        );
        assert_eq!(
            " ignore ".parse::<UnknownStatusPolicy>().unwrap(),
            UnknownStatusPolicy::Ignore
        );
        assert!("drop".parse::<UnknownStatusPolicy>().is_err());
    }
}
