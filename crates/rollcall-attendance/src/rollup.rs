//! Percentage, grade and color for a set of counts.

use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl Grade {
    /// Grade band for a percentage. Bands are inclusive at the lower bound.
    #[must_use]
    pub fn for_percentage(percentage: f64) -> Self {
        match percentage {
            p if p >= 95.0 => Self::APlus,
            p if p >= 90.0 => Self::A,
            p if p >= 85.0 => Self::BPlus,
            p if p >= 80.0 => Self::B,
            p if p >= 75.0 => Self::CPlus,
            p if p >= 70.0 => Self::C,
            p if p >= 60.0 => Self::D,
            _ => Self::F,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
            Self::NotApplicable => "N/A",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation hint for a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    Success,
    Primary,
    Warning,
    Danger,
    Secondary,
}

impl ColorTag {
    #[must_use]
    pub fn for_percentage(percentage: f64) -> Self {
        match percentage {
            p if p >= 90.0 => Self::Success,
            p if p >= 75.0 => Self::Primary,
            p if p >= 60.0 => Self::Warning,
            _ => Self::Danger,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Primary => "primary",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Secondary => "secondary",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rollup {
    pub effective_present: u32,
    pub effective_absent: u32,
    pub percentage: f64,
    pub grade: Grade,
    pub color: ColorTag,
}

/// Rounds to two decimals, halves away from zero.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rolls counts up into a percentage, grade and color.
///
/// Late and half-day both count as present. Absence is whatever is left of
/// the working days, so days nobody marked count as absent. With no working
/// days the result is `0.0`, `N/A` and `secondary`.
#[must_use]
pub fn roll_up(working_days: u32, present: u32, late: u32, half_day: u32) -> Rollup {
    let effective_present = present + late + half_day;

    if working_days == 0 {
        return Rollup {
            effective_present,
            effective_absent: 0,
            percentage: 0.0,
            grade: Grade::NotApplicable,
            color: ColorTag::Secondary,
        };
    }

    let effective_absent = working_days.saturating_sub(effective_present);
    let percentage =
        round2(f64::from(effective_present) / f64::from(working_days) * 100.0).min(100.0);

    Rollup {
        effective_present,
        effective_absent,
        percentage,
        grade: Grade::for_percentage(percentage),
        color: ColorTag::for_percentage(percentage),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_boundaries() {
        let cases = [
            (100.0, Grade::APlus),
            (95.0, Grade::APlus),
            (94.99, Grade::A),
            (90.0, Grade::A),
            (89.99, Grade::BPlus),
            (85.0, Grade::BPlus),
            (80.0, Grade::B),
            (75.0, Grade::CPlus),
            (70.0, Grade::C),
            (69.99, Grade::D),
            (60.0, Grade::D),
            (59.99, Grade::F),
            (0.0, Grade::F),
        ];

        for (percentage, expected) in cases {
            assert_eq!(Grade::for_percentage(percentage), expected, "{percentage}");
        }
    }

    #[test]
    fn test_color_boundaries() {
        assert_eq!(ColorTag::for_percentage(90.0), ColorTag::Success);
        assert_eq!(ColorTag::for_percentage(89.99), ColorTag::Primary);
        assert_eq!(ColorTag::for_percentage(75.0), ColorTag::Primary);
        assert_eq!(ColorTag::for_percentage(74.99), ColorTag::Warning);
        assert_eq!(ColorTag::for_percentage(60.0), ColorTag::Warning);
        assert_eq!(ColorTag::for_percentage(59.99), ColorTag::Danger);
    }

    #[test]
    fn test_zero_working_days() {
        let rollup = roll_up(0, 0, 0, 0);
        assert_eq!(rollup.percentage, 0.0);
        assert_eq!(rollup.grade, Grade::NotApplicable);
        assert_eq!(rollup.color, ColorTag::Secondary);
        assert_eq!(rollup.effective_absent, 0);
    }

    #[test]
    fn test_late_and_half_day_count_as_present() {
        let rollup = roll_up(23, 20, 1, 1);
        assert_eq!(rollup.effective_present, 22);
        assert_eq!(rollup.effective_absent, 1);
        assert_eq!(rollup.percentage, 95.65);
        assert_eq!(rollup.grade, Grade::APlus);
        assert_eq!(rollup.color, ColorTag::Success);
    }

    #[test]
    fn test_unmarked_days_count_as_absent() {
        let rollup = roll_up(20, 10, 0, 0);
        assert_eq!(rollup.effective_absent, 10);
        assert_eq!(rollup.percentage, 50.0);
        assert_eq!(rollup.grade, Grade::F);
    }

    #[test]
    fn test_percentage_is_clamped() {
        let rollup = roll_up(10, 12, 0, 0);
        assert_eq!(rollup.percentage, 100.0);
        assert_eq!(rollup.effective_absent, 0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(66.666_666), 66.67);
        assert_eq!(round2(33.333_333), 33.33);
        assert_eq!(round2(12.5), 12.5);
    }

    #[test]
    fn test_grade_serializes_as_label() {
        assert_eq!(serde_json::to_string(&Grade::APlus).unwrap(), "\"A+\"");
        assert_eq!(
            serde_json::to_string(&Grade::NotApplicable).unwrap(),
            "\"N/A\""
        );
        assert_eq!(
            serde_json::to_string(&ColorTag::Warning).unwrap(),
            "\"warning\""
        );
    }
}
