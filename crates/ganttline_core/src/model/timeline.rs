//! Timeline value types shared by the axis generator and geometry mapper.
//!
//! All types here are recomputed on every layout pass and carry no identity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Display granularity of the timeline axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeScale {
    #[default]
    Days,
    Weeks,
    Months,
}

impl TimeScale {
    pub const ALL: [TimeScale; 3] = [Self::Days, Self::Weeks, Self::Months];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Days => "days",
            Self::Weeks => "weeks",
            Self::Months => "months",
        }
    }

    /// Fewest axis units rendered for this scale, even for an empty plan.
    pub fn min_units(self) -> usize {
        match self {
            Self::Days => 14,
            Self::Weeks => 4,
            Self::Months => 3,
        }
    }

    /// Unit width applied when the user switches to this scale.
    pub fn default_unit_width(self) -> f64 {
        match self {
            Self::Days => 36.0,
            Self::Weeks => 60.0,
            Self::Months => 80.0,
        }
    }
}

impl Display for TimeScale {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a scale name is not one of `days|weeks|months`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTimeScale(pub String);

impl Display for UnknownTimeScale {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown time scale `{}`; expected days|weeks|months",
            self.0
        )
    }
}

impl Error for UnknownTimeScale {}

impl FromStr for TimeScale {
    type Err = UnknownTimeScale;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "day" | "days" => Ok(Self::Days),
            "week" | "weeks" => Ok(Self::Weeks),
            "month" | "months" => Ok(Self::Months),
            _ => Err(UnknownTimeScale(value.trim().to_string())),
        }
    }
}

/// One column of the rendered axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineUnit {
    /// First calendar day covered by the unit.
    pub anchor_date: NaiveDate,
    pub label: String,
    pub sub_label: String,
    /// Only ever set on the day scale.
    pub is_weekend: bool,
    /// Month boundary (days, weeks) or year boundary (months).
    pub is_first_of_period: bool,
    /// Only set on the month scale.
    pub days_in_month: Option<u32>,
}

/// Pixel placement of one activity bar inside the scrollable timeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BarGeometry {
    pub left_px: f64,
    pub width_px: f64,
}

impl BarGeometry {
    pub fn right_px(&self) -> f64 {
        self.left_px + self.width_px
    }
}
