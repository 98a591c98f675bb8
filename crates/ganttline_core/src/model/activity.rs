//! Activity domain model.
//!
//! # Responsibility
//! - Define the canonical record for one schedulable activity.
//! - Own construction-time validation shared by store and service layers.
//!
//! # Invariants
//! - `id` is stable across reorders and edits, and never nil.
//! - `name` is trimmed and non-empty.
//! - `duration` is a whole number of days, at least 1.
//! - Dependency is always relative to the previous activity in the sequence.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier for an activity.
pub type ActivityId = Uuid;

/// How an activity is chained to the activity directly before it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencyType {
    /// Finish-to-start: begins the day the predecessor finishes.
    #[default]
    #[serde(rename = "FS")]
    FinishToStart,
    /// Start-to-start: begins together with the predecessor.
    #[serde(rename = "SS")]
    StartToStart,
}

impl DependencyType {
    /// Short code used on the wire and in plan lines.
    pub fn code(self) -> &'static str {
        match self {
            Self::FinishToStart => "FS",
            Self::StartToStart => "SS",
        }
    }
}

impl Display for DependencyType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for DependencyType {
    type Err = ActivityValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "FS" => Ok(Self::FinishToStart),
            "SS" => Ok(Self::StartToStart),
            _ => Err(ActivityValidationError::UnknownDependency(
                value.trim().to_string(),
            )),
        }
    }
}

/// Longest span, in days, an activity or a whole plan may cover.
pub const MAX_DURATION_DAYS: u32 = 36_600;

/// Validation failures for activity records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityValidationError {
    NilId,
    BlankName,
    ZeroDuration,
    DurationTooLong(u32),
    UnknownDependency(String),
}

impl Display for ActivityValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "activity id must not be nil"),
            Self::BlankName => write!(f, "activity name must not be blank"),
            Self::ZeroDuration => write!(f, "activity duration must be at least 1 day"),
            Self::DurationTooLong(days) => write!(
                f,
                "activity duration {days} exceeds the {MAX_DURATION_DAYS}-day limit"
            ),
            Self::UnknownDependency(value) => {
                write!(f, "unknown dependency type `{value}`; expected FS|SS")
            }
        }
    }
}

impl Error for ActivityValidationError {}

/// One named, durationed activity in a plan sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ActivityRecord")]
pub struct Activity {
    pub id: ActivityId,
    pub name: String,
    /// Whole days, `1..=MAX_DURATION_DAYS`.
    pub duration: u32,
    pub dependency: DependencyType,
}

impl Activity {
    /// Creates a finish-to-start activity with a generated id.
    pub fn new(name: impl Into<String>, duration: u32) -> Result<Self, ActivityValidationError> {
        Self::with_id(Uuid::new_v4(), name, duration, DependencyType::default())
    }

    /// Creates an activity with a caller-provided id.
    ///
    /// The name is trimmed before validation.
    pub fn with_id(
        id: ActivityId,
        name: impl Into<String>,
        duration: u32,
        dependency: DependencyType,
    ) -> Result<Self, ActivityValidationError> {
        let activity = Self {
            id,
            name: name.into().trim().to_string(),
            duration,
            dependency,
        };
        activity.validate()?;
        Ok(activity)
    }

    /// Checks record-level invariants.
    ///
    /// Fields are public, so store writes call this again before accepting
    /// a record.
    pub fn validate(&self) -> Result<(), ActivityValidationError> {
        if self.id.is_nil() {
            return Err(ActivityValidationError::NilId);
        }
        if self.name.trim().is_empty() {
            return Err(ActivityValidationError::BlankName);
        }
        if self.duration == 0 {
            return Err(ActivityValidationError::ZeroDuration);
        }
        if self.duration > MAX_DURATION_DAYS {
            return Err(ActivityValidationError::DurationTooLong(self.duration));
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct ActivityRecord {
    id: ActivityId,
    name: String,
    duration: u32,
    #[serde(default)]
    dependency: DependencyType,
}

impl TryFrom<ActivityRecord> for Activity {
    type Error = ActivityValidationError;

    fn try_from(value: ActivityRecord) -> Result<Self, Self::Error> {
        Self::with_id(value.id, value.name, value.duration, value.dependency)
    }
}
