//! Plan editing and layout use-case service.
//!
//! # Responsibility
//! - Validate user-entered activity data before it enters the sequence.
//! - Own the view state (project start, scale, zoom) of one editing session.
//! - Run the scheduler, axis generator, and geometry mapper end to end.
//!
//! # Invariants
//! - Every layout is recomputed from the current sequence and view state.
//! - Switching scale resets the unit width to that scale's default.
//! - Activity names are never written to logs.

use crate::engine::axis::TimelineAxis;
use crate::engine::labels::{
    activity_date_range, activity_range_label, project_range_label, suggest_scale,
};
use crate::engine::scheduler::{compute_schedule, Schedule};
use crate::model::activity::{
    Activity, ActivityId, ActivityValidationError, DependencyType, MAX_DURATION_DAYS,
};
use crate::model::timeline::{BarGeometry, TimeScale, TimelineUnit};
use crate::repo::activity_repo::{ActivityRepository, StoreError};
use crate::settings::{SettingsError, TimelineSettings};
use chrono::NaiveDate;
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static ACTIVITY_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?P<name>[^:]*?)\s*:\s*(?P<days>\d+)\s*(?::\s*(?P<dep>[A-Za-z]+)\s*)?$")
        .expect("valid activity line regex")
});

/// Service error for plan editing use-cases.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanServiceError {
    /// Name is blank after trim.
    InvalidName,
    /// Duration is below one day.
    InvalidDuration,
    /// Duration exceeds `MAX_DURATION_DAYS`.
    DurationTooLong(u32),
    /// The edit would stretch the plan past `MAX_DURATION_DAYS`.
    PlanTooLong(u32),
    /// Plan line does not match `<name>:<days>[:FS|SS]`.
    InvalidLine(String),
    /// Dependency code is neither FS nor SS.
    InvalidDependency(String),
    /// Target activity is not in the sequence.
    ActivityNotFound(ActivityId),
    /// Settings failed validation.
    Settings(SettingsError),
    /// Store-level failure.
    Store(StoreError),
}

impl Display for PlanServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName => write!(f, "activity name must not be blank"),
            Self::InvalidDuration => write!(f, "activity duration must be at least 1 day"),
            Self::DurationTooLong(days) => write!(
                f,
                "activity duration {days} exceeds the {MAX_DURATION_DAYS}-day limit"
            ),
            Self::PlanTooLong(days) => write!(
                f,
                "plan would span {days} days; the limit is {MAX_DURATION_DAYS}"
            ),
            Self::InvalidLine(line) => write!(
                f,
                "invalid activity line `{line}`; expected <name>:<days>[:FS|SS]"
            ),
            Self::InvalidDependency(value) => {
                write!(f, "unknown dependency type `{value}`; expected FS|SS")
            }
            Self::ActivityNotFound(id) => write!(f, "activity not found: {id}"),
            Self::Settings(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PlanServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Settings(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for PlanServiceError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(id) => Self::ActivityNotFound(id),
            StoreError::Validation(err) => err.into(),
            other => Self::Store(other),
        }
    }
}

impl From<ActivityValidationError> for PlanServiceError {
    fn from(value: ActivityValidationError) -> Self {
        match value {
            ActivityValidationError::BlankName => Self::InvalidName,
            ActivityValidationError::ZeroDuration => Self::InvalidDuration,
            ActivityValidationError::DurationTooLong(days) => Self::DurationTooLong(days),
            ActivityValidationError::UnknownDependency(code) => Self::InvalidDependency(code),
            other => Self::Store(StoreError::Validation(other)),
        }
    }
}

impl From<SettingsError> for PlanServiceError {
    fn from(value: SettingsError) -> Self {
        Self::Settings(value)
    }
}

/// Full replacement values for an edited activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEdit {
    pub name: String,
    pub duration: u32,
    pub dependency: DependencyType,
}

/// One positioned bar in a computed layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityBar {
    pub id: ActivityId,
    pub name: String,
    pub duration: u32,
    pub dependency: DependencyType,
    pub start_offset: u32,
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
    pub geometry: BarGeometry,
    /// e.g. `1 Jan 2024 - 5 Jan 2024`.
    pub date_range_label: String,
    /// Whether the bar is wide enough to carry its date range inline.
    pub shows_inline_label: bool,
}

/// Everything a renderer needs for one frame of the timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineLayout {
    pub project_start: NaiveDate,
    pub scale: TimeScale,
    pub unit_width_px: f64,
    pub total_duration: u32,
    pub timeline_width_px: f64,
    pub units: Vec<TimelineUnit>,
    pub bars: Vec<ActivityBar>,
    /// `None` while the plan is empty.
    pub project_range: Option<String>,
}

/// Plan editing facade over an activity store.
pub struct PlanService<R: ActivityRepository> {
    repo: R,
    project_start: NaiveDate,
    scale: TimeScale,
    unit_width_px: f64,
    settings: TimelineSettings,
}

impl<R: ActivityRepository> PlanService<R> {
    /// Creates a service with default settings on the day scale.
    pub fn new(repo: R, project_start: NaiveDate) -> Self {
        let settings = TimelineSettings::default();
        Self {
            repo,
            project_start,
            scale: TimeScale::Days,
            unit_width_px: settings.default_unit_width(TimeScale::Days),
            settings,
        }
    }

    /// Creates a service with caller-provided settings.
    pub fn with_settings(
        repo: R,
        project_start: NaiveDate,
        settings: TimelineSettings,
    ) -> Result<Self, PlanServiceError> {
        settings.validate()?;
        Ok(Self {
            repo,
            project_start,
            scale: TimeScale::Days,
            unit_width_px: settings.default_unit_width(TimeScale::Days),
            settings,
        })
    }

    pub fn project_start(&self) -> NaiveDate {
        self.project_start
    }

    pub fn scale(&self) -> TimeScale {
        self.scale
    }

    pub fn unit_width_px(&self) -> f64 {
        self.unit_width_px
    }

    pub fn settings(&self) -> &TimelineSettings {
        &self.settings
    }

    pub fn activities(&self) -> &[Activity] {
        self.repo.list()
    }

    /// Appends a finish-to-start activity.
    pub fn add_activity(
        &mut self,
        name: impl Into<String>,
        duration: u32,
    ) -> Result<Activity, PlanServiceError> {
        self.add_activity_with_dependency(name, duration, DependencyType::FinishToStart)
    }

    /// Appends an activity with an explicit dependency type.
    pub fn add_activity_with_dependency(
        &mut self,
        name: impl Into<String>,
        duration: u32,
        dependency: DependencyType,
    ) -> Result<Activity, PlanServiceError> {
        let activity = Activity::with_id(Uuid::new_v4(), name, duration, dependency)?;
        self.ensure_plan_span(|candidate| candidate.push(activity.clone()))?;
        self.repo.insert(activity.clone())?;
        Ok(activity)
    }

    /// Appends an activity parsed from a `<name>:<days>[:FS|SS]` line.
    pub fn add_activity_line(&mut self, line: &str) -> Result<Activity, PlanServiceError> {
        let (name, duration, dependency) = parse_activity_line(line)?;
        self.add_activity_with_dependency(name, duration, dependency)
    }

    /// Replaces name, duration, and dependency of one activity in place.
    pub fn update_activity(
        &mut self,
        id: ActivityId,
        edit: ActivityEdit,
    ) -> Result<Activity, PlanServiceError> {
        let index = self
            .repo
            .position(id)
            .ok_or(PlanServiceError::ActivityNotFound(id))?;
        let updated = Activity::with_id(id, edit.name, edit.duration, edit.dependency)?;
        self.ensure_plan_span(|candidate| candidate[index] = updated.clone())?;
        self.repo.update(updated.clone())?;
        Ok(updated)
    }

    /// Removes one activity; its follower re-chains onto the previous one.
    pub fn remove_activity(&mut self, id: ActivityId) -> Result<Activity, PlanServiceError> {
        let index = self
            .repo
            .position(id)
            .ok_or(PlanServiceError::ActivityNotFound(id))?;
        self.ensure_plan_span(|candidate| {
            candidate.remove(index);
        })?;
        self.repo.remove(id).map_err(Into::into)
    }

    /// Moves one activity to `target_index`; returns its final index.
    pub fn move_activity(
        &mut self,
        id: ActivityId,
        target_index: usize,
    ) -> Result<usize, PlanServiceError> {
        let current = self
            .repo
            .position(id)
            .ok_or(PlanServiceError::ActivityNotFound(id))?;
        if current == target_index {
            return Ok(current);
        }
        self.ensure_plan_span(|candidate| {
            let moved = candidate.remove(current);
            let target = target_index.min(candidate.len());
            candidate.insert(target, moved);
        })?;
        self.repo.move_to(id, target_index).map_err(Into::into)
    }

    /// Rejects a sequence edit whose schedule would exceed `MAX_DURATION_DAYS`.
    ///
    /// Removing or reordering can lengthen the plan as well, since followers
    /// re-chain onto a different predecessor.
    fn ensure_plan_span<F>(&self, edit: F) -> Result<(), PlanServiceError>
    where
        F: FnOnce(&mut Vec<Activity>),
    {
        let mut candidate = self.repo.list().to_vec();
        edit(&mut candidate);
        let total = compute_schedule(&candidate).total_duration;
        if total > MAX_DURATION_DAYS {
            warn!(
                "event=plan_span_rejected module=plan status=error total_days={} max_days={}",
                total, MAX_DURATION_DAYS
            );
            return Err(PlanServiceError::PlanTooLong(total));
        }
        Ok(())
    }

    pub fn set_project_start(&mut self, project_start: NaiveDate) {
        self.project_start = project_start;
    }

    /// Switches scale and resets zoom to the scale default.
    pub fn set_scale(&mut self, scale: TimeScale) {
        self.scale = scale;
        self.unit_width_px = self.settings.default_unit_width(scale);
    }

    /// Applies a zoom level, clamped to the slider range.
    pub fn set_unit_width(&mut self, unit_width_px: f64) -> f64 {
        self.unit_width_px = self.settings.clamp_zoom(unit_width_px);
        self.unit_width_px
    }

    /// Switches to the scale suggested for the current total duration.
    pub fn auto_scale(&mut self) -> TimeScale {
        let total = self.schedule().total_duration;
        let suggested = suggest_scale(total);
        info!(
            "event=auto_scale module=plan status=ok total_days={} scale={}",
            total, suggested
        );
        self.set_scale(suggested);
        suggested
    }

    /// Sizes units so the whole axis fits `container_width_px`.
    ///
    /// Returns the applied width, or `None` when the zoom was left unchanged.
    pub fn fit_to_width(&mut self, container_width_px: f64) -> Option<f64> {
        if self.repo.is_empty() || !container_width_px.is_finite() {
            return None;
        }
        let unit_count = self.axis().unit_count();
        let fitted = self
            .settings
            .fit_unit_width(container_width_px, unit_count)?;
        self.unit_width_px = fitted;
        Some(fitted)
    }

    pub fn schedule(&self) -> Schedule {
        compute_schedule(self.repo.list())
    }

    pub fn axis(&self) -> TimelineAxis {
        TimelineAxis::generate(
            self.scale,
            self.schedule().total_duration,
            self.project_start,
        )
    }

    /// Computes the full layout for the current sequence and view state.
    pub fn layout(&self) -> TimelineLayout {
        let activities = self.repo.list();
        let schedule = compute_schedule(activities);
        let axis = TimelineAxis::generate(self.scale, schedule.total_duration, self.project_start);

        let bars = activities
            .iter()
            .zip(&schedule.start_offsets)
            .map(|(activity, &start_offset)| {
                let geometry =
                    axis.bar_geometry(start_offset, activity.duration, self.unit_width_px);
                let (first_day, last_day) =
                    activity_date_range(self.project_start, start_offset, activity.duration);
                ActivityBar {
                    id: activity.id,
                    name: activity.name.clone(),
                    duration: activity.duration,
                    dependency: activity.dependency,
                    start_offset,
                    first_day,
                    last_day,
                    geometry,
                    date_range_label: activity_range_label(
                        self.project_start,
                        start_offset,
                        activity.duration,
                    ),
                    shows_inline_label: geometry.width_px
                        > self.settings.inline_label_min_width_px,
                }
            })
            .collect::<Vec<_>>();

        debug!(
            "event=layout module=plan status=ok activities={} total_days={} scale={} units={}",
            bars.len(),
            schedule.total_duration,
            self.scale,
            axis.unit_count()
        );

        TimelineLayout {
            project_start: self.project_start,
            scale: self.scale,
            unit_width_px: self.unit_width_px,
            total_duration: schedule.total_duration,
            timeline_width_px: axis.width_px(self.unit_width_px),
            project_range: project_range_label(self.project_start, schedule.total_duration),
            units: axis.units,
            bars,
        }
    }
}

/// Parses one `<name>:<days>[:FS|SS]` plan line.
pub fn parse_activity_line(
    line: &str,
) -> Result<(String, u32, DependencyType), PlanServiceError> {
    let captures = ACTIVITY_LINE_RE
        .captures(line)
        .ok_or_else(|| PlanServiceError::InvalidLine(line.trim().to_string()))?;

    let name = captures["name"].trim();
    if name.is_empty() {
        return Err(PlanServiceError::InvalidName);
    }
    let duration = captures["days"]
        .parse::<u32>()
        .map_err(|_| PlanServiceError::InvalidLine(line.trim().to_string()))?;
    if duration == 0 {
        return Err(PlanServiceError::InvalidDuration);
    }
    let dependency = match captures.name("dep") {
        Some(code) => code.as_str().parse::<DependencyType>()?,
        None => DependencyType::FinishToStart,
    };

    Ok((name.to_string(), duration, dependency))
}
