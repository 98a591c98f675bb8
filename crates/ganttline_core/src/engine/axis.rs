//! Timeline axis generation.
//!
//! # Responsibility
//! - Partition the project span into day, week, or calendar-month units.
//! - Label and classify each unit for header and grid rendering.
//!
//! # Invariants
//! - At least `TimeScale::min_units()` units are produced, even for an
//!   empty plan.
//! - Output depends only on the arguments.
//! - Week units are offset from the project start, not aligned to
//!   calendar weeks.

use super::calendar::{
    add_days, add_months, days_in_month, format_day_month, is_weekend, month_abbreviation,
    month_span,
};
use super::geometry::bar_geometry;
use super::DAYS_PER_WEEK;
use crate::model::timeline::{BarGeometry, TimeScale, TimelineUnit};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Generated axis together with the inputs needed to place bars on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineAxis {
    pub scale: TimeScale,
    pub project_start: NaiveDate,
    pub units: Vec<TimelineUnit>,
}

impl TimelineAxis {
    /// Generates the axis for `scale` covering `total_duration` days.
    pub fn generate(scale: TimeScale, total_duration: u32, project_start: NaiveDate) -> Self {
        Self {
            scale,
            project_start,
            units: generate_units(scale, total_duration, project_start),
        }
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// Full scrollable width of the timeline at `unit_width_px`.
    pub fn width_px(&self, unit_width_px: f64) -> f64 {
        self.units.len() as f64 * unit_width_px
    }

    pub fn bar_geometry(&self, start_offset: u32, duration: u32, unit_width_px: f64) -> BarGeometry {
        bar_geometry(
            start_offset,
            duration,
            self.scale,
            &self.units,
            unit_width_px,
            self.project_start,
        )
    }
}

/// Produces the ordered axis units for one scale.
pub fn generate_units(
    scale: TimeScale,
    total_duration: u32,
    project_start: NaiveDate,
) -> Vec<TimelineUnit> {
    match scale {
        TimeScale::Days => day_units(total_duration, project_start),
        TimeScale::Weeks => week_units(total_duration, project_start),
        TimeScale::Months => month_units(total_duration, project_start),
    }
}

fn day_units(total_duration: u32, project_start: NaiveDate) -> Vec<TimelineUnit> {
    let count = (total_duration as usize).max(TimeScale::Days.min_units());
    (0..count)
        .map(|index| {
            let date = add_days(project_start, index as i64);
            TimelineUnit {
                anchor_date: date,
                label: date.day().to_string(),
                sub_label: month_abbreviation(date).to_string(),
                is_weekend: is_weekend(date),
                is_first_of_period: date.day() == 1,
                days_in_month: None,
            }
        })
        .collect()
}

fn week_units(total_duration: u32, project_start: NaiveDate) -> Vec<TimelineUnit> {
    let weeks = total_duration.div_ceil(DAYS_PER_WEEK) as usize;
    let count = weeks.max(TimeScale::Weeks.min_units());
    (0..count)
        .map(|index| {
            let week_start = add_days(project_start, index as i64 * i64::from(DAYS_PER_WEEK));
            let week_before = add_days(week_start, -i64::from(DAYS_PER_WEEK));
            TimelineUnit {
                anchor_date: week_start,
                label: format!("W{}", index + 1),
                sub_label: format_day_month(week_start),
                is_weekend: false,
                is_first_of_period: week_start.month() != week_before.month(),
                days_in_month: None,
            }
        })
        .collect()
}

fn month_units(total_duration: u32, project_start: NaiveDate) -> Vec<TimelineUnit> {
    let end_date = add_days(project_start, i64::from(total_duration));
    let span = usize::try_from(month_span(project_start, end_date) + 1).unwrap_or(0);
    let count = span.max(TimeScale::Months.min_units());
    (0..count)
        .map(|index| {
            let month_start = add_months(project_start, index as u32);
            TimelineUnit {
                anchor_date: month_start,
                label: month_abbreviation(month_start).to_string(),
                sub_label: format!("{:04}", month_start.year()),
                is_weekend: false,
                is_first_of_period: month_start.month() == 1,
                days_in_month: Some(days_in_month(month_start)),
            }
        })
        .collect()
}
