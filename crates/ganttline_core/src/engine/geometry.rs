//! Bar geometry mapping.
//!
//! # Responsibility
//! - Place an activity's day span on the pixel axis for the active scale.
//!
//! # Invariants
//! - Every bar keeps a `BAR_INSET_PX` inset on both sides of its span.
//! - `width_px >= MIN_BAR_WIDTH_PX` for every input.
//! - On the month scale, per-month pieces tile across month boundaries with
//!   no gap or overlap, so bar width tracks elapsed days in unequal months.

use super::calendar::{add_days, days_in_month, last_of_month};
use super::DAYS_PER_WEEK;
use crate::model::timeline::{BarGeometry, TimeScale, TimelineUnit};
use chrono::{Datelike, NaiveDate};
use std::ops::ControlFlow;

/// Visual gap between a bar and the edge of its span, per side.
pub const BAR_INSET_PX: f64 = 2.0;
/// Floor that keeps very short bars visible.
pub const MIN_BAR_WIDTH_PX: f64 = 4.0;

/// Maps one activity span onto the timeline.
///
/// `units` and `project_start` are only consulted on the month scale, where
/// offsets are converted to calendar dates and walked month by month.
pub fn bar_geometry(
    start_offset: u32,
    duration: u32,
    scale: TimeScale,
    units: &[TimelineUnit],
    unit_width_px: f64,
    project_start: NaiveDate,
) -> BarGeometry {
    match scale {
        TimeScale::Days => linear_geometry(
            f64::from(start_offset),
            f64::from(duration),
            unit_width_px,
        ),
        TimeScale::Weeks => {
            let days_per_week = f64::from(DAYS_PER_WEEK);
            linear_geometry(
                f64::from(start_offset) / days_per_week,
                f64::from(duration) / days_per_week,
                unit_width_px,
            )
        }
        TimeScale::Months => {
            let span = ActivitySpan::resolve(project_start, start_offset, duration);
            let (left, width) = walk_months(span, units, unit_width_px);
            inset(left, width)
        }
    }
}

fn linear_geometry(start_units: f64, length_units: f64, unit_width_px: f64) -> BarGeometry {
    inset(start_units * unit_width_px, length_units * unit_width_px)
}

fn inset(left: f64, width: f64) -> BarGeometry {
    BarGeometry {
        left_px: left + BAR_INSET_PX,
        width_px: (width - 2.0 * BAR_INSET_PX).max(MIN_BAR_WIDTH_PX),
    }
}

/// First and last calendar day occupied by an activity (both inclusive).
#[derive(Debug, Clone, Copy)]
struct ActivitySpan {
    first_day: NaiveDate,
    last_day: NaiveDate,
}

impl ActivitySpan {
    fn resolve(project_start: NaiveDate, start_offset: u32, duration: u32) -> Self {
        let start = i64::from(start_offset);
        Self {
            first_day: add_days(project_start, start),
            last_day: add_days(project_start, start + i64::from(duration) - 1),
        }
    }
}

/// Running state of the month walk.
#[derive(Debug, Clone, Copy)]
enum MonthWalk {
    BeforeStart,
    Spanning { left: f64, width: f64 },
}

impl MonthWalk {
    fn into_parts(self) -> (f64, f64) {
        match self {
            Self::BeforeStart => (0.0, 0.0),
            Self::Spanning { left, width } => (left, width),
        }
    }
}

/// Folds the month units into the unpadded `(left, width)` of the span.
fn walk_months(span: ActivitySpan, units: &[TimelineUnit], unit_width_px: f64) -> (f64, f64) {
    let walked = units
        .iter()
        .enumerate()
        .try_fold(MonthWalk::BeforeStart, |walk, (index, unit)| {
            step_month(walk, span, index, unit, unit_width_px)
        });

    match walked {
        ControlFlow::Continue(walk) | ControlFlow::Break(walk) => walk.into_parts(),
    }
}

fn step_month(
    walk: MonthWalk,
    span: ActivitySpan,
    index: usize,
    unit: &TimelineUnit,
    unit_width_px: f64,
) -> ControlFlow<MonthWalk, MonthWalk> {
    let month_start = unit.anchor_date;
    let month_end = last_of_month(month_start);
    let month_days = f64::from(
        unit.days_in_month
            .unwrap_or_else(|| days_in_month(month_start)),
    );
    let starts_here = span.first_day >= month_start && span.first_day <= month_end;
    // 0-based day of the activity start within this month.
    let start_day = if starts_here {
        f64::from(span.first_day.day() - 1)
    } else {
        0.0
    };

    let (left, width) = match walk {
        MonthWalk::Spanning { left, width } => (left, width),
        MonthWalk::BeforeStart if span.first_day <= month_end => {
            let left = index as f64 * unit_width_px + start_day / month_days * unit_width_px;
            (left, 0.0)
        }
        MonthWalk::BeforeStart => return ControlFlow::Continue(walk),
    };

    if span.last_day <= month_end {
        let end_day = if span.last_day >= month_start {
            f64::from(span.last_day.day())
        } else {
            0.0
        };
        let width = if span.first_day >= month_start {
            (end_day - start_day) / month_days * unit_width_px
        } else {
            width + end_day / month_days * unit_width_px
        };
        return ControlFlow::Break(MonthWalk::Spanning { left, width });
    }

    let piece = if starts_here {
        (month_days - start_day) / month_days * unit_width_px
    } else {
        unit_width_px
    };
    ControlFlow::Continue(MonthWalk::Spanning {
        left,
        width: width + piece,
    })
}
