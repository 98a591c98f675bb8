//! Scale suggestion and human-readable date ranges.

use super::calendar::{add_days, format_date};
use crate::model::timeline::TimeScale;
use chrono::NaiveDate;

const DAYS_SCALE_MAX_DURATION: u32 = 60;
const WEEKS_SCALE_MAX_DURATION: u32 = 180;

/// Picks the coarsest scale that still reads well for `total_duration` days.
pub fn suggest_scale(total_duration: u32) -> TimeScale {
    if total_duration <= DAYS_SCALE_MAX_DURATION {
        TimeScale::Days
    } else if total_duration <= WEEKS_SCALE_MAX_DURATION {
        TimeScale::Weeks
    } else {
        TimeScale::Months
    }
}

/// First and last calendar day of an activity (both inclusive).
pub fn activity_date_range(
    project_start: NaiveDate,
    start_offset: u32,
    duration: u32,
) -> (NaiveDate, NaiveDate) {
    let first = add_days(project_start, i64::from(start_offset));
    let last = add_days(first, i64::from(duration) - 1);
    (first, last)
}

/// `"1 Jan 2024 - 5 Jan 2024"` style range for one activity.
pub fn activity_range_label(project_start: NaiveDate, start_offset: u32, duration: u32) -> String {
    let (first, last) = activity_date_range(project_start, start_offset, duration);
    format!("{} - {}", format_date(first), format_date(last))
}

/// Whole-project range, e.g. `"1 Jan 2024 → 5 Jan 2024 (5 days)"`.
///
/// Returns `None` for an empty plan.
pub fn project_range_label(project_start: NaiveDate, total_duration: u32) -> Option<String> {
    if total_duration == 0 {
        return None;
    }
    let last = add_days(project_start, i64::from(total_duration) - 1);
    Some(format!(
        "{} → {} ({} days)",
        format_date(project_start),
        format_date(last),
        total_duration
    ))
}
