//! Calendar arithmetic and date labels used by the layout engine.
//!
//! Offsets are whole days. Arithmetic saturates at the `NaiveDate` range
//! limits so layout functions stay total.

use chrono::{Datelike, Months, NaiveDate, TimeDelta, Weekday};

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Returns `date` shifted by `days`, saturating at the calendar limits.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(TimeDelta::days(days))
        .unwrap_or(if days < 0 {
            NaiveDate::MIN
        } else {
            NaiveDate::MAX
        })
}

/// First day of the month containing `date`.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First day of the month `months` after the month containing `date`.
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    first_of_month(date)
        .checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

/// Last day of the month containing `date`.
pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    let next = add_months(date, 1);
    if next == NaiveDate::MAX {
        return next;
    }
    next.pred_opt().unwrap_or(date)
}

/// Number of days (28..=31) in the month containing `date`.
pub fn days_in_month(date: NaiveDate) -> u32 {
    last_of_month(date).day()
}

/// Calendar-month difference between two dates, ignoring the day of month.
pub fn month_span(start: NaiveDate, end: NaiveDate) -> i64 {
    i64::from(end.year() - start.year()) * 12 + i64::from(end.month0()) - i64::from(start.month0())
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// English three-letter month name, e.g. `Jan`.
pub fn month_abbreviation(date: NaiveDate) -> &'static str {
    MONTH_ABBREVIATIONS[date.month0() as usize]
}

/// Day and month, e.g. `5 Jan`.
pub fn format_day_month(date: NaiveDate) -> String {
    format!("{} {}", date.day(), month_abbreviation(date))
}

/// Day, month and year, e.g. `5 Jan 2024`.
pub fn format_date(date: NaiveDate) -> String {
    format!("{} {}", format_day_month(date), date.year())
}
