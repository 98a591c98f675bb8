use chrono::{Datelike, NaiveDate, Weekday};
use ganttline_core::{generate_units, TimeScale, TimelineAxis};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn empty_plan_still_gets_minimum_axis() {
    let start = date(2024, 6, 10);
    assert_eq!(generate_units(TimeScale::Days, 0, start).len(), 14);
    assert_eq!(generate_units(TimeScale::Weeks, 0, start).len(), 4);
    assert_eq!(generate_units(TimeScale::Months, 0, start).len(), 3);
}

#[test]
fn short_plan_on_day_scale_uses_floor() {
    let units = generate_units(TimeScale::Days, 5, date(2024, 1, 1));
    assert_eq!(units.len(), 14);
}

#[test]
fn long_plan_on_day_scale_has_one_unit_per_day() {
    let units = generate_units(TimeScale::Days, 40, date(2024, 1, 25));
    assert_eq!(units.len(), 40);
    assert_eq!(units[7].anchor_date, date(2024, 2, 1));
    assert_eq!(units[7].label, "1");
    assert_eq!(units[7].sub_label, "Feb");
    assert!(units[7].is_first_of_period);
    assert!(!units[6].is_first_of_period);
}

#[test]
fn day_units_flag_weekends_only() {
    let units = generate_units(TimeScale::Days, 21, date(2024, 3, 4));
    for unit in &units {
        let weekend = matches!(unit.anchor_date.weekday(), Weekday::Sat | Weekday::Sun);
        assert_eq!(unit.is_weekend, weekend, "{}", unit.anchor_date);
        assert_eq!(unit.days_in_month, None);
    }
    assert!(units[5].is_weekend);
    assert!(units[6].is_weekend);
}

#[test]
fn week_and_month_units_are_never_weekends() {
    let start = date(2024, 3, 2);
    let weeks = generate_units(TimeScale::Weeks, 90, start);
    let months = generate_units(TimeScale::Months, 90, start);
    assert!(weeks.iter().all(|unit| !unit.is_weekend));
    assert!(months.iter().all(|unit| !unit.is_weekend));
}

#[test]
fn week_units_are_offset_from_project_start() {
    let units = generate_units(TimeScale::Weeks, 20, date(2024, 1, 24));
    let summary: Vec<_> = units
        .iter()
        .map(|unit| {
            (
                unit.label.as_str(),
                unit.sub_label.as_str(),
                unit.is_first_of_period,
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            ("W1", "24 Jan", false),
            ("W2", "31 Jan", false),
            ("W3", "7 Feb", true),
            ("W4", "14 Feb", false),
        ]
    );
}

#[test]
fn month_scale_mid_month_start_uses_floor_and_leap_february() {
    let units = generate_units(TimeScale::Months, 20, date(2024, 1, 15));
    assert_eq!(units.len(), 3);

    assert_eq!(units[0].anchor_date, date(2024, 1, 1));
    assert_eq!(units[0].label, "Jan");
    assert_eq!(units[0].sub_label, "2024");
    assert_eq!(units[0].days_in_month, Some(31));
    assert!(units[0].is_first_of_period);

    assert_eq!(units[1].label, "Feb");
    assert_eq!(units[1].days_in_month, Some(29));
    assert!(!units[1].is_first_of_period);

    assert_eq!(units[2].label, "Mar");
    assert_eq!(units[2].days_in_month, Some(31));
}

#[test]
fn month_count_grows_with_calendar_span() {
    // 2024-01-31 + 400 days lands in March 2025.
    let units = generate_units(TimeScale::Months, 400, date(2024, 1, 31));
    assert_eq!(units.len(), 15);
    assert_eq!(units[12].label, "Jan");
    assert_eq!(units[12].sub_label, "2025");
    assert!(units[12].is_first_of_period);
}

#[test]
fn axis_width_scales_with_unit_count() {
    let axis = TimelineAxis::generate(TimeScale::Weeks, 30, date(2024, 1, 1));
    assert_eq!(axis.unit_count(), 5);
    assert_eq!(axis.width_px(60.0), 300.0);
}

#[test]
fn generation_is_deterministic() {
    for scale in TimeScale::ALL {
        let start = date(2023, 12, 20);
        assert_eq!(
            generate_units(scale, 77, start),
            generate_units(scale, 77, start)
        );
    }
}
