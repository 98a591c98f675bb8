use chrono::NaiveDate;
use ganttline_core::{
    ActivityEdit, DependencyType, InMemoryActivityRepository, PlanService, PlanServiceError,
    TimeScale, TimelineSettings, MAX_DURATION_DAYS,
};
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn service() -> PlanService<InMemoryActivityRepository> {
    PlanService::new(InMemoryActivityRepository::new(), date(2024, 1, 1))
}

#[test]
fn add_activity_validates_user_input() {
    let mut service = service();

    assert_eq!(
        service.add_activity("  ", 3).unwrap_err(),
        PlanServiceError::InvalidName
    );
    assert_eq!(
        service.add_activity("Design", 0).unwrap_err(),
        PlanServiceError::InvalidDuration
    );
    assert!(service.activities().is_empty());

    let added = service.add_activity("  Design ", 3).unwrap();
    assert_eq!(added.name, "Design");
    assert_eq!(added.dependency, DependencyType::FinishToStart);
    assert_eq!(service.activities().len(), 1);
}

#[test]
fn update_activity_keeps_identity_and_position() {
    let mut service = service();
    let first = service.add_activity("Design", 5).unwrap();
    let second = service.add_activity("Build", 3).unwrap();

    let updated = service
        .update_activity(
            second.id,
            ActivityEdit {
                name: "Build frame".to_string(),
                duration: 4,
                dependency: DependencyType::StartToStart,
            },
        )
        .unwrap();
    assert_eq!(updated.id, second.id);

    let ids: Vec<_> = service.activities().iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
    assert_eq!(service.schedule().start_offsets, vec![0, 0]);
    assert_eq!(service.schedule().total_duration, 5);
}

#[test]
fn update_and_remove_unknown_activity_report_not_found() {
    let mut service = service();
    let missing = Uuid::new_v4();

    let err = service
        .update_activity(
            missing,
            ActivityEdit {
                name: "Ghost".to_string(),
                duration: 1,
                dependency: DependencyType::FinishToStart,
            },
        )
        .unwrap_err();
    assert_eq!(err, PlanServiceError::ActivityNotFound(missing));
    assert_eq!(
        service.remove_activity(missing).unwrap_err(),
        PlanServiceError::ActivityNotFound(missing)
    );
    assert_eq!(
        service.move_activity(missing, 0).unwrap_err(),
        PlanServiceError::ActivityNotFound(missing)
    );
}

#[test]
fn move_activity_reorders_and_reschedules() {
    let mut service = service();
    let a = service.add_activity("A", 2).unwrap();
    let b = service.add_activity("B", 5).unwrap();
    let c = service.add_activity("C", 1).unwrap();
    assert_eq!(service.schedule().start_offsets, vec![0, 2, 7]);

    assert_eq!(service.move_activity(c.id, 0).unwrap(), 0);
    let ids: Vec<_> = service.activities().iter().map(|x| x.id).collect();
    assert_eq!(ids, vec![c.id, a.id, b.id]);
    assert_eq!(service.schedule().start_offsets, vec![0, 1, 3]);

    assert_eq!(service.move_activity(c.id, 0).unwrap(), 0);
}

#[test]
fn remove_activity_shifts_followers() {
    let mut service = service();
    let a = service.add_activity("A", 2).unwrap();
    service.add_activity("B", 5).unwrap();

    let removed = service.remove_activity(a.id).unwrap();
    assert_eq!(removed.id, a.id);
    assert_eq!(service.schedule().start_offsets, vec![0]);
    assert_eq!(service.schedule().total_duration, 5);
}

#[test]
fn add_activity_line_parses_dependency() {
    let mut service = service();
    service.add_activity_line("Excavate:4").unwrap();
    let survey = service.add_activity_line("Survey : 2 : SS").unwrap();
    assert_eq!(survey.dependency, DependencyType::StartToStart);
    assert_eq!(service.schedule().start_offsets, vec![0, 0]);

    let err = service.add_activity_line("Excavate").unwrap_err();
    assert_eq!(err, PlanServiceError::InvalidLine("Excavate".to_string()));
}

#[test]
fn scale_switch_resets_zoom_and_zoom_is_clamped() {
    let mut service = service();
    assert_eq!(service.unit_width_px(), 36.0);

    service.set_scale(TimeScale::Weeks);
    assert_eq!(service.unit_width_px(), 60.0);
    service.set_scale(TimeScale::Months);
    assert_eq!(service.unit_width_px(), 80.0);

    assert_eq!(service.set_unit_width(500.0), 100.0);
    assert_eq!(service.set_unit_width(1.0), 20.0);
}

#[test]
fn auto_scale_follows_total_duration() {
    let mut service = service();
    service.add_activity("Phase 1", 50).unwrap();
    assert_eq!(service.auto_scale(), TimeScale::Days);

    service.add_activity("Phase 2", 50).unwrap();
    assert_eq!(service.auto_scale(), TimeScale::Weeks);
    assert_eq!(service.unit_width_px(), 60.0);

    service.add_activity("Phase 3", 100).unwrap();
    assert_eq!(service.auto_scale(), TimeScale::Months);
    assert_eq!(service.unit_width_px(), 80.0);
}

#[test]
fn fit_to_width_uses_axis_unit_count() {
    let mut service = service();
    assert_eq!(service.fit_to_width(800.0), None);

    service.add_activity("Build", 30).unwrap();
    assert_eq!(service.fit_to_width(920.0), Some(30.0));
    assert_eq!(service.unit_width_px(), 30.0);

    assert_eq!(service.fit_to_width(100.0), Some(20.0));
}

#[test]
fn layout_combines_schedule_axis_and_geometry() {
    let mut service = service();
    service.add_activity("Design", 5).unwrap();
    service
        .add_activity_with_dependency("Review", 3, DependencyType::StartToStart)
        .unwrap();
    service.add_activity("Build", 4).unwrap();

    let layout = service.layout();
    assert_eq!(layout.total_duration, 7);
    assert_eq!(layout.units.len(), 14);
    assert_eq!(layout.timeline_width_px, 14.0 * 36.0);
    assert_eq!(
        layout.project_range.as_deref(),
        Some("1 Jan 2024 → 7 Jan 2024 (7 days)")
    );

    let starts: Vec<_> = layout.bars.iter().map(|bar| bar.start_offset).collect();
    assert_eq!(starts, vec![0, 0, 3]);

    let build = &layout.bars[2];
    assert_eq!(build.first_day, date(2024, 1, 4));
    assert_eq!(build.last_day, date(2024, 1, 7));
    assert_eq!(build.date_range_label, "4 Jan 2024 - 7 Jan 2024");
    assert_eq!(build.geometry.left_px, 3.0 * 36.0 + 2.0);
    assert_eq!(build.geometry.width_px, 4.0 * 36.0 - 4.0);
    assert!(build.shows_inline_label);
    assert!(!layout.bars[1].shows_inline_label);
}

#[test]
fn empty_plan_layout_still_has_axis() {
    let service = service();
    let layout = service.layout();
    assert!(layout.bars.is_empty());
    assert_eq!(layout.total_duration, 0);
    assert_eq!(layout.units.len(), 14);
    assert_eq!(layout.project_range, None);
}

#[test]
fn project_start_change_moves_month_bars() {
    let mut service = service();
    service.add_activity("Pour", 31).unwrap();
    service.set_scale(TimeScale::Months);

    let aligned = service.layout();
    assert_eq!(aligned.bars[0].geometry.left_px, 2.0);
    assert_eq!(aligned.bars[0].geometry.width_px, 76.0);

    service.set_project_start(date(2024, 1, 17));
    let shifted = service.layout();
    let expected_left = 16.0 / 31.0 * 80.0 + 2.0;
    assert!((shifted.bars[0].geometry.left_px - expected_left).abs() < 1e-9);
}

#[test]
fn layout_serializes_for_renderers() {
    let mut service = service();
    service.add_activity("Design", 2).unwrap();
    let json = serde_json::to_value(service.layout()).unwrap();

    assert_eq!(json["scale"], "days");
    assert_eq!(json["project_start"], "2024-01-01");
    assert_eq!(json["units"][0]["anchor_date"], "2024-01-01");
    assert_eq!(json["bars"][0]["dependency"], "FS");
    assert_eq!(json["bars"][0]["geometry"]["left_px"], 2.0);
}

#[test]
fn with_settings_rejects_invalid_settings() {
    let settings = TimelineSettings {
        days_unit_width_px: 0.0,
        ..TimelineSettings::default()
    };
    let err = PlanService::with_settings(
        InMemoryActivityRepository::new(),
        date(2024, 1, 1),
        settings,
    )
    .err()
    .unwrap();
    assert!(matches!(err, PlanServiceError::Settings(_)));
}

#[test]
fn oversized_activity_duration_is_rejected() {
    let mut service = service();
    assert_eq!(
        service.add_activity("Huge", u32::MAX).unwrap_err(),
        PlanServiceError::DurationTooLong(u32::MAX)
    );
    assert_eq!(
        service.add_activity_line("Big:4000000000").unwrap_err(),
        PlanServiceError::DurationTooLong(4_000_000_000)
    );
    assert!(service.add_activity("Century", MAX_DURATION_DAYS).is_ok());
}

#[test]
fn edits_that_overrun_the_plan_limit_are_rejected() {
    let mut service = service();
    service.add_activity("Survey", 30_000).unwrap();
    assert_eq!(
        service.add_activity("Extension", 10_000).unwrap_err(),
        PlanServiceError::PlanTooLong(40_000)
    );
    assert_eq!(service.activities().len(), 1);

    let follower = service
        .add_activity_with_dependency("Follower", 5_000, DependencyType::StartToStart)
        .unwrap();
    let err = service
        .update_activity(
            follower.id,
            ActivityEdit {
                name: "Follower".to_string(),
                duration: 7_000,
                dependency: DependencyType::FinishToStart,
            },
        )
        .unwrap_err();
    assert_eq!(err, PlanServiceError::PlanTooLong(37_000));
    assert_eq!(service.activities()[1], follower);
    assert_eq!(service.schedule().total_duration, 30_000);
}

#[test]
fn remove_and_move_that_overrun_the_plan_limit_are_rejected() {
    let mut service = service();
    let survey = service.add_activity("Survey", 30_000).unwrap();
    let bridge = service
        .add_activity_with_dependency("Bridge", 1, DependencyType::StartToStart)
        .unwrap();
    let tail = service.add_activity("Tail", 10_000).unwrap();
    assert_eq!(service.schedule().total_duration, 30_000);

    // Without the SS bridge, Tail would chain onto Survey's finish.
    assert_eq!(
        service.remove_activity(bridge.id).unwrap_err(),
        PlanServiceError::PlanTooLong(40_000)
    );
    assert_eq!(
        service.move_activity(tail.id, 1).unwrap_err(),
        PlanServiceError::PlanTooLong(40_000)
    );
    let ids: Vec<_> = service.activities().iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![survey.id, bridge.id, tail.id]);
}

#[test]
fn inline_labels_follow_the_configured_threshold() {
    let settings = TimelineSettings {
        inline_label_min_width_px: 60.0,
        ..TimelineSettings::default()
    };
    let mut service =
        PlanService::with_settings(InMemoryActivityRepository::new(), date(2024, 1, 1), settings)
            .unwrap();
    assert_eq!(service.settings().inline_label_min_width_px, 60.0);

    service.add_activity("Design", 2).unwrap();
    let layout = service.layout();
    // 2 days * 36px - 4px inset.
    assert_eq!(layout.bars[0].geometry.width_px, 68.0);
    assert!(layout.bars[0].shows_inline_label);
}
