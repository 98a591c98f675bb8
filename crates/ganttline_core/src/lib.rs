//! Timeline scheduling and layout core for Ganttline.
//! This crate is the single source of truth for schedule and layout rules.

pub mod engine;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod settings;

pub use engine::axis::{generate_units, TimelineAxis};
pub use engine::calendar::format_date;
pub use engine::geometry::{bar_geometry, BAR_INSET_PX, MIN_BAR_WIDTH_PX};
pub use engine::labels::{
    activity_date_range, activity_range_label, project_range_label, suggest_scale,
};
pub use engine::scheduler::{compute_schedule, Schedule};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::activity::{
    Activity, ActivityId, ActivityValidationError, DependencyType, MAX_DURATION_DAYS,
};
pub use model::timeline::{BarGeometry, TimeScale, TimelineUnit, UnknownTimeScale};
pub use repo::activity_repo::{
    ActivityRepository, InMemoryActivityRepository, StoreError, StoreResult,
};
pub use service::plan_service::{
    parse_activity_line, ActivityBar, ActivityEdit, PlanService, PlanServiceError,
    TimelineLayout,
};
pub use settings::{SettingsError, TimelineSettings};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
