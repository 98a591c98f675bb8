//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose one ephemeral plan-editing session to Dart via FRB.
//! - Flatten layout results into FFI-friendly envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Ids and dates cross the boundary as strings (UUID, `YYYY-MM-DD`).
//! - Session state lives only in process memory.

use chrono::{Local, NaiveDate};
use ganttline_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    ActivityBar, ActivityEdit, ActivityId, DependencyType, InMemoryActivityRepository,
    PlanService, PlanServiceError, TimeScale, TimelineLayout, TimelineUnit,
};
use log::warn;
use once_cell::sync::Lazy;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

type Editor = PlanService<InMemoryActivityRepository>;

static EDITOR: Lazy<Mutex<Editor>> = Lazy::new(|| Mutex::new(new_editor(today())));

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Generic action response envelope for editor mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Affected activity ID, when the action targets one.
    pub activity_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl EditorActionResponse {
    fn success(message: impl Into<String>, activity_id: Option<ActivityId>) -> Self {
        Self {
            ok: true,
            activity_id: activity_id.map(|id| id.to_string()),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            activity_id: None,
            message: message.into(),
        }
    }
}

/// One axis column.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisUnitItem {
    /// `YYYY-MM-DD`.
    pub anchor_date: String,
    pub label: String,
    pub sub_label: String,
    pub is_weekend: bool,
    pub is_first_of_period: bool,
    pub days_in_month: Option<u32>,
}

/// One positioned activity bar.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityBarItem {
    pub activity_id: String,
    pub name: String,
    pub duration: u32,
    /// `FS|SS`.
    pub dependency: String,
    pub start_offset: u32,
    pub left_px: f64,
    pub width_px: f64,
    pub date_range_label: String,
    pub shows_inline_label: bool,
}

/// Layout envelope for one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResponse {
    pub ok: bool,
    pub message: String,
    /// `YYYY-MM-DD`.
    pub project_start: String,
    /// `days|weeks|months`.
    pub scale: String,
    pub unit_width_px: f64,
    pub total_duration: u32,
    pub timeline_width_px: f64,
    pub project_range: Option<String>,
    pub units: Vec<AxisUnitItem>,
    pub bars: Vec<ActivityBarItem>,
}

impl LayoutResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            project_start: String::new(),
            scale: String::new(),
            unit_width_px: 0.0,
            total_duration: 0,
            timeline_width_px: 0.0,
            project_range: None,
            units: Vec::new(),
            bars: Vec::new(),
        }
    }
}

/// Discards all activities and starts a fresh session.
///
/// `start_date` is `YYYY-MM-DD`; blank means today.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_reset(start_date: String) -> EditorActionResponse {
    let project_start = if start_date.trim().is_empty() {
        today()
    } else {
        match parse_iso_date(&start_date) {
            Ok(date) => date,
            Err(message) => return EditorActionResponse::failure(message),
        }
    };

    match lock_editor() {
        Ok(mut editor) => {
            *editor = new_editor(project_start);
            EditorActionResponse::success("Plan cleared.", None)
        }
        Err(message) => EditorActionResponse::failure(message),
    }
}

/// Appends a finish-to-start activity.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_add_activity(name: String, duration: u32) -> EditorActionResponse {
    with_editor("editor_add_activity", |editor| {
        let activity = editor.add_activity(name, duration)?;
        Ok(EditorActionResponse::success(
            "Activity added.",
            Some(activity.id),
        ))
    })
}

/// Replaces name, duration, and dependency (`FS|SS`) of one activity.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_update_activity(
    activity_id: String,
    name: String,
    duration: u32,
    dependency: String,
) -> EditorActionResponse {
    let id = match parse_activity_id(&activity_id) {
        Ok(id) => id,
        Err(message) => return EditorActionResponse::failure(message),
    };
    let dependency = match dependency.parse::<DependencyType>() {
        Ok(dependency) => dependency,
        Err(err) => return EditorActionResponse::failure(err.to_string()),
    };

    with_editor("editor_update_activity", |editor| {
        editor.update_activity(
            id,
            ActivityEdit {
                name,
                duration,
                dependency,
            },
        )?;
        Ok(EditorActionResponse::success("Activity updated.", Some(id)))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn editor_remove_activity(activity_id: String) -> EditorActionResponse {
    let id = match parse_activity_id(&activity_id) {
        Ok(id) => id,
        Err(message) => return EditorActionResponse::failure(message),
    };
    with_editor("editor_remove_activity", |editor| {
        editor.remove_activity(id)?;
        Ok(EditorActionResponse::success("Activity removed.", Some(id)))
    })
}

/// Moves one activity to `target_index` (clamped to the sequence bounds).
#[flutter_rust_bridge::frb(sync)]
pub fn editor_move_activity(activity_id: String, target_index: u32) -> EditorActionResponse {
    let id = match parse_activity_id(&activity_id) {
        Ok(id) => id,
        Err(message) => return EditorActionResponse::failure(message),
    };
    with_editor("editor_move_activity", |editor| {
        let index = editor.move_activity(id, target_index as usize)?;
        Ok(EditorActionResponse::success(
            format!("Activity moved to position {}.", index + 1),
            Some(id),
        ))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn editor_set_start_date(start_date: String) -> EditorActionResponse {
    let project_start = match parse_iso_date(&start_date) {
        Ok(date) => date,
        Err(message) => return EditorActionResponse::failure(message),
    };
    with_editor("editor_set_start_date", |editor| {
        editor.set_project_start(project_start);
        Ok(EditorActionResponse::success("Start date updated.", None))
    })
}

/// Switches scale (`days|weeks|months`) and resets zoom to its default.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_set_scale(scale: String) -> EditorActionResponse {
    let scale = match scale.parse::<TimeScale>() {
        Ok(scale) => scale,
        Err(err) => return EditorActionResponse::failure(err.to_string()),
    };
    with_editor("editor_set_scale", |editor| {
        editor.set_scale(scale);
        Ok(EditorActionResponse::success(
            format!("Scale set to {scale}."),
            None,
        ))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn editor_set_unit_width(unit_width_px: f64) -> EditorActionResponse {
    with_editor("editor_set_unit_width", |editor| {
        let applied = editor.set_unit_width(unit_width_px);
        Ok(EditorActionResponse::success(
            format!("Zoom set to {applied} px."),
            None,
        ))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn editor_auto_scale() -> EditorActionResponse {
    with_editor("editor_auto_scale", |editor| {
        let scale = editor.auto_scale();
        Ok(EditorActionResponse::success(
            format!("Scale set to {scale}."),
            None,
        ))
    })
}

/// Fits all axis units into `container_width_px`.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_fit_to_width(container_width_px: f64) -> EditorActionResponse {
    with_editor("editor_fit_to_width", |editor| {
        let message = match editor.fit_to_width(container_width_px) {
            Some(applied) => format!("Zoom set to {applied} px."),
            None => "Nothing to fit.".to_string(),
        };
        Ok(EditorActionResponse::success(message, None))
    })
}

/// Computes the current layout.
///
/// # FFI contract
/// - Sync call, pure computation over session state.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_layout() -> LayoutResponse {
    match lock_editor() {
        Ok(editor) => to_layout_response(editor.layout()),
        Err(message) => LayoutResponse::failure(message),
    }
}

fn with_editor<F>(operation: &str, action: F) -> EditorActionResponse
where
    F: FnOnce(&mut Editor) -> Result<EditorActionResponse, PlanServiceError>,
{
    let mut editor = match lock_editor() {
        Ok(editor) => editor,
        Err(message) => return EditorActionResponse::failure(message),
    };
    match action(&mut *editor) {
        Ok(response) => response,
        Err(err) => {
            warn!("event=ffi_call module=ffi status=error op={operation} error={err}");
            EditorActionResponse::failure(format!("{operation} failed: {err}"))
        }
    }
}

fn lock_editor() -> Result<MutexGuard<'static, Editor>, String> {
    EDITOR
        .lock()
        .map_err(|_| "editor session is unavailable after an earlier panic".to_string())
}

fn new_editor(project_start: NaiveDate) -> Editor {
    PlanService::new(InMemoryActivityRepository::new(), project_start)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn parse_iso_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), ISO_DATE_FORMAT)
        .map_err(|err| format!("invalid date `{}`: {err}", value.trim()))
}

fn parse_activity_id(value: &str) -> Result<ActivityId, String> {
    Uuid::parse_str(value.trim())
        .map_err(|err| format!("invalid activity id `{}`: {err}", value.trim()))
}

fn to_layout_response(layout: TimelineLayout) -> LayoutResponse {
    let message = if layout.bars.is_empty() {
        "Add activities to see the Gantt chart.".to_string()
    } else {
        format!(
            "{} activities over {} days.",
            layout.bars.len(),
            layout.total_duration
        )
    };
    LayoutResponse {
        ok: true,
        message,
        project_start: layout.project_start.format(ISO_DATE_FORMAT).to_string(),
        scale: layout.scale.to_string(),
        unit_width_px: layout.unit_width_px,
        total_duration: layout.total_duration,
        timeline_width_px: layout.timeline_width_px,
        project_range: layout.project_range,
        units: layout.units.into_iter().map(to_axis_unit_item).collect(),
        bars: layout.bars.into_iter().map(to_activity_bar_item).collect(),
    }
}

fn to_axis_unit_item(unit: TimelineUnit) -> AxisUnitItem {
    AxisUnitItem {
        anchor_date: unit.anchor_date.format(ISO_DATE_FORMAT).to_string(),
        label: unit.label,
        sub_label: unit.sub_label,
        is_weekend: unit.is_weekend,
        is_first_of_period: unit.is_first_of_period,
        days_in_month: unit.days_in_month,
    }
}

fn to_activity_bar_item(bar: ActivityBar) -> ActivityBarItem {
    ActivityBarItem {
        activity_id: bar.id.to_string(),
        name: bar.name,
        duration: bar.duration,
        dependency: bar.dependency.code().to_string(),
        start_offset: bar.start_offset,
        left_px: bar.geometry.left_px,
        width_px: bar.geometry.width_px,
        date_range_label: bar.date_range_label,
        shows_inline_label: bar.shows_inline_label,
    }
}
