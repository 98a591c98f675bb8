//! Command-line front end for the timeline core.
//!
//! # Responsibility
//! - Build a plan from `--activity` arguments and plan files.
//! - Print the computed layout as text or JSON.
//!
//! # Invariants
//! - Plan files are read-only input.
//! - Invalid input exits with code 1 and a message on stderr.

use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};
use ganttline_core::{
    default_log_level, init_logging, InMemoryActivityRepository, LoggingError, PlanService,
    PlanServiceError, TimeScale, TimelineLayout,
};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(version, about = "Sequential Gantt timeline calculator", long_about = None)]
struct Args {
    /// Project start date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_start_date)]
    start: Option<NaiveDate>,

    /// Axis scale.
    #[arg(long, value_enum, default_value_t = ScaleArg::Auto)]
    scale: ScaleArg,

    /// Pixel width of one axis unit; clamped to the zoom range.
    #[arg(long)]
    unit_width: Option<f64>,

    /// Size units so the whole axis fits this container width.
    #[arg(long, conflicts_with = "unit_width")]
    fit_width: Option<f64>,

    /// Activity as `Name:days[:FS|SS]`. Repeatable, appended after plan files.
    #[arg(long = "activity", value_name = "LINE")]
    activities: Vec<String>,

    /// File with one activity line per row; `#` starts a comment.
    #[arg(long)]
    plan: Option<PathBuf>,

    /// Print the layout as JSON.
    #[arg(long)]
    json: bool,

    #[arg(long, env = "GANTTLINE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files. Logging is off without it.
    #[arg(long, env = "GANTTLINE_LOG_DIR")]
    log_dir: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ScaleArg {
    Days,
    Weeks,
    Months,
    Auto,
}

impl ScaleArg {
    fn fixed(self) -> Option<TimeScale> {
        match self {
            Self::Days => Some(TimeScale::Days),
            Self::Weeks => Some(TimeScale::Weeks),
            Self::Months => Some(TimeScale::Months),
            Self::Auto => None,
        }
    }
}

#[derive(Debug)]
enum CliError {
    Logging(LoggingError),
    ReadPlan { path: PathBuf, source: std::io::Error },
    PlanLine { origin: String, source: PlanServiceError },
    Json(serde_json::Error),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logging(err) => write!(f, "{err}"),
            Self::ReadPlan { path, source } => {
                write!(f, "cannot read plan file `{}`: {source}", path.display())
            }
            Self::PlanLine { origin, source } => write!(f, "{origin}: {source}"),
            Self::Json(err) => write!(f, "cannot encode layout: {err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Logging(err) => Some(err),
            Self::ReadPlan { source, .. } => Some(source),
            Self::PlanLine { source, .. } => Some(source),
            Self::Json(err) => Some(err),
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("ganttline: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<String, CliError> {
    if let Some(log_dir) = args.log_dir.as_deref() {
        let level = args.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(CliError::Logging)?;
    }

    let project_start = args.start.unwrap_or_else(|| Local::now().date_naive());
    let mut plan = PlanService::new(InMemoryActivityRepository::new(), project_start);

    if let Some(path) = args.plan.as_ref() {
        let content = std::fs::read_to_string(path).map_err(|source| CliError::ReadPlan {
            path: path.clone(),
            source,
        })?;
        for (line_no, line) in plan_lines(&content) {
            plan.add_activity_line(line)
                .map_err(|source| CliError::PlanLine {
                    origin: format!("{}:{line_no}", path.display()),
                    source,
                })?;
        }
    }
    for (index, line) in args.activities.iter().enumerate() {
        plan.add_activity_line(line)
            .map_err(|source| CliError::PlanLine {
                origin: format!("--activity #{}", index + 1),
                source,
            })?;
    }

    match args.scale.fixed() {
        Some(scale) => plan.set_scale(scale),
        None => {
            plan.auto_scale();
        }
    }
    if let Some(unit_width) = args.unit_width {
        plan.set_unit_width(unit_width);
    }
    if let Some(container_width) = args.fit_width {
        plan.fit_to_width(container_width);
    }

    let layout = plan.layout();
    info!(
        "event=cli_render module=cli status=ok activities={} scale={} json={}",
        layout.bars.len(),
        layout.scale,
        args.json
    );

    if args.json {
        serde_json::to_string_pretty(&layout).map_err(CliError::Json)
    } else {
        Ok(render_text(&layout))
    }
}

fn parse_start_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|err| format!("expected YYYY-MM-DD: {err}"))
}

/// Non-empty, non-comment lines with their 1-based line numbers.
fn plan_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

fn render_text(layout: &TimelineLayout) -> String {
    let mut lines = vec![format!(
        "start={} scale={} unit_width={}px units={} width={}px",
        layout.project_start,
        layout.scale,
        layout.unit_width_px,
        layout.units.len(),
        layout.timeline_width_px
    )];

    let header = layout
        .units
        .iter()
        .map(|unit| format!("{} {}", unit.label, unit.sub_label))
        .collect::<Vec<_>>()
        .join(" | ");
    lines.push(format!("axis: {header}"));

    if layout.bars.is_empty() {
        lines.push("no activities".to_string());
        return lines.join("\n");
    }

    for (index, bar) in layout.bars.iter().enumerate() {
        lines.push(format!(
            "{:>3}. {} [{}] offset={} days={} {} left={:.1}px width={:.1}px",
            index + 1,
            bar.name,
            bar.dependency,
            bar.start_offset,
            bar.duration,
            bar.date_range_label,
            bar.geometry.left_px,
            bar.geometry.width_px
        ));
    }
    if let Some(range) = layout.project_range.as_deref() {
        lines.push(format!("project: {range}"));
    }
    lines.join("\n")
}
