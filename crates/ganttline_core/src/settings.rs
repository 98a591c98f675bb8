//! Timeline view settings.
//!
//! # Responsibility
//! - Hold the zoom and fit bounds used by presentation helpers.
//! - Allow hosts to override defaults from a serialized config blob.
//!
//! # Invariants
//! - `min_unit_width_px <= fit_max_unit_width_px <= max_unit_width_px`.
//! - Per-scale default widths lie inside the zoom range.
//! - All widths are finite and positive.

use crate::model::timeline::TimeScale;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Zoom and fit configuration for one timeline view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineSettings {
    /// Lower bound of the zoom slider and of fit-to-width results.
    pub min_unit_width_px: f64,
    /// Upper bound of the zoom slider.
    pub max_unit_width_px: f64,
    /// Upper bound of fit-to-width results.
    pub fit_max_unit_width_px: f64,
    /// Width reserved outside the units when fitting.
    pub fit_gutter_px: f64,
    /// Bars narrower than this do not carry an inline date label.
    pub inline_label_min_width_px: f64,
    pub days_unit_width_px: f64,
    pub weeks_unit_width_px: f64,
    pub months_unit_width_px: f64,
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            min_unit_width_px: 20.0,
            max_unit_width_px: 100.0,
            fit_max_unit_width_px: 80.0,
            fit_gutter_px: 20.0,
            inline_label_min_width_px: 120.0,
            days_unit_width_px: TimeScale::Days.default_unit_width(),
            weeks_unit_width_px: TimeScale::Weeks.default_unit_width(),
            months_unit_width_px: TimeScale::Months.default_unit_width(),
        }
    }
}

/// Invalid settings values.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsError {
    NonPositive { field: &'static str, value: f64 },
    InvertedBounds { min: f64, max: f64 },
    OutsideZoomRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositive { field, value } => {
                write!(f, "`{field}` must be a finite positive width, got {value}")
            }
            Self::InvertedBounds { min, max } => {
                write!(f, "unit width bounds are inverted: min {min} > max {max}")
            }
            Self::OutsideZoomRange {
                field,
                value,
                min,
                max,
            } => write!(f, "`{field}` = {value} lies outside the zoom range {min}..={max}"),
        }
    }
}

impl Error for SettingsError {}

impl TimelineSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        let fields = [
            ("min_unit_width_px", self.min_unit_width_px),
            ("max_unit_width_px", self.max_unit_width_px),
            ("fit_max_unit_width_px", self.fit_max_unit_width_px),
            ("days_unit_width_px", self.days_unit_width_px),
            ("weeks_unit_width_px", self.weeks_unit_width_px),
            ("months_unit_width_px", self.months_unit_width_px),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(SettingsError::NonPositive { field, value });
            }
        }
        if !self.fit_gutter_px.is_finite() || self.fit_gutter_px < 0.0 {
            return Err(SettingsError::NonPositive {
                field: "fit_gutter_px",
                value: self.fit_gutter_px,
            });
        }
        if self.min_unit_width_px > self.max_unit_width_px {
            return Err(SettingsError::InvertedBounds {
                min: self.min_unit_width_px,
                max: self.max_unit_width_px,
            });
        }
        if self.min_unit_width_px > self.fit_max_unit_width_px {
            return Err(SettingsError::InvertedBounds {
                min: self.min_unit_width_px,
                max: self.fit_max_unit_width_px,
            });
        }
        let defaults = [
            ("days_unit_width_px", self.days_unit_width_px),
            ("weeks_unit_width_px", self.weeks_unit_width_px),
            ("months_unit_width_px", self.months_unit_width_px),
        ];
        for (field, value) in defaults {
            if value < self.min_unit_width_px || value > self.max_unit_width_px {
                return Err(SettingsError::OutsideZoomRange {
                    field,
                    value,
                    min: self.min_unit_width_px,
                    max: self.max_unit_width_px,
                });
            }
        }
        Ok(())
    }

    pub fn default_unit_width(&self, scale: TimeScale) -> f64 {
        match scale {
            TimeScale::Days => self.days_unit_width_px,
            TimeScale::Weeks => self.weeks_unit_width_px,
            TimeScale::Months => self.months_unit_width_px,
        }
    }

    /// Clamps a requested zoom level into the slider range.
    pub fn clamp_zoom(&self, unit_width_px: f64) -> f64 {
        if unit_width_px.is_nan() {
            return self.min_unit_width_px;
        }
        unit_width_px.clamp(self.min_unit_width_px, self.max_unit_width_px)
    }

    /// Unit width that fits `unit_count` units into `container_width_px`.
    ///
    /// Returns `None` when there is nothing to fit.
    pub fn fit_unit_width(&self, container_width_px: f64, unit_count: usize) -> Option<f64> {
        if unit_count == 0 {
            return None;
        }
        let available = container_width_px - self.fit_gutter_px;
        let per_unit = (available / unit_count as f64).floor();
        Some(
            per_unit
                .max(self.min_unit_width_px)
                .min(self.fit_max_unit_width_px),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{SettingsError, TimelineSettings};

    #[test]
    fn fit_unit_width_floors_and_clamps() {
        let settings = TimelineSettings::default();
        assert_eq!(settings.fit_unit_width(520.0, 14), Some(35.0));
        assert_eq!(settings.fit_unit_width(100.0, 14), Some(20.0));
        assert_eq!(settings.fit_unit_width(5000.0, 3), Some(80.0));
        assert_eq!(settings.fit_unit_width(500.0, 0), None);
    }

    #[test]
    fn default_settings_are_valid() {
        assert_eq!(TimelineSettings::default().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_scale_default_outside_zoom_range() {
        let settings = TimelineSettings {
            months_unit_width_px: 140.0,
            ..TimelineSettings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::OutsideZoomRange {
                field: "months_unit_width_px",
                value: 140.0,
                min: 20.0,
                max: 100.0,
            })
        );

        let settings = TimelineSettings {
            min_unit_width_px: 40.0,
            ..TimelineSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::OutsideZoomRange {
                field: "days_unit_width_px",
                ..
            })
        ));
    }

    #[test]
    fn validate_rejects_inverted_bounds() {
        let settings = TimelineSettings {
            min_unit_width_px: 120.0,
            ..TimelineSettings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::InvertedBounds {
                min: 120.0,
                max: 100.0
            })
        );
    }
}
