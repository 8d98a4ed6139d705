//! Tuning constants for the gesture engine.
//! Defaults match the shipped viewer; a JSON override can be stored in localStorage.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const STORAGE_KEY: &str = "gv_gesture_config";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid gesture config json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
    #[error("scale bounds inverted: min {low} > max {high}")]
    Inverted { low: f64, high: f64 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Travel from the first contact before a one-point drag locks to an axis.
    pub axis_lock_distance: f64,
    /// Multiplier applied to drags past the first or last image.
    pub edge_resistance: f64,
    /// Share of the viewport width a horizontal swipe must exceed to commit.
    pub horizontal_commit_fraction: f64,
    /// Absolute vertical travel needed for item navigation.
    pub vertical_commit_distance: f64,
    /// A release below this scale snaps back to rest.
    pub snap_to_rest_below: f64,
    pub pinch_epsilon: f64,
    pub success_pulse_ms: u32,
    pub blocked_pulse_ms: u32,
    pub settle_duration_ms: f64,
    pub double_tap_window_ms: f64,
    pub double_tap_slop: f64,
    pub double_tap_scale: f64,
    pub wheel_zoom_sensitivity: f64,
    pub keyboard_zoom_step: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            min_scale: 1.0,
            max_scale: 5.0,
            axis_lock_distance: 10.0,
            edge_resistance: 0.3,
            horizontal_commit_fraction: 0.25,
            vertical_commit_distance: 60.0,
            snap_to_rest_below: 1.1,
            pinch_epsilon: 1e-3,
            success_pulse_ms: 10,
            blocked_pulse_ms: 25,
            settle_duration_ms: 280.0,
            double_tap_window_ms: 300.0,
            double_tap_slop: 24.0,
            double_tap_scale: 2.5,
            wheel_zoom_sensitivity: 0.0015,
            keyboard_zoom_step: 1.25,
        }
    }
}

impl GestureConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: GestureConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_scale > self.max_scale {
            return Err(ConfigError::Inverted {
                low: self.min_scale,
                high: self.max_scale,
            });
        }
        // Rest is defined at scale 1.
        if self.min_scale != 1.0 {
            return Err(ConfigError::OutOfRange {
                field: "min_scale",
                value: self.min_scale,
            });
        }
        let unit_fields = [
            ("edge_resistance", self.edge_resistance),
            ("horizontal_commit_fraction", self.horizontal_commit_fraction),
        ];
        for (field, value) in unit_fields {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }
        let non_negative = [
            ("axis_lock_distance", self.axis_lock_distance),
            ("vertical_commit_distance", self.vertical_commit_distance),
            ("settle_duration_ms", self.settle_duration_ms),
            ("double_tap_window_ms", self.double_tap_window_ms),
            ("double_tap_slop", self.double_tap_slop),
        ];
        for (field, value) in non_negative {
            if value < 0.0 || !value.is_finite() {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }
        if self.pinch_epsilon <= 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "pinch_epsilon",
                value: self.pinch_epsilon,
            });
        }
        if self.keyboard_zoom_step <= 1.0 {
            return Err(ConfigError::OutOfRange {
                field: "keyboard_zoom_step",
                value: self.keyboard_zoom_step,
            });
        }
        Ok(())
    }

    pub fn clamp_scale(&self, scale: f64) -> f64 {
        if scale.is_nan() {
            return self.min_scale;
        }
        scale.clamp(self.min_scale, self.max_scale)
    }

    pub fn horizontal_threshold(&self, viewport_width: f64) -> f64 {
        self.horizontal_commit_fraction * viewport_width
    }

    /// Reads the override from localStorage, falling back to defaults.
    pub fn load_stored() -> Self {
        let raw = web_sys::window()
            .and_then(|win| win.local_storage().ok().flatten())
            .and_then(|store| store.get_item(STORAGE_KEY).ok().flatten());
        match raw {
            Some(raw) => match Self::from_json(&raw) {
                Ok(cfg) => {
                    log::info!("loaded gesture config override from {}", STORAGE_KEY);
                    cfg
                }
                Err(err) => {
                    log::warn!("ignoring stored gesture config: {}", err);
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }
}
