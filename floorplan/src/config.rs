use serde::{Deserialize, Serialize};

use crate::error::EditorError;
use crate::geometry::tolerance::{MIN_WALL_LENGTH, PICK_TOL, POINT_TOL, SNAP_RADIUS};

/// Editor tunables. Every field has a default, so a partial JSON object is a
/// valid config.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub point_tolerance: f64,
    pub pick_tolerance: f64,
    pub snap_radius: f64,
    pub min_wall_length: f64,
    pub default_wall_thickness: f64,
    pub default_door_width: f64,
    pub default_window_width: f64,
    pub default_window_height: f64,
    pub history_depth: usize,
    pub snapping: bool,
    /// Recompute rooms from the unfragmented walls on every drag move.
    pub live_room_preview: bool,
    /// Round coordinates to whole centimeters when a gesture ends.
    pub grid_rounding: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            point_tolerance: POINT_TOL,
            pick_tolerance: PICK_TOL,
            snap_radius: SNAP_RADIUS,
            min_wall_length: MIN_WALL_LENGTH,
            default_wall_thickness: 15.0,
            default_door_width: 90.0,
            default_window_width: 120.0,
            default_window_height: 120.0,
            history_depth: 20,
            snapping: true,
            live_room_preview: true,
            grid_rounding: true,
        }
    }
}

impl EditorConfig {
    pub fn from_json_str(s: &str) -> Result<Self, EditorError> {
        let cfg: EditorConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), EditorError> {
        let distances = [
            ("point_tolerance", self.point_tolerance),
            ("pick_tolerance", self.pick_tolerance),
            ("snap_radius", self.snap_radius),
            ("min_wall_length", self.min_wall_length),
            ("default_wall_thickness", self.default_wall_thickness),
            ("default_door_width", self.default_door_width),
            ("default_window_width", self.default_window_width),
            ("default_window_height", self.default_window_height),
        ];
        for (field, v) in distances {
            if !v.is_finite() || v <= 0.0 {
                return Err(EditorError::InvalidConfig {
                    field,
                    reason: format!("must be finite and positive, got {v}"),
                });
            }
        }
        if self.history_depth == 0 {
            return Err(EditorError::InvalidConfig {
                field: "history_depth",
                reason: "must be at least 1".into(),
            });
        }
        if self.pick_tolerance < self.point_tolerance {
            return Err(EditorError::InvalidConfig {
                field: "pick_tolerance",
                reason: "must not be smaller than point_tolerance".into(),
            });
        }
        Ok(())
    }
}
