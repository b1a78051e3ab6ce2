//! Editor settings, loaded from `<config dir>/domino/settings.json`.
//!
//! Every field has a default, so a partial or missing file is fine.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::constants::{
    CAMERA_TRANSITION_SECS, CLICK_MOVEMENT_LIMIT, FRAME_PADDING, MAX_HISTORY_DEPTH,
    SELECTION_FRAME_SCALE, SNAP_TRANSITION_SECS,
};
use crate::grid::GridConfig;
use crate::input::pan_zoom::{WheelZoom, ZoomLimits};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub min_scale: f64,
    pub max_scale: f64,
    pub history_depth: usize,
    pub click_movement_limit: f64,
    pub grid: GridConfig,
    /// Scene units added around a rect before framing it
    pub frame_padding: f64,
    /// Scale range used when centring on the selection
    pub selection_frame_scale: (f64, f64),
    pub camera_transition_secs: f64,
    pub snap_transition_secs: f64,
    pub wheel_line_multiplier: f64,
    pub wheel_max_delta: f64,
    pub wheel_exponent_rate: f64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        let limits = ZoomLimits::default();
        let wheel = WheelZoom::default();
        Self {
            min_scale: limits.min_scale,
            max_scale: limits.max_scale,
            history_depth: MAX_HISTORY_DEPTH,
            click_movement_limit: CLICK_MOVEMENT_LIMIT,
            grid: GridConfig::default(),
            frame_padding: FRAME_PADDING,
            selection_frame_scale: SELECTION_FRAME_SCALE,
            camera_transition_secs: CAMERA_TRANSITION_SECS,
            snap_transition_secs: SNAP_TRANSITION_SECS,
            wheel_line_multiplier: wheel.line_multiplier,
            wheel_max_delta: wheel.max_delta,
            wheel_exponent_rate: wheel.exponent_rate,
        }
    }
}

impl EditorSettings {
    /// Default settings file location, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("domino").join("settings.json"))
    }

    /// Load from the default location. Missing or unreadable files fall back
    /// to defaults.
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(err) => {
                warn!(error = %format!("{err:#}"), "falling back to default settings");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        let settings: Self = serde_json::from_str(&raw)
            .with_context(|| format!("parsing settings in {}", path.display()))?;
        Ok(settings.sanitized())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// Clamp values that would break the editor's invariants.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.min_scale.is_finite() && self.min_scale > 0.0) {
            self.min_scale = defaults.min_scale;
        }
        if !self.max_scale.is_finite() || self.max_scale < self.min_scale {
            self.max_scale = self.min_scale.max(defaults.max_scale);
        }
        let (low, high) = self.selection_frame_scale;
        let low = low.clamp(self.min_scale, self.max_scale);
        self.selection_frame_scale = (low, high.clamp(low, self.max_scale));
        self.history_depth = self.history_depth.max(1);
        if !(self.grid.cell_width > self.grid.cell_gap * 2.0
            && self.grid.cell_height > self.grid.cell_gap * 2.0)
        {
            self.grid = defaults.grid;
        }
        self.click_movement_limit = self.click_movement_limit.max(0.0);
        self
    }

    pub fn zoom_limits(&self) -> ZoomLimits {
        ZoomLimits::new(self.min_scale, self.max_scale)
    }

    pub fn selection_limits(&self) -> ZoomLimits {
        ZoomLimits::new(self.selection_frame_scale.0, self.selection_frame_scale.1)
    }

    pub fn wheel_zoom(&self) -> WheelZoom {
        WheelZoom {
            line_multiplier: self.wheel_line_multiplier,
            max_delta: self.wheel_max_delta,
            exponent_rate: self.wheel_exponent_rate,
        }
    }
}
