//! Runtime configuration.
//!
//! Every field has a default, so a host can pass a partial JSON object
//! (or none at all) and override only what it cares about.

use crate::erase::DEFAULT_ERASE_THRESHOLD;
use crate::error::{InkError, Result};
use crate::model::StrokeStyle;
use crate::simplify::{SimplifyOptions, SimplifyPreset};
use serde::{Deserialize, Serialize};

/// Magnifier settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ZoomConfig {
    /// Size of the magnified drawing surface, in zoom space.
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Inset of the drawing area inside the viewport.
    pub pad_x: f32,
    pub pad_y: f32,
    /// Target rectangle size when the magnifier opens. Default: **120 × 120**.
    pub initial_width: f32,
    pub initial_height: f32,
    /// Smallest the target rectangle can be resized to.
    pub min_size: f32,
    /// Side of the square resize handles.
    pub handle_size: f32,
    /// Scale stroke width with the magnification, so a line drawn in the
    /// zoom window looks as thick on the page as it did under the glass.
    pub scale_stroke_to_target: bool,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            viewport_width: 360.0,
            viewport_height: 360.0,
            pad_x: 20.0,
            pad_y: 20.0,
            initial_width: 120.0,
            initial_height: 120.0,
            min_size: 50.0,
            handle_size: 12.0,
            scale_stroke_to_target: true,
        }
    }
}

/// Scrollbar track and thumb geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrollbarConfig {
    pub horizontal_track: f32,
    pub vertical_track: f32,
    pub thumb_size: f32,
}

impl Default for ScrollbarConfig {
    fn default() -> Self {
        Self {
            horizontal_track: 200.0,
            vertical_track: 150.0,
            thumb_size: 25.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InkConfig {
    /// Virtual page size, in canvas space.
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub zoom: ZoomConfig,
    /// Eraser reach, in canvas units.
    pub erase_threshold: f32,
    pub simplify: SimplifyPreset,
    /// Only stylus pointers draw; finger touches are left to gestures.
    pub pencil_only_draw: bool,
    pub stroke_style: StrokeStyle,
    pub scrollbars: ScrollbarConfig,
}

impl Default for InkConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1200.0,
            canvas_height: 1600.0,
            zoom: ZoomConfig::default(),
            erase_threshold: DEFAULT_ERASE_THRESHOLD,
            simplify: SimplifyPreset::default(),
            pencil_only_draw: false,
            stroke_style: StrokeStyle::default(),
            scrollbars: ScrollbarConfig::default(),
        }
    }
}

impl InkConfig {
    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: InkConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn simplify_options(&self) -> SimplifyOptions {
        self.simplify.options()
    }

    /// Reject sizes that no controller could work with.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("canvasWidth", self.canvas_width),
            ("canvasHeight", self.canvas_height),
            ("zoom.viewportWidth", self.zoom.viewport_width),
            ("zoom.viewportHeight", self.zoom.viewport_height),
            ("zoom.initialWidth", self.zoom.initial_width),
            ("zoom.initialHeight", self.zoom.initial_height),
            ("zoom.minSize", self.zoom.min_size),
            ("zoom.handleSize", self.zoom.handle_size),
            ("eraseThreshold", self.erase_threshold),
            ("strokeStyle.width", self.stroke_style.width),
            ("scrollbars.horizontalTrack", self.scrollbars.horizontal_track),
            ("scrollbars.verticalTrack", self.scrollbars.vertical_track),
            ("scrollbars.thumbSize", self.scrollbars.thumb_size),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(InkError::Config(format!("{name} must be positive, got {value}")));
            }
        }

        for (name, value) in [("zoom.padX", self.zoom.pad_x), ("zoom.padY", self.zoom.pad_y)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(InkError::Config(format!("{name} must not be negative, got {value}")));
            }
        }

        if self.zoom.min_size > self.canvas_width.min(self.canvas_height) {
            return Err(InkError::Config(format!(
                "zoom.minSize {} does not fit a {}x{} canvas",
                self.zoom.min_size, self.canvas_width, self.canvas_height
            )));
        }
        if self.zoom.initial_width.min(self.zoom.initial_height) < self.zoom.min_size {
            return Err(InkError::Config(format!(
                "zoom initial size {}x{} is below zoom.minSize {}",
                self.zoom.initial_width, self.zoom.initial_height, self.zoom.min_size
            )));
        }
        if self.scrollbars.thumb_size > self.scrollbars.horizontal_track.min(self.scrollbars.vertical_track) {
            return Err(InkError::Config("scrollbar thumb is longer than its track".into()));
        }
        Ok(())
    }
}
