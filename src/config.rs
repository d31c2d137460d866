//! Tunable timeline settings.
//!
//! Persisted by the GUI as a JSON string in eframe's storage.

use serde::{Deserialize, Serialize};

use crate::drag::DEFAULT_DRAG_THRESHOLD_PX;
use crate::viewport::DEFAULT_PRECISE_MULTIPLIER;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Pixel distance within which the pointer grabs a selection boundary
    pub drag_threshold_px: f32,
    /// Wheel delta multiplier while Shift is held
    pub precise_multiplier: f64,
    /// Density used by auto zoom (20 ms per pixel = 50 px per second)
    pub auto_zoom_ms_per_pixel: f64,
    /// Request a seek to the release point after resizing a boundary
    pub seek_on_drag_release: bool,
    /// Scroll the view when the playhead runs past the right edge
    pub follow_playhead: bool,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            drag_threshold_px: DEFAULT_DRAG_THRESHOLD_PX,
            precise_multiplier: DEFAULT_PRECISE_MULTIPLIER,
            auto_zoom_ms_per_pixel: 20.0,
            seek_on_drag_release: true,
            follow_playhead: true,
        }
    }
}
