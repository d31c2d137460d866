//! Rendering subsystem for drawing the timeline
//!
//! The timeline is three stacked strips:
//! - info area (time readout, overview of the visible window, hint tooltip)
//! - ticks area (one tick per second, thinned labels)
//! - selection area (keyframes, selections, boundary markers)
//!
//! Playhead and hover marker span the ticks and selection areas.

pub mod time_axis_renderer;
pub mod timeline_renderer;
pub mod timeline_overlays;

use eframe::egui;

pub const INFO_AREA_HEIGHT: f32 = 22.0;
pub const TICKS_AREA_HEIGHT: f32 = 30.0;
pub const SELECTION_AREA_HEIGHT: f32 = 30.0;
pub const TIMELINE_HEIGHT: f32 = INFO_AREA_HEIGHT + TICKS_AREA_HEIGHT + SELECTION_AREA_HEIGHT;

/// Screen rectangles of the timeline strips.
#[derive(Debug, Clone, Copy)]
pub struct TimelineLayout {
    pub info: egui::Rect,
    pub ticks: egui::Rect,
    pub selection: egui::Rect,
}

impl TimelineLayout {
    /// Splits a timeline rectangle into its strips, top to bottom.
    pub fn new(rect: egui::Rect) -> Self {
        let info = egui::Rect::from_min_size(rect.min, egui::vec2(rect.width(), INFO_AREA_HEIGHT));
        let ticks = egui::Rect::from_min_size(
            egui::pos2(rect.left(), info.bottom()),
            egui::vec2(rect.width(), TICKS_AREA_HEIGHT),
        );
        let selection = egui::Rect::from_min_size(
            egui::pos2(rect.left(), ticks.bottom()),
            egui::vec2(rect.width(), SELECTION_AREA_HEIGHT),
        );
        Self { info, ticks, selection }
    }

    /// Area covered by the playhead and the hover marker.
    pub fn marker_span(&self) -> egui::Rect {
        egui::Rect::from_min_max(self.ticks.min, self.selection.max)
    }

    /// Screen x of a timeline pixel column.
    pub fn x(&self, pixel: f32) -> f32 {
        self.info.left() + pixel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_strips_stack() {
        let rect = egui::Rect::from_min_size(egui::pos2(10.0, 100.0), egui::vec2(500.0, TIMELINE_HEIGHT));
        let layout = TimelineLayout::new(rect);
        assert_eq!(layout.info.top(), 100.0);
        assert_eq!(layout.ticks.top(), 122.0);
        assert_eq!(layout.selection.bottom(), rect.bottom());
        assert_eq!(layout.marker_span().height(), TICKS_AREA_HEIGHT + SELECTION_AREA_HEIGHT);
        assert_eq!(layout.x(5.0), 15.0);
    }
}
