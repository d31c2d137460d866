//! Selection area rendering
//!
//! Draws keyframe ticks, hatched selections with their boundary markers and
//! the pending selection start marker.

use eframe::egui;
use vcutter::{ThemeColors, Timeline};
use crate::rendering::TimelineLayout;

/// Distance between hatch lines in pixels
const HATCH_SPACING: f32 = 6.0;

/// Width of a boundary marker in pixels
const MARKER_WIDTH: f32 = 2.0;

/// Renders the selection area contents.
///
/// # Arguments
/// * `painter` - Painter clipped to the timeline
/// * `layout` - Timeline strips
/// * `timeline` - Timeline to draw
/// * `colors` - Palette of the current theme
pub fn render_selection_area(painter: &egui::Painter, layout: &TimelineLayout, timeline: &Timeline, colors: &ThemeColors) {
    let rect = layout.selection;
    let viewport = timeline.viewport();
    let (window_start, window_end) = viewport.visible_window();

    // Read under the buffer lock
    timeline.keyframes().with_range(window_start, window_end, |keyframes| {
        for keyframe in keyframes {
            let x = layout.x(viewport.position_to_pixel(keyframe.position) as f32);
            painter.line_segment(
                [egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())],
                egui::Stroke::new(1.0, colors.keyframe_tick),
            );
        }
    });

    for range in timeline.selections().iter() {
        if range.end < window_start || range.start > window_end {
            continue;
        }
        let left = layout.x(viewport.position_to_pixel(range.start) as f32);
        let right = layout.x(viewport.position_to_pixel(range.end) as f32);
        let selected = egui::Rect::from_min_max(egui::pos2(left, rect.top()), egui::pos2(right, rect.bottom()));

        painter.rect_filled(selected, 0.0, colors.selected_fill);
        render_hatch(painter, selected, colors.selected_hatch);
        render_marker(painter, rect, left, colors);
        render_marker(painter, rect, right, colors);
    }

    if let Some(start) = timeline.new_selection_start() {
        let x = layout.x(viewport.position_to_pixel(start) as f32);
        render_marker(painter, rect, x, colors);
    }
}

/// Draws downward diagonal lines inside `rect`.
fn render_hatch(painter: &egui::Painter, rect: egui::Rect, color: egui::Color32) {
    if rect.width() <= 0.0 {
        return;
    }
    let clipped = painter.with_clip_rect(rect.intersect(painter.clip_rect()));
    let height = rect.height();
    let stroke = egui::Stroke::new(1.0, color);

    let mut x = rect.left() - height;
    while x < rect.right() {
        clipped.line_segment(
            [egui::pos2(x, rect.top()), egui::pos2(x + height, rect.bottom())],
            stroke,
        );
        x += HATCH_SPACING;
    }
}

fn render_marker(painter: &egui::Painter, area: egui::Rect, x: f32, colors: &ThemeColors) {
    let marker = egui::Rect::from_min_max(
        egui::pos2(x - MARKER_WIDTH / 2.0, area.top()),
        egui::pos2(x + MARKER_WIDTH / 2.0, area.bottom()),
    );
    painter.rect_filled(marker, 0.0, colors.selection_marker);
}
