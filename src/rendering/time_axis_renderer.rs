//! Time axis rendering logic
//!
//! Draws the info area (time readout and overview of the visible window) and
//! the ticks area with one tick per second and thinned labels.

use eframe::egui;
use vcutter::time_axis::{self, format_tick_label, format_timestamp};
use vcutter::{ThemeColors, Timeline};
use crate::rendering::TimelineLayout;

/// Horizontal anchor of the time readout in the info area
const INFO_TEXT_X: f32 = 12.0;

/// Renders the info area: overview strip and the playhead/hover readout.
///
/// # Arguments
/// * `painter` - Painter clipped to the timeline
/// * `layout` - Timeline strips
/// * `timeline` - Timeline to describe
/// * `colors` - Palette of the current theme
pub fn render_info_area(painter: &egui::Painter, layout: &TimelineLayout, timeline: &Timeline, colors: &ThemeColors) {
    let rect = layout.info;
    painter.rect_filled(rect, 0.0, colors.info_area);

    if let Some((left, right)) = time_axis::overview_span(timeline.viewport(), rect.width()) {
        let window = egui::Rect::from_min_max(
            egui::pos2(rect.left() + left, rect.top()),
            egui::pos2(rect.left() + right, rect.bottom()),
        );
        painter.rect_filled(window, 0.0, colors.info_area_window);
    }

    let mut text = format!("Time: {}", format_timestamp(timeline.position()));
    if let Some(hover) = timeline.hover_position() {
        text.push_str(&format!("   Hovered: {}", format_timestamp(hover)));
    }
    painter.text(
        egui::pos2(rect.left() + INFO_TEXT_X, rect.center().y),
        egui::Align2::LEFT_CENTER,
        text,
        egui::FontId::proportional(12.0),
        colors.info_text,
    );
}

/// Renders the ticks area with second ticks and labels.
///
/// Labeled ticks extend down through the selection area.
pub fn render_ticks_area(painter: &egui::Painter, layout: &TimelineLayout, timeline: &Timeline, colors: &ThemeColors) {
    let rect = layout.ticks;
    painter.rect_filled(layout.selection, 0.0, colors.selection_area);
    painter.rect_filled(rect, 0.0, colors.ticks_area);

    let viewport = timeline.viewport();
    let font = egui::FontId::proportional(11.0);
    let widest_label = format_tick_label(viewport.total_duration());
    let label_width = painter
        .layout_no_wrap(widest_label, font.clone(), colors.big_tick)
        .size()
        .x;

    for tick in time_axis::layout_ticks(viewport, label_width) {
        let x = layout.x(tick.x);
        if tick.labeled {
            painter.text(
                egui::pos2(x + 2.0, rect.top() + 2.0),
                egui::Align2::LEFT_TOP,
                format_tick_label(tick.position),
                font.clone(),
                colors.big_tick,
            );
            painter.line_segment(
                [egui::pos2(x, rect.center().y), egui::pos2(x, layout.selection.bottom())],
                egui::Stroke::new(1.0, colors.big_tick),
            );
        } else {
            painter.line_segment(
                [egui::pos2(x, rect.top() + rect.height() * 0.75), egui::pos2(x, rect.bottom())],
                egui::Stroke::new(1.0, colors.small_tick),
            );
        }
    }
}
