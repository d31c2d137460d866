//! Timeline overlay rendering for the playhead, the hover marker and the hint tooltip.

use eframe::egui;
use vcutter::{ThemeColors, Timeline, TimelineHint};
use crate::rendering::TimelineLayout;

const MARKER_WIDTH: f32 = 3.0;
const TRIANGLE_SIZE: f32 = 8.0;

/// Text shown in the tooltip for a hint.
pub fn hint_text(hint: TimelineHint) -> &'static str {
    match hint {
        TimelineHint::MoveClipStart => "Move clip start",
        TimelineHint::MoveClipEnd => "Move clip end",
        TimelineHint::SetClipStartHere => "Set clip start here",
        TimelineHint::SetClipEndHere => "Set clip end here",
    }
}

/// Renders the playhead, then the hover marker and its tooltip.
///
/// # Arguments
/// * `painter` - Painter clipped to the timeline
/// * `layout` - Timeline strips
/// * `timeline` - Timeline to draw
/// * `colors` - Palette of the current theme
pub fn render_overlays(painter: &egui::Painter, layout: &TimelineLayout, timeline: &Timeline, colors: &ThemeColors) {
    let span = layout.marker_span();
    let viewport = timeline.viewport();

    let playhead_x = layout.x(viewport.position_to_pixel(timeline.position()) as f32);
    render_vertical_marker(painter, span, playhead_x, colors.playhead);

    let Some(hover) = timeline.hover_position() else {
        return;
    };
    let hover_x = layout.x(viewport.position_to_pixel(hover) as f32);
    render_vertical_marker(painter, span, hover_x, colors.hover_marker);

    let tip_x = hover_x + 1.0;
    painter.add(egui::Shape::convex_polygon(
        vec![
            egui::pos2(tip_x - TRIANGLE_SIZE / 2.0, span.top()),
            egui::pos2(tip_x + TRIANGLE_SIZE / 2.0, span.top()),
            egui::pos2(tip_x, span.top() + TRIANGLE_SIZE),
        ],
        colors.hover_marker,
        egui::Stroke::NONE,
    ));

    if let Some(hint) = timeline.hint() {
        render_tooltip(painter, layout.info, hover_x, hint_text(hint), colors);
    }
}

fn render_vertical_marker(painter: &egui::Painter, span: egui::Rect, x: f32, color: egui::Color32) {
    let marker = egui::Rect::from_min_size(egui::pos2(x, span.top()), egui::vec2(MARKER_WIDTH, span.height()));
    painter.rect_filled(marker, 0.0, color);
}

/// Draws `text` in a box centered on `x`, kept inside the left edge of `area`.
fn render_tooltip(painter: &egui::Painter, area: egui::Rect, x: f32, text: &str, colors: &ThemeColors) {
    let galley = painter.layout_no_wrap(text.to_string(), egui::FontId::proportional(12.0), colors.tooltip_text);
    let size = galley.size() + egui::vec2(4.0, 4.0);

    let left = (x - size.x / 2.0).max(area.left());
    let top = area.top() + (area.height() - size.y) / 2.0;
    let bg_rect = egui::Rect::from_min_size(egui::pos2(left, top), size);

    painter.rect_filled(bg_rect, 2.0, colors.tooltip_background);
    painter.galley(bg_rect.min + egui::vec2(2.0, 2.0), galley, colors.tooltip_text);
}
