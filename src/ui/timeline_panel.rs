//! Timeline panel UI rendering
//!
//! Allocates the timeline strip, feeds it input and paints it.

use crate::app::AppState;
use crate::io::KeyframeLoader;
use crate::rendering::{time_axis_renderer, timeline_overlays, timeline_renderer, TimelineLayout, TIMELINE_HEIGHT};
use crate::ui::input::timeline_input_handler;
use crate::utils::{get_current_memory_mb, format_memory_mb};
use vcutter::ThemeColors;

/// Renders the timeline panel.
///
/// Shows a loading indicator while a keyframe list is being read.
pub fn render_timeline_panel(ui: &mut egui::Ui, state: &mut AppState, loader: &KeyframeLoader) {
    let colors = state.theme.colors();

    if loader.is_loading() {
        render_loading_indicator(ui, colors, loader);
        ui.ctx().request_repaint_after(std::time::Duration::from_secs_f32(0.1));
        return;
    }

    if !state.media.is_loaded() {
        ui.label("No media loaded - open a keyframe list or generate virtual media");
        return;
    }

    let (rect, _response) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), TIMELINE_HEIGHT),
        egui::Sense::click_and_drag(),
    );
    state.timeline.set_visible_width(rect.width().round() as i32);

    timeline_input_handler::handle_timeline_input(ui.ctx(), rect, &mut state.timeline);

    let painter = ui.painter_at(rect);
    let layout = TimelineLayout::new(rect);
    painter.rect_filled(rect, 0.0, colors.timeline_background);

    time_axis_renderer::render_info_area(&painter, &layout, &state.timeline, colors);
    time_axis_renderer::render_ticks_area(&painter, &layout, &state.timeline, colors);
    timeline_renderer::render_selection_area(&painter, &layout, &state.timeline, colors);
    timeline_overlays::render_overlays(&painter, &layout, &state.timeline, colors);
}

/// Renders a loading indicator while a keyframe list is read.
fn render_loading_indicator(ui: &mut egui::Ui, colors: &ThemeColors, loader: &KeyframeLoader) {
    let (canvas_rect, _) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), TIMELINE_HEIGHT),
        egui::Sense::hover(),
    );
    let center_pos = canvas_rect.center() - egui::vec2(0.0, 12.0);
    let color = colors.text_dim;

    let title = match loader.pending_path() {
        Some(path) => format!(
            "Loading {}...",
            path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default()
        ),
        None => "Loading...".to_string(),
    };
    ui.painter().text(
        center_pos,
        egui::Align2::CENTER_CENTER,
        title,
        egui::FontId::proportional(24.0),
        color,
    );

    let memory_pos = egui::pos2(center_pos.x, center_pos.y + 28.0);
    ui.painter().text(
        memory_pos,
        egui::Align2::CENTER_CENTER,
        format_memory_mb(get_current_memory_mb()),
        egui::FontId::proportional(14.0),
        color,
    );
}
