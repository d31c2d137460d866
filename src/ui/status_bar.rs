//! Status bar UI rendering
//!
//! Handles the bottom status bar with memory usage and media summary.

use eframe::egui;
use egui::RichText;
use vcutter::time_axis::format_timestamp;
use crate::app::AppState;
use crate::utils::{format_seconds, get_current_memory_mb, format_memory_mb};

/// Renders the status panel at the bottom of the window
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Reference to application state
pub fn render_status_bar(ui: &mut egui::Ui, state: &AppState) {
    ui.horizontal(|ui| {
        // Always show memory usage first
        let memory_text = format_memory_mb(get_current_memory_mb());
        ui.label(RichText::new(&memory_text).strong());
        ui.label(RichText::new("|").strong());

        if !state.media.is_loaded() {
            ui.label(RichText::new("No media loaded").strong());
            return;
        }

        let selections = state.timeline.selections();
        ui.label(RichText::new(format!(
            "{} | Duration: {} | Keyframes: {} | Selections: {} | Selected: {}",
            state.media.display_name(),
            format_timestamp(state.media.duration()),
            state.media.keyframe_count(),
            selections.len(),
            format_seconds(selections.total_selected()),
        )).strong());

        if let (Some(start), Some(end)) = (selections.overall_start(), selections.overall_end()) {
            ui.label(RichText::new("|").strong());
            ui.label(RichText::new(format!(
                "Span: {} - {}",
                format_timestamp(start),
                format_timestamp(end)
            )).strong());
        }
    });
}
