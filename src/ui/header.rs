//! Header panel UI rendering
//!
//! Handles the top bar with media controls, zoom buttons, timeline settings
//! and the theme selector.

use eframe::egui;
use std::path::PathBuf;
use vcutter::time_axis::format_timestamp;
use crate::app::{AppState, TimelineCommand};

/// Result of user interaction with the header panel
pub enum HeaderInteraction {
    /// User picked a keyframe list
    OpenFileRequested(PathBuf),
    /// User clicked "Virtual Media"
    OpenVirtualMediaRequested,
    /// User clicked one of the timeline buttons
    Command(TimelineCommand),
}

/// Renders the application header
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Mutable reference to application state
///
/// # Returns
/// * `Option<HeaderInteraction>` - User interaction result
pub fn render_header(ui: &mut egui::Ui, state: &mut AppState) -> Option<HeaderInteraction> {
    let mut interaction = None;

    ui.horizontal(|ui| {
        if ui.button("📁 Open Keyframes").clicked() {
            let mut dialog = rfd::FileDialog::new()
                .add_filter("Keyframe Lists", &["csv", "txt", "br"])
                .add_filter("All Files", &["*"]);

            if let Some(dir) = state.media.last_directory() {
                dialog = dialog.set_directory(dir);
            }

            if let Some(path) = dialog.pick_file() {
                interaction = Some(HeaderInteraction::OpenFileRequested(path));
            }
        }

        if ui.button("🔮 Virtual Media").clicked() {
            interaction = Some(HeaderInteraction::OpenVirtualMediaRequested);
        }

        ui.separator();

        if state.media.is_loaded() {
            let play_label = if state.playback.is_playing() { "⏸ Pause" } else { "▶ Play" };
            if ui.button(play_label).clicked() {
                interaction = Some(HeaderInteraction::Command(TimelineCommand::TogglePlayback));
            }
            ui.checkbox(state.playback.play_selections_only_mut(), "Selections only");

            ui.separator();

            let buttons = [
                ("⛶ Overview", TimelineCommand::ZoomOverview),
                ("🔍 Auto Zoom", TimelineCommand::ZoomAuto),
                ("⌖ Recenter", TimelineCommand::Recenter),
            ];
            for (label, command) in buttons {
                if ui.button(label).clicked() {
                    interaction = Some(HeaderInteraction::Command(command));
                }
            }

            ui.label(format!("Zoom: {:.2}x", state.timeline.viewport().scale()));

            if let Some(start) = state.timeline.new_selection_start() {
                ui.separator();
                ui.label(format!("Clip start at {}", format_timestamp(start)));
                if ui.small_button("✖").on_hover_text("Cancel (Esc)").clicked() {
                    interaction = Some(HeaderInteraction::Command(TimelineCommand::CancelPending));
                }
            }
        }

        // Push theme selector to the right
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let old_theme = state.theme.current_theme_name().to_string();
            let mut current_theme = old_theme.clone();
            egui::ComboBox::from_id_salt("theme_selector")
                .selected_text(&current_theme)
                .show_ui(ui, |ui| {
                    for theme_name in state.theme.theme_manager().list_themes() {
                        ui.selectable_value(&mut current_theme, theme_name.to_string(), theme_name);
                    }
                });

            if old_theme != current_theme {
                state.theme.set_theme(&current_theme);
                ui.ctx().request_repaint();
            }

            ui.label("Theme:");

            ui.menu_button("⚙ Settings", |ui| render_settings_menu(ui, state));
        });
    });

    if let Some(err) = &state.error_message {
        ui.colored_label(state.theme.colors().error, err);
    }

    interaction
}

/// Timeline tuning; changes apply immediately and are persisted on save.
fn render_settings_menu(ui: &mut egui::Ui, state: &mut AppState) {
    let mut config = state.timeline.config().clone();

    ui.add(egui::Slider::new(&mut config.drag_threshold_px, 1.0..=12.0).text("Grab distance (px)"));
    ui.add(egui::Slider::new(&mut config.precise_multiplier, 2.0..=20.0).text("Shift wheel multiplier"));
    ui.add(egui::Slider::new(&mut config.auto_zoom_ms_per_pixel, 1.0..=200.0).text("Auto zoom (ms per px)"));
    ui.checkbox(&mut config.seek_on_drag_release, "Seek after resizing a clip");
    ui.checkbox(&mut config.follow_playhead, "Follow playhead");

    if &config != state.timeline.config() {
        state.timeline.set_config(config);
    }
}
