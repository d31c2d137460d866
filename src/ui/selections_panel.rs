//! Selections panel UI rendering
//!
//! Lists the selections with their bounds and length. Each row can seek to
//! the selection start or delete the selection.

use eframe::egui;
use egui::RichText;
use vcutter::time_axis::format_timestamp;
use crate::app::{AppState, TimelineCommand};
use crate::utils::format_seconds;

/// Renders the selection list.
///
/// # Returns
/// The command of the clicked row button, if any
pub fn render_selections_panel(ui: &mut egui::Ui, state: &AppState) -> Option<TimelineCommand> {
    let mut command = None;
    let selections = state.timeline.selections();
    let colors = state.theme.colors();

    ui.horizontal(|ui| {
        ui.heading("Selections");
        if !selections.is_empty() && ui.button("🗑 Clear All").clicked() {
            command = Some(TimelineCommand::ClearSelections);
        }
    });
    ui.separator();

    if selections.is_empty() {
        ui.label(RichText::new("Middle-click the timeline, or press I and O, to mark a clip").color(colors.text_dim));
        return command;
    }

    let under_playhead = selections.is_at(state.timeline.position());

    egui::ScrollArea::vertical()
        .id_salt("selections_scroll_area")
        .show(ui, |ui| {
            egui::Grid::new("selections_grid")
                .num_columns(5)
                .striped(true)
                .show(ui, |ui| {
                    for (index, range) in selections.iter().enumerate() {
                        let label = RichText::new(format!("#{}", index + 1));
                        let label = if under_playhead == Some(index) {
                            label.strong().color(colors.playhead)
                        } else {
                            label
                        };
                        ui.label(label);
                        ui.monospace(format_timestamp(range.start));
                        ui.monospace(format_timestamp(range.end));
                        ui.label(format_seconds(range.duration()));

                        ui.horizontal(|ui| {
                            if ui.small_button("⏮").on_hover_text("Go to start").clicked() {
                                command = Some(TimelineCommand::SeekTo(range.start));
                            }
                            if ui.small_button("🗑").on_hover_text("Delete").clicked() {
                                command = Some(TimelineCommand::DeleteSelection(index));
                            }
                        });
                        ui.end_row();
                    }
                });
        });

    command
}
