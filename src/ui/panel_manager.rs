//! Panel orchestration and layout management.
//!
//! Coordinates all UI panels (header, timeline, selections, status) and
//! collects the interactions the application coordinator has to handle.

use crate::app::{AppState, TimelineCommand};
use crate::io::KeyframeLoader;
use crate::ui::{header, selections_panel, status_bar, timeline_panel};

/// Result of panel interactions that need to be handled by the application coordinator.
pub enum PanelInteraction {
    /// User requested to open a keyframe list
    OpenFileRequested(std::path::PathBuf),
    /// User requested virtual media
    OpenVirtualMediaRequested,
    /// A button asked for a timeline command
    Command(TimelineCommand),
}

/// Manages the layout and rendering of all UI panels.
pub struct PanelManager;

impl PanelManager {
    /// Renders all panels in the application window.
    ///
    /// Timeline input is applied to the timeline directly while rendering;
    /// its notifications are queued and handled afterwards.
    pub fn render_all_panels(
        ctx: &egui::Context,
        state: &mut AppState,
        loader: &KeyframeLoader,
    ) -> Option<PanelInteraction> {
        let mut interaction: Option<PanelInteraction> = None;

        // Header panel at the top
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            if let Some(header_interaction) = header::render_header(ui, state) {
                interaction = Some(match header_interaction {
                    header::HeaderInteraction::OpenFileRequested(path) => {
                        PanelInteraction::OpenFileRequested(path)
                    }
                    header::HeaderInteraction::OpenVirtualMediaRequested => {
                        PanelInteraction::OpenVirtualMediaRequested
                    }
                    header::HeaderInteraction::Command(command) => PanelInteraction::Command(command),
                });
            }
        });

        // Status panel at the very bottom
        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            status_bar::render_status_bar(ui, state);
        });

        // Timeline strip below the header
        let timeline_frame = egui::Frame::default()
            .inner_margin(egui::Margin::same(4))
            .fill(ctx.style().visuals.panel_fill);

        egui::TopBottomPanel::top("timeline_panel")
            .frame(timeline_frame)
            .show(ctx, |ui| {
                timeline_panel::render_timeline_panel(ui, state, loader);
            });

        // Remaining space: selection list
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(command) = selections_panel::render_selections_panel(ui, state) {
                interaction = Some(PanelInteraction::Command(command));
            }
        });

        interaction
    }
}
