//! Video Cutter GUI Application
//!
//! An interactive window around the `vcutter` timeline core, built with egui.
//! The window features:
//! - Timeline with pan, zoom, keyframe ticks and clip selections
//! - Boundary dragging and middle-click clip marking
//! - Simulated playback, optionally restricted to the selected clips
//! - Asynchronous keyframe list loading with a loading indicator
//! - Multiple themes and persistent timeline settings
//!
//! The application is built with a modular architecture:
//! - `app/` - Application state management and coordination
//! - `state/` - Media, playback and theme state
//! - `io/` - Background keyframe list loading
//! - `ui/` - UI panel rendering and input handling
//! - `rendering/` - Low-level painting of the timeline strips
//! - `utils/` - Formatting helpers

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;
use std::path::PathBuf;
use std::sync::Arc;

mod utils;
mod io;
mod app;
mod rendering;
mod ui;
mod state;

use app::{AppState, ApplicationCoordinator, ThemeCoordinator, SettingsCoordinator};
use io::KeyframeLoader;
use state::ThemeState;
use ui::input::timeline_input_handler;
use ui::panel_manager::{PanelInteraction, PanelManager};
use vcutter::KeyframeBuffer;

/// Seed used by "Virtual Media"
const VIRTUAL_MEDIA_SEED: u64 = 42;

/// Main entry point: sets up logging and launches the window.
fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Optional keyframe list to load on startup
    let initial_file = std::env::args()
        .nth(1)
        .map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 400.0])
            .with_title("Video Cutter"),
        ..Default::default()
    };

    eframe::run_native(
        "Video Cutter",
        options,
        Box::new(move |cc| Ok(Box::new(VideoCutterApp::new(cc, initial_file)))),
    )
}

/// The main application, delegating to coordinators:
/// - `ApplicationCoordinator` handles loading, commands, playback and timeline notifications
/// - `ThemeCoordinator` and `SettingsCoordinator` handle persistence
/// - `PanelManager` handles UI panel layout and rendering
struct VideoCutterApp {
    /// Centralized application state
    state: AppState,
    /// Background keyframe loader
    loader: KeyframeLoader,
    /// Optional file to load on first frame
    pending_file_load: Option<PathBuf>,
}

impl VideoCutterApp {
    /// Creates the application with settings restored from persistent storage.
    fn new(cc: &eframe::CreationContext, initial_file: Option<PathBuf>) -> Self {
        let theme_name = ThemeCoordinator::load_theme_from_storage(cc.storage);
        let config = SettingsCoordinator::load_timeline_config(cc.storage);
        let last_directory = SettingsCoordinator::load_last_directory(cc.storage);

        // The loader thread fills this buffer and wakes the UI thread through it
        let keyframes = KeyframeBuffer::with_repaint_signal(Arc::new(cc.egui_ctx.clone()));

        Self {
            state: AppState::with_settings(ThemeState::with_theme(&theme_name), config, last_directory, keyframes),
            loader: KeyframeLoader::new(),
            pending_file_load: initial_file,
        }
    }

    fn handle_panel_interaction(&mut self, interaction: PanelInteraction, ctx: &egui::Context) {
        match interaction {
            PanelInteraction::OpenFileRequested(path) => {
                ApplicationCoordinator::open_keyframe_file(&mut self.state, &mut self.loader, path, ctx);
            }
            PanelInteraction::OpenVirtualMediaRequested => {
                ApplicationCoordinator::open_virtual_media(&mut self.state, &mut self.loader, VIRTUAL_MEDIA_SEED);
                self.update_title(ctx);
            }
            PanelInteraction::Command(command) => {
                ApplicationCoordinator::execute(&mut self.state, command);
            }
        }
    }

    fn update_title(&self, ctx: &egui::Context) {
        ctx.send_viewport_cmd(egui::ViewportCommand::Title(format!(
            "Video Cutter - {}",
            self.state.media.display_name()
        )));
    }

    fn save_preferences(&self, storage: &mut dyn eframe::Storage) {
        ThemeCoordinator::save_theme_to_storage(storage, self.state.theme.current_theme_name());
        SettingsCoordinator::save_timeline_settings(
            storage,
            self.state.timeline.config(),
            self.state.media.last_directory(),
        );
    }
}

impl eframe::App for VideoCutterApp {
    /// Called when the app is being shut down - ensures preferences are saved.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.save_preferences(storage);
    }

    /// Main update loop:
    /// 1. Pick up finished loads
    /// 2. Apply theme
    /// 3. Load the command-line file (first frame only)
    /// 4. Keyboard shortcuts and simulated playback
    /// 5. Render all panels, then react to their interactions and to timeline notifications
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ApplicationCoordinator::check_loading_completion(&mut self.state, &mut self.loader) {
            self.update_title(ctx);
        }

        ThemeCoordinator::apply_current_theme(ctx, &self.state);

        if let Some(path) = self.pending_file_load.take() {
            ApplicationCoordinator::open_keyframe_file(&mut self.state, &mut self.loader, path, ctx);
        }

        for command in timeline_input_handler::shortcut_commands(ctx) {
            ApplicationCoordinator::execute(&mut self.state, command);
        }

        let elapsed_ms = (ctx.input(|i| i.stable_dt) * 1000.0).round() as i64;
        if ApplicationCoordinator::advance_playback(&mut self.state, elapsed_ms) {
            ctx.request_repaint();
        }

        if let Some(interaction) = PanelManager::render_all_panels(ctx, &mut self.state, &self.loader) {
            self.handle_panel_interaction(interaction, ctx);
        }

        ApplicationCoordinator::handle_timeline_events(&mut self.state);
    }
}
