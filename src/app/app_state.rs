//! Centralized application state for the video cutter window.
//!
//! Composes the interaction core with focused state components that each
//! manage one aspect of the window:
//! - Keeps invariants local within each component
//! - Allows borrow-checker friendly access to different state aspects

use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use vcutter::{KeyframeBuffer, Timeline, TimelineConfig, TimelineEvent};
use crate::state::{MediaState, PlaybackState, ThemeState};

/// Main application state.
pub struct AppState {
    // ===== Focused State Components =====
    /// Selections, viewport, drag and playhead
    pub timeline: Timeline,

    /// Loaded media summary
    pub media: MediaState,

    /// Simulated playback
    pub playback: PlaybackState,

    /// Theme and styling state
    pub theme: ThemeState,

    // ===== Top-Level State =====
    /// Current error message to display (if any)
    pub error_message: Option<String>,

    /// Notifications from the timeline, drained once per frame
    timeline_events: Receiver<TimelineEvent>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(ThemeState::new(), TimelineConfig::default(), None, KeyframeBuffer::new())
    }

    /// Creates the state from persisted settings.
    ///
    /// # Arguments
    /// * `theme` - Theme restored from storage
    /// * `config` - Timeline tuning restored from storage
    /// * `last_directory` - Directory the file dialog opens in
    /// * `keyframes` - Keyframe buffer, usually wired to repaint the window
    pub fn with_settings(
        theme: ThemeState,
        config: TimelineConfig,
        last_directory: Option<PathBuf>,
        keyframes: KeyframeBuffer,
    ) -> Self {
        let mut timeline = Timeline::new(config).with_keyframe_buffer(keyframes);
        let timeline_events = timeline.event_channel();

        Self {
            timeline,
            media: MediaState::with_last_directory(last_directory),
            playback: PlaybackState::new(),
            theme,
            error_message: None,
            timeline_events,
        }
    }

    // ===== High-Level Coordination Methods =====

    /// Resets media-related state before loading new media.
    pub fn reset_media_state(&mut self) {
        self.playback.pause();
        self.media.clear();
        self.timeline.clear_keyframes();
        self.timeline.set_duration(0);
        self.error_message = None;
    }

    /// Takes all timeline notifications queued since the last call.
    pub fn drain_timeline_events(&mut self) -> Vec<TimelineEvent> {
        self.timeline_events.try_iter().collect()
    }
}
