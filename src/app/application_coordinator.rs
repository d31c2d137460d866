//! Application-level coordination and workflow management.
//!
//! Handles high-level operations like loading media, reacting to timeline
//! notifications, simulated playback and keyboard/toolbar commands.

use crate::app::AppState;
use crate::io::{KeyframeLoader, LoadResult, LoadedMedia};
use crate::state::PlaybackStep;
use std::path::PathBuf;
use vcutter::TimelineEvent;

/// Timeline commands issued by shortcuts, toolbar buttons and the selections panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineCommand {
    TogglePlayback,
    /// Register a new selection start at the playhead
    MarkStart,
    /// Complete the pending selection at the playhead
    MarkEnd,
    CancelPending,
    /// Delete the selection under the playhead
    DeleteAtPlayhead,
    DeleteSelection(usize),
    ClearSelections,
    SeekTo(i64),
    ZoomAuto,
    ZoomOverview,
    Recenter,
}

/// Coordinates application-level operations and workflows.
pub struct ApplicationCoordinator;

impl ApplicationCoordinator {
    /// Initiates asynchronous loading of a keyframe list.
    ///
    /// Immediately clears the previous media to show the loading indicator.
    pub fn open_keyframe_file(
        state: &mut AppState,
        loader: &mut KeyframeLoader,
        path: PathBuf,
        ctx: &egui::Context,
    ) {
        state.reset_media_state();
        loader.start_file_load(path, state.timeline.keyframes().clone(), ctx);
    }

    /// Generates virtual media with a reproducible keyframe list.
    pub fn open_virtual_media(state: &mut AppState, loader: &mut KeyframeLoader, seed: u64) {
        state.reset_media_state();
        match loader.load_virtual(seed, state.timeline.keyframes()) {
            Ok(media) => Self::apply_loaded_media(state, media),
            Err(e) => {
                state.error_message = Some(format!("Error generating virtual media: {}", e));
            }
        }
    }

    /// Checks for loading completion and applies results to application state.
    ///
    /// Called once per frame in the update loop.
    /// Returns true if a load operation completed (success or error).
    pub fn check_loading_completion(state: &mut AppState, loader: &mut KeyframeLoader) -> bool {
        match loader.check_completion() {
            LoadResult::Success(media) => {
                Self::apply_loaded_media(state, media);
                true
            }
            LoadResult::Error(error_msg) => {
                state.error_message = Some(format!("Error loading keyframes: {}", error_msg));
                state.timeline.clear_keyframes();
                true
            }
            LoadResult::None => false,
        }
    }

    fn apply_loaded_media(state: &mut AppState, media: LoadedMedia) {
        state.timeline.set_duration(media.duration);
        state.media.load(media.source, media.duration, media.keyframe_count);
        state.error_message = None;
    }

    /// Reacts to the notifications the timeline queued during input handling.
    pub fn handle_timeline_events(state: &mut AppState) {
        for event in state.drain_timeline_events() {
            match event {
                TimelineEvent::PositionChangeRequested(position) => Self::seek(state, position),
                TimelineEvent::SelectionsChanged => {
                    log::debug!(
                        "{} selections, {} ms selected",
                        state.timeline.selections().len(),
                        state.timeline.selections().total_selected()
                    );
                }
                TimelineEvent::HoverPositionChanged(_) => {}
            }
        }
    }

    /// Moves the playhead, clamped to the media.
    pub fn seek(state: &mut AppState, position: i64) {
        let position = position.clamp(0, state.media.duration());
        state.timeline.set_current_position(position);
    }

    /// Advances simulated playback by `elapsed_ms`.
    ///
    /// Returns true while playback continues, so the caller keeps repainting.
    pub fn advance_playback(state: &mut AppState, elapsed_ms: i64) -> bool {
        if !state.playback.is_playing() || !state.media.is_loaded() {
            return false;
        }

        let step = state.playback.step(
            state.timeline.position(),
            elapsed_ms,
            state.media.duration(),
            state.timeline.selections(),
        );
        match step {
            PlaybackStep::Playing(position) => {
                state.timeline.set_current_position(position);
                true
            }
            PlaybackStep::Finished(position) => {
                state.timeline.set_current_position(position);
                state.playback.pause();
                false
            }
        }
    }

    /// Executes a timeline command.
    pub fn execute(state: &mut AppState, command: TimelineCommand) {
        let position = state.timeline.position();
        match command {
            TimelineCommand::TogglePlayback => {
                if state.media.is_loaded() {
                    state.playback.toggle();
                }
            }
            TimelineCommand::MarkStart => {
                if state.timeline.selections().can_start_at(position) {
                    state.timeline.register_new_selection_start(position);
                } else {
                    log::debug!("cannot start a selection inside another one at {position}");
                }
            }
            TimelineCommand::MarkEnd => {
                if state.timeline.new_selection_start().is_some()
                    && !state.timeline.register_new_selection_end(position)
                {
                    state.error_message = Some("Selection would overlap an existing one".to_string());
                }
            }
            TimelineCommand::CancelPending => state.timeline.cancel_new_selection(),
            TimelineCommand::DeleteAtPlayhead => {
                if let Some(index) = state.timeline.selections().is_at(position) {
                    state.timeline.delete_selection(index);
                }
            }
            TimelineCommand::DeleteSelection(index) => {
                if index < state.timeline.selections().len() {
                    state.timeline.delete_selection(index);
                }
            }
            TimelineCommand::ClearSelections => state.timeline.clear_selections(),
            TimelineCommand::SeekTo(target) => {
                Self::seek(state, target);
                state.timeline.go_to_position(target);
            }
            TimelineCommand::ZoomAuto => state.timeline.zoom_auto(),
            TimelineCommand::ZoomOverview => state.timeline.zoom_to_overview(),
            TimelineCommand::Recenter => state.timeline.recenter_on_current_position(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vcutter::PointerEvent;

    fn loaded_state() -> (AppState, KeyframeLoader) {
        let mut state = AppState::new();
        let mut loader = KeyframeLoader::new();
        state.timeline.set_visible_width(1000);
        ApplicationCoordinator::open_virtual_media(&mut state, &mut loader, 7);
        (state, loader)
    }

    #[test]
    fn test_open_virtual_media() {
        let (state, _loader) = loaded_state();
        assert!(state.media.is_loaded());
        assert_eq!(state.timeline.viewport().total_duration(), state.media.duration());
        assert_eq!(state.timeline.keyframes().len(), state.media.keyframe_count());
    }

    #[test]
    fn test_click_seeks_through_event_queue() {
        let (mut state, _loader) = loaded_state();
        state.timeline.pointer_down(PointerEvent::primary(250.0));
        state.timeline.pointer_up(PointerEvent::primary(250.0));
        ApplicationCoordinator::handle_timeline_events(&mut state);

        assert_eq!(state.timeline.position(), state.media.duration() / 4);
    }

    #[test]
    fn test_mark_start_and_end_at_playhead() {
        let (mut state, _loader) = loaded_state();
        ApplicationCoordinator::seek(&mut state, 10_000);
        ApplicationCoordinator::execute(&mut state, TimelineCommand::MarkStart);
        ApplicationCoordinator::seek(&mut state, 20_000);
        ApplicationCoordinator::execute(&mut state, TimelineCommand::MarkEnd);

        assert_eq!(state.timeline.selections().len(), 1);
        assert_eq!(state.timeline.new_selection_start(), None);

        ApplicationCoordinator::seek(&mut state, 15_000);
        ApplicationCoordinator::execute(&mut state, TimelineCommand::DeleteAtPlayhead);
        assert!(state.timeline.selections().is_empty());
    }

    #[test]
    fn test_playback_stops_at_end() {
        let (mut state, _loader) = loaded_state();
        let duration = state.media.duration();
        ApplicationCoordinator::seek(&mut state, duration - 10);
        ApplicationCoordinator::execute(&mut state, TimelineCommand::TogglePlayback);

        assert!(!ApplicationCoordinator::advance_playback(&mut state, 40));
        assert_eq!(state.timeline.position(), duration);
        assert!(!state.playback.is_playing());
    }
}
