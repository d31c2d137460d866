//! Simulated playback state.
//!
//! There is no decoder behind the window, so the playhead advances with wall
//! time. With "play selections only" the playhead jumps over the gaps between
//! selections and stops after the last one.

use vcutter::SelectionSet;

/// Outcome of advancing the playhead by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStep {
    /// Keep playing from this position
    Playing(i64),
    /// Stop at this position
    Finished(i64),
}

#[derive(Debug, Default)]
pub struct PlaybackState {
    playing: bool,
    play_selections_only: bool,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn play_selections_only(&self) -> bool {
        self.play_selections_only
    }

    pub fn play_selections_only_mut(&mut self) -> &mut bool {
        &mut self.play_selections_only
    }

    pub fn toggle(&mut self) {
        self.playing = !self.playing;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Computes where the playhead goes after `elapsed_ms` of playback.
    ///
    /// # Arguments
    /// * `position` - Current playhead position
    /// * `elapsed_ms` - Wall time since the previous frame
    /// * `duration` - Media duration; playback stops there
    /// * `selections` - Consulted only in "play selections only" mode
    pub fn step(&self, position: i64, elapsed_ms: i64, duration: i64, selections: &SelectionSet) -> PlaybackStep {
        let mut next = position.saturating_add(elapsed_ms.max(0));

        if self.play_selections_only && !selections.is_empty() {
            match selections.find_next_valid_position(next) {
                Some(valid) => next = valid,
                None => {
                    let end = selections.overall_end().unwrap_or(position);
                    return PlaybackStep::Finished(end.min(duration));
                }
            }
        }

        if next >= duration {
            PlaybackStep::Finished(duration)
        } else {
            PlaybackStep::Playing(next)
        }
    }
}
