//! State management modules for the video cutter window.
//!
//! This module contains state-only logic (no UI concerns):
//! - Media state (where the duration and keyframes came from)
//! - Playback state (simulated playhead advance)
//! - Theme state (theme manager, current theme)
//!
//! The timeline itself lives in `vcutter::Timeline`.

mod media_state;
mod playback_state;
mod theme_state;

pub use media_state::{MediaSource, MediaState};
pub use playback_state::{PlaybackState, PlaybackStep};
pub use theme_state::ThemeState;
