//! Shared state of a background keyframe load.

use std::path::PathBuf;

/// Holds the state of an async loading operation.
///
/// Wrapped in an `Arc<Mutex<>>` and shared with the loading thread; results
/// come through a channel.
#[derive(Debug, Default)]
pub struct LoadingState {
    /// True while a load is running
    pub in_progress: bool,
    /// File being loaded
    pub path: Option<PathBuf>,
    /// Bumped by every new load or cancellation; a thread whose generation
    /// no longer matches must not publish anything
    pub generation: u64,
}

impl LoadingState {
    pub fn new() -> Self {
        Self::default()
    }
}
