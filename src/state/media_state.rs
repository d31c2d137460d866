//! Loaded media state.
//!
//! Tracks where the current duration and keyframes came from. The timeline
//! itself owns the duration used for drawing; this is what the status bar and
//! the window title show.

use std::path::{Path, PathBuf};

/// Origin of the loaded media.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaSource {
    /// A keyframe list produced by ffprobe
    KeyframeList(PathBuf),
    /// Generated in memory
    Virtual { seed: u64 },
}

/// State related to the loaded media.
#[derive(Debug, Default)]
pub struct MediaState {
    source: Option<MediaSource>,
    duration: i64,
    keyframe_count: usize,
    /// Directory the file dialog opens in
    last_directory: Option<PathBuf>,
}

impl MediaState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_last_directory(last_directory: Option<PathBuf>) -> Self {
        Self {
            last_directory,
            ..Self::default()
        }
    }

    // ===== Media Queries =====

    pub fn source(&self) -> Option<&MediaSource> {
        self.source.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.source.is_some()
    }

    pub fn duration(&self) -> i64 {
        self.duration
    }

    pub fn keyframe_count(&self) -> usize {
        self.keyframe_count
    }

    pub fn last_directory(&self) -> Option<&Path> {
        self.last_directory.as_deref()
    }

    /// Short name for the title bar and status bar.
    pub fn display_name(&self) -> String {
        match &self.source {
            Some(MediaSource::KeyframeList(path)) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            Some(MediaSource::Virtual { seed }) => format!("Virtual media (seed {})", seed),
            None => "No media".to_string(),
        }
    }

    // ===== Media Mutations =====

    /// Records a completed load.
    pub fn load(&mut self, source: MediaSource, duration: i64, keyframe_count: usize) {
        if let MediaSource::KeyframeList(path) = &source {
            if let Some(parent) = path.parent() {
                self.last_directory = Some(parent.to_path_buf());
            }
        }
        self.source = Some(source);
        self.duration = duration;
        self.keyframe_count = keyframe_count;
    }

    /// Forgets the loaded media; the last directory is kept.
    pub fn clear(&mut self) {
        self.source = None;
        self.duration = 0;
        self.keyframe_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_remembers_directory() {
        let mut media = MediaState::new();
        media.load(
            MediaSource::KeyframeList(PathBuf::from("/videos/trip/keyframes.csv")),
            90_000,
            45,
        );
        assert_eq!(media.display_name(), "keyframes.csv");
        assert_eq!(media.last_directory(), Some(Path::new("/videos/trip")));

        media.clear();
        assert!(!media.is_loaded());
        assert_eq!(media.duration(), 0);
        assert_eq!(media.last_directory(), Some(Path::new("/videos/trip")));
    }
}
