//! Asynchronous keyframe list loading.
//!
//! Reads keyframe lists on a background thread, keeping the GUI responsive
//! while large probe listings are parsed. The thread writes the keyframes
//! straight into the shared [`KeyframeBuffer`]; only the duration and the
//! outcome travel back over the channel.

use eframe::egui;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use anyhow::anyhow;
use vcutter::{FfprobeKeyframeReader, KeyframeBuffer, KeyframeList, KeyframeSource, VirtualKeyframeSource};
use crate::io::LoadingState;
use crate::state::MediaSource;

/// Duration and keyframe count of a finished load.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedMedia {
    pub source: MediaSource,
    pub duration: i64,
    pub keyframe_count: usize,
}

/// Result of a completed loading operation.
pub enum LoadResult {
    /// Loading completed successfully
    Success(LoadedMedia),
    /// Loading failed with an error
    Error(String),
    /// No loading operation in progress
    None,
}

/// Manages asynchronous loading of keyframe lists.
pub struct KeyframeLoader {
    /// Shared loading state flag
    loading_state: Arc<Mutex<LoadingState>>,

    /// Channel receiver for loading results
    loading_receiver: Option<Receiver<Result<LoadedMedia, String>>>,
}

impl KeyframeLoader {
    pub fn new() -> Self {
        Self {
            loading_state: Arc::new(Mutex::new(LoadingState::new())),
            loading_receiver: None,
        }
    }

    fn state(&self) -> MutexGuard<'_, LoadingState> {
        self.loading_state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Checks if a loading operation is currently in progress.
    pub fn is_loading(&self) -> bool {
        self.state().in_progress
    }

    /// Path being loaded, if any.
    pub fn pending_path(&self) -> Option<PathBuf> {
        self.state().path.clone()
    }

    /// Starts loading an ffprobe keyframe list asynchronously.
    ///
    /// Call `check_completion()` once per frame to pick up the result.
    ///
    /// # Arguments
    /// * `path` - Path to the `.csv` or `.csv.br` listing
    /// * `keyframes` - Buffer the background thread fills
    /// * `ctx` - egui context for requesting a repaint when loading completes
    pub fn start_file_load(&mut self, path: PathBuf, keyframes: KeyframeBuffer, ctx: &egui::Context) {
        let (sender, receiver) = channel();
        self.loading_receiver = Some(receiver);

        let generation = {
            let mut state = self.state();
            state.generation += 1;
            state.in_progress = true;
            state.path = Some(path.clone());
            state.generation
        };

        let loading_state = Arc::clone(&self.loading_state);
        let ctx_handle = ctx.clone();
        log::info!("loading keyframe list {}", path.display());

        thread::spawn(move || {
            let path_string = path.to_string_lossy().into_owned();
            let result = FfprobeKeyframeReader::new().read(&path_string);
            finish_file_load(
                &loading_state,
                generation,
                result,
                MediaSource::KeyframeList(path),
                &keyframes,
                &sender,
            );
            ctx_handle.request_repaint();
        });
    }

    /// Abandons a running file load; its thread will publish nothing.
    pub fn cancel(&mut self) {
        self.loading_receiver = None;
        let mut state = self.state();
        if state.in_progress {
            log::info!("keyframe list loading cancelled");
        }
        state.generation += 1;
        state.in_progress = false;
        state.path = None;
    }

    /// Generates a virtual keyframe list in-memory, replacing any running load.
    ///
    /// Generation is fast, so this runs synchronously.
    pub fn load_virtual(&mut self, seed: u64, keyframes: &KeyframeBuffer) -> Result<LoadedMedia, String> {
        self.cancel();
        let source = VirtualKeyframeSource::with_config(10 * 60 * 1000, 2000, seed);
        source
            .read("")
            .and_then(|list| publish(list, MediaSource::Virtual { seed }, keyframes))
            .map_err(|e| e.to_string())
    }

    /// Returns the result of the background load if it has finished.
    pub fn check_completion(&mut self) -> LoadResult {
        if let Some(receiver) = &self.loading_receiver {
            if let Ok(result) = receiver.try_recv() {
                self.loading_receiver = None;
                return match result {
                    Ok(media) => LoadResult::Success(media),
                    Err(error_msg) => LoadResult::Error(error_msg),
                };
            }
        }

        LoadResult::None
    }
}

impl Default for KeyframeLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Publishes the outcome of a background load, unless a newer load or a
/// cancellation superseded it.
///
/// The loading state stays locked while the buffer is replaced, so a newer
/// load cannot start in between.
fn finish_file_load(
    loading_state: &Mutex<LoadingState>,
    generation: u64,
    result: anyhow::Result<KeyframeList>,
    source: MediaSource,
    keyframes: &KeyframeBuffer,
    sender: &Sender<Result<LoadedMedia, String>>,
) {
    let mut state = loading_state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if state.generation != generation {
        log::debug!("dropping result of superseded keyframe load {}", generation);
        return;
    }

    let result = result
        .and_then(|list| publish(list, source, keyframes))
        .map_err(|e| format!("{:#}", e));
    if let Err(e) = &result {
        log::warn!("keyframe list loading failed: {}", e);
    }
    let _ = sender.send(result);

    state.in_progress = false;
    state.path = None;
}

/// Moves the keyframes into the shared buffer and keeps the summary.
fn publish(list: KeyframeList, source: MediaSource, keyframes: &KeyframeBuffer) -> anyhow::Result<LoadedMedia> {
    let duration = list
        .duration
        .filter(|d| *d > 0)
        .ok_or_else(|| anyhow!("Keyframe list has no timestamps"))?;
    let keyframe_count = list.keyframes.len();
    keyframes.replace_all(list.keyframes);

    Ok(LoadedMedia {
        source,
        duration,
        keyframe_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::{Duration, Instant};
    use vcutter::Keyframe;

    fn list(positions: &[i64]) -> KeyframeList {
        KeyframeList {
            keyframes: positions.iter().copied().map(Keyframe::new).collect(),
            duration: positions.last().copied(),
        }
    }

    fn wait_for_result(loader: &mut KeyframeLoader) -> LoadResult {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            match loader.check_completion() {
                LoadResult::None if Instant::now() < deadline => thread::sleep(Duration::from_millis(5)),
                result => return result,
            }
        }
    }

    fn write_list(name: &str, packets: usize) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut csv = String::new();
        for i in 0..packets {
            let flags = if i % 25 == 0 { "K__" } else { "___" };
            csv.push_str(&format!("packet,{:.6},{}\n", i as f64 * 0.04, flags));
        }
        fs::write(&path, csv).unwrap();
        path
    }

    #[test]
    fn test_superseded_result_is_dropped() {
        let loading_state = Mutex::new(LoadingState {
            in_progress: true,
            path: None,
            generation: 2,
        });
        let buffer = KeyframeBuffer::new();
        let (sender, receiver) = channel();

        finish_file_load(
            &loading_state,
            1,
            Ok(list(&[0, 2000, 4000])),
            MediaSource::Virtual { seed: 1 },
            &buffer,
            &sender,
        );

        assert!(buffer.is_empty());
        assert!(receiver.try_recv().is_err());
        assert!(loading_state.lock().unwrap().in_progress, "the newer load is still running");
    }

    #[test]
    fn test_current_result_is_published() {
        let loading_state = Mutex::new(LoadingState {
            in_progress: true,
            path: None,
            generation: 3,
        });
        let buffer = KeyframeBuffer::new();
        let (sender, receiver) = channel();

        finish_file_load(
            &loading_state,
            3,
            Ok(list(&[0, 2000])),
            MediaSource::Virtual { seed: 1 },
            &buffer,
            &sender,
        );

        let media = receiver.try_recv().unwrap().unwrap();
        assert_eq!(media.keyframe_count, 2);
        assert_eq!(buffer.len(), 2);
        assert!(!loading_state.lock().unwrap().in_progress);
    }

    #[test]
    fn test_second_file_load_wins() {
        let large = write_list("vcutter_loader_large.csv", 200_000);
        let small = write_list("vcutter_loader_small.csv", 51);
        let ctx = egui::Context::default();
        let mut loader = KeyframeLoader::new();
        let buffer = KeyframeBuffer::new();

        loader.start_file_load(large.clone(), buffer.clone(), &ctx);
        loader.start_file_load(small.clone(), buffer.clone(), &ctx);

        let LoadResult::Success(media) = wait_for_result(&mut loader) else {
            panic!("small list did not load");
        };
        assert_eq!(media.keyframe_count, 3);
        assert_eq!(media.source, MediaSource::KeyframeList(small.clone()));

        // Give the superseded thread time to finish parsing
        thread::sleep(Duration::from_millis(500));
        assert_eq!(buffer.len(), media.keyframe_count);
        assert!(!loader.is_loading());

        let _ = fs::remove_file(large);
        let _ = fs::remove_file(small);
    }

    #[test]
    fn test_virtual_media_cancels_file_load() {
        let path = write_list("vcutter_loader_cancelled.csv", 1000);
        let ctx = egui::Context::default();
        let mut loader = KeyframeLoader::new();
        let buffer = KeyframeBuffer::new();

        loader.start_file_load(path.clone(), buffer.clone(), &ctx);
        let media = loader.load_virtual(42, &buffer).unwrap();
        assert!(!loader.is_loading());

        thread::sleep(Duration::from_millis(200));
        assert!(matches!(loader.check_completion(), LoadResult::None));
        assert_eq!(buffer.len(), media.keyframe_count);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_loader_creation() {
        let loader = KeyframeLoader::new();
        assert!(!loader.is_loading());
        assert_eq!(loader.pending_path(), None);
    }

    #[test]
    fn test_virtual_loading_fills_buffer() {
        let mut loader = KeyframeLoader::new();
        let buffer = KeyframeBuffer::new();
        let media = loader.load_virtual(42, &buffer).unwrap();
        assert_eq!(media.duration, 10 * 60 * 1000);
        assert_eq!(media.keyframe_count, buffer.len());
        assert!(media.keyframe_count > 200);
    }

    #[test]
    fn test_check_completion_when_idle() {
        let mut loader = KeyframeLoader::new();
        assert!(matches!(loader.check_completion(), LoadResult::None));
    }

    #[test]
    fn test_empty_list_is_an_error() {
        let buffer = KeyframeBuffer::new();
        let result = publish(KeyframeList::default(), MediaSource::Virtual { seed: 1 }, &buffer);
        assert!(result.is_err());
    }
}
