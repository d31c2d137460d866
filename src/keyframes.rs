//! Keyframe overlay buffer shared between a producer thread and the UI.
//!
//! Keyframes are only drawn, never used for selection logic. The producer
//! (a decoder or a keyframe list reader) replaces the whole list from its own
//! thread; the UI thread reads it while painting. Both sides go through the
//! same mutex, and the producer asks the UI thread to repaint through a
//! [`RepaintSignal`] instead of painting itself.

use std::sync::{Arc, Mutex, MutexGuard};

/// A decode-friendly timestamp in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Keyframe {
    pub position: i64,
}

impl Keyframe {
    pub fn new(position: i64) -> Self {
        Self { position }
    }
}

/// Cross-thread request for the UI thread to repaint.
pub trait RepaintSignal: Send + Sync {
    fn request_repaint(&self);
}

impl RepaintSignal for egui::Context {
    fn request_repaint(&self) {
        egui::Context::request_repaint(self);
    }
}

/// Cloneable handle to the locked keyframe list.
#[derive(Clone, Default)]
pub struct KeyframeBuffer {
    keyframes: Arc<Mutex<Vec<Keyframe>>>,
    repaint: Option<Arc<dyn RepaintSignal>>,
}

impl std::fmt::Debug for KeyframeBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyframeBuffer")
            .field("len", &self.len())
            .field("has_repaint_signal", &self.repaint.is_some())
            .finish()
    }
}

impl KeyframeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer that signals `repaint` after every write.
    pub fn with_repaint_signal(repaint: Arc<dyn RepaintSignal>) -> Self {
        Self {
            keyframes: Arc::new(Mutex::new(Vec::new())),
            repaint: Some(repaint),
        }
    }

    /// Installs the repaint signal on this handle and on clones made afterwards.
    pub fn set_repaint_signal(&mut self, repaint: Arc<dyn RepaintSignal>) {
        self.repaint = Some(repaint);
    }

    // A poisoned lock can only come from a panic inside one of the short
    // critical sections below, none of which leave the Vec half-written.
    fn lock(&self) -> MutexGuard<'_, Vec<Keyframe>> {
        self.keyframes.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Replaces the whole list, sorted by position, then signals a repaint.
    pub fn replace_all(&self, mut keyframes: Vec<Keyframe>) {
        keyframes.sort_unstable();
        let count = keyframes.len();
        {
            let mut guard = self.lock();
            *guard = keyframes;
        }
        log::info!("registered {count} keyframes");
        self.signal();
    }

    pub fn clear(&self) {
        self.lock().clear();
        self.signal();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copies the current list.
    pub fn snapshot(&self) -> Vec<Keyframe> {
        self.lock().clone()
    }

    /// Runs `f` over the keyframes in `[from, to]` while holding the lock.
    pub fn with_range<R>(&self, from: i64, to: i64, f: impl FnOnce(&[Keyframe]) -> R) -> R {
        let guard = self.lock();
        let lo = guard.partition_point(|k| k.position < from);
        let hi = guard.partition_point(|k| k.position <= to);
        f(&guard[lo..hi.max(lo)])
    }

    fn signal(&self) {
        if let Some(repaint) = &self.repaint {
            repaint.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[derive(Default)]
    struct CountingSignal(AtomicUsize);

    impl RepaintSignal for CountingSignal {
        fn request_repaint(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_replace_all_sorts() {
        let buffer = KeyframeBuffer::new();
        buffer.replace_all(vec![Keyframe::new(3000), Keyframe::new(1000), Keyframe::new(2000)]);
        assert_eq!(
            buffer.snapshot(),
            vec![Keyframe::new(1000), Keyframe::new(2000), Keyframe::new(3000)]
        );
    }

    #[test]
    fn test_with_range() {
        let buffer = KeyframeBuffer::new();
        buffer.replace_all((0..10).map(|i| Keyframe::new(i * 1000)).collect());
        let inside = buffer.with_range(2000, 4500, |k| k.to_vec());
        assert_eq!(inside, vec![Keyframe::new(2000), Keyframe::new(3000), Keyframe::new(4000)]);
        assert_eq!(buffer.with_range(5000, 1000, |k| k.len()), 0);
    }

    #[test]
    fn test_producer_thread_signals_repaint() {
        let signal = Arc::new(CountingSignal::default());
        let buffer = KeyframeBuffer::with_repaint_signal(signal.clone());

        let producer = buffer.clone();
        thread::spawn(move || {
            producer.replace_all(vec![Keyframe::new(500), Keyframe::new(1500)]);
            producer.clear();
            producer.replace_all(vec![Keyframe::new(2500)]);
        })
        .join()
        .unwrap();

        assert_eq!(buffer.snapshot(), vec![Keyframe::new(2500)]);
        assert_eq!(signal.0.load(Ordering::SeqCst), 3);
    }
}
