//! I/O modules for keyframe list loading.

pub mod file_loader;
pub mod keyframe_loader;

// Re-export commonly used types
pub use file_loader::LoadingState;
pub use keyframe_loader::{KeyframeLoader, LoadResult, LoadedMedia};
