//! Utility modules for the video cutter window.

pub mod formatting;

// Re-export commonly used functions
pub use formatting::{format_seconds, get_current_memory_mb, format_memory_mb};
