//! Input handling subsystem for UI interactions.
//!
//! - Timeline pointer and wheel input
//! - Keyboard shortcuts

pub mod timeline_input_handler;
