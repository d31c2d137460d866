//! UI panel rendering subsystem
//!
//! - Header panel (media controls, zoom, settings, theme selector)
//! - Timeline panel (the interactive timeline strip)
//! - Selections panel (list of clips)
//! - Status bar (memory and media summary)
//! - Panel manager (panel orchestration and layout)
//! - Input handling (pointer, wheel, keyboard)

pub mod header;
pub mod timeline_panel;
pub mod selections_panel;
pub mod status_bar;
pub mod panel_manager;
pub mod input;
