//! Theme support for the timeline
//!
//! Each theme carries the general egui colors plus the palette of the timeline
//! areas: info strip, tick strip, selection strip, markers and overlays.
//! Built-in themes: Slate (the classic grey timeline), Dark and Light.
//!
//! # Examples
//!
//! ```
//! use vcutter::theme::ThemeManager;
//!
//! let manager = ThemeManager::new();
//! let slate = manager.get_theme("Slate").unwrap();
//! println!("Playhead: {:?}", slate.colors.playhead);
//! ```

use egui::Color32;
use once_cell::sync::Lazy;

/// Name of the theme used when nothing (or something unknown) is persisted
pub const DEFAULT_THEME_NAME: &str = "Slate";

/// Complete color palette for a theme
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // General UI
    pub panel_background: Color32,
    pub extreme_background: Color32,
    pub text: Color32,
    pub text_dim: Color32,
    pub selection: Color32,
    pub hover: Color32,
    pub error: Color32,

    // Timeline areas
    pub timeline_background: Color32,
    pub info_area: Color32,
    pub info_area_window: Color32,
    pub info_text: Color32,
    pub ticks_area: Color32,
    pub selection_area: Color32,

    // Timeline marks
    pub big_tick: Color32,
    pub small_tick: Color32,
    pub keyframe_tick: Color32,
    pub selected_fill: Color32,
    pub selected_hatch: Color32,
    pub selection_marker: Color32,
    pub playhead: Color32,
    pub hover_marker: Color32,
    pub tooltip_background: Color32,
    pub tooltip_text: Color32,
}

/// A theme definition with metadata and palette
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub description: String,
    pub colors: ThemeColors,
}

static BUILTIN_THEMES: Lazy<Vec<Theme>> = Lazy::new(|| vec![slate_theme(), dark_theme(), light_theme()]);

/// Access to the built-in themes and the currently selected one
#[derive(Debug, Clone)]
pub struct ThemeManager {
    current_theme_name: String,
}

impl ThemeManager {
    pub fn new() -> Self {
        Self {
            current_theme_name: DEFAULT_THEME_NAME.to_string(),
        }
    }

    /// Retrieves a theme by name
    pub fn get_theme(&self, name: &str) -> Option<&'static Theme> {
        BUILTIN_THEMES.iter().find(|t| t.name == name)
    }

    /// Theme names in menu order
    pub fn list_themes(&self) -> Vec<&'static str> {
        BUILTIN_THEMES.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn current_theme(&self) -> &'static Theme {
        self.get_theme(&self.current_theme_name)
            .unwrap_or(&BUILTIN_THEMES[0])
    }

    pub fn current_theme_name(&self) -> &str {
        &self.current_theme_name
    }

    /// Sets the current theme by name
    pub fn set_current_theme(&mut self, name: &str) -> Result<(), String> {
        if self.get_theme(name).is_some() {
            self.current_theme_name = name.to_string();
            Ok(())
        } else {
            Err(format!("Theme '{}' not found", name))
        }
    }

    /// Applies a theme's general colors to egui visuals
    pub fn apply_theme(&self, theme: &Theme, visuals: &mut egui::Visuals) {
        let colors = &theme.colors;

        visuals.panel_fill = colors.panel_background;
        visuals.extreme_bg_color = colors.extreme_background;
        visuals.faint_bg_color = colors.hover;
        visuals.override_text_color = Some(colors.text);

        visuals.selection.bg_fill = colors.selection;
        visuals.selection.stroke.color = colors.playhead;

        visuals.widgets.noninteractive.bg_fill = colors.panel_background;
        visuals.widgets.inactive.bg_fill = colors.hover;
        visuals.widgets.hovered.bg_fill = colors.hover;
        visuals.widgets.active.bg_fill = colors.selection;

        visuals.error_fg_color = colors.error;
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}

/// The classic grey timeline on a light UI
fn slate_theme() -> Theme {
    Theme {
        name: "Slate".to_string(),
        description: "Grey timeline with blue playhead and red hover marker".to_string(),
        colors: ThemeColors {
            panel_background: Color32::from_rgb(248, 248, 248),
            extreme_background: Color32::from_rgb(255, 255, 255),
            text: Color32::from_rgb(0, 0, 0),
            text_dim: Color32::from_rgb(120, 120, 120),
            selection: Color32::from_rgb(180, 200, 255),
            hover: Color32::from_rgb(220, 220, 220),
            error: Color32::from_rgb(200, 40, 40),

            timeline_background: hex_to_color32("#adb5bd"),
            info_area: hex_to_color32("#adb5bd"),
            info_area_window: hex_to_color32("#6c757d"),
            info_text: hex_to_color32("#f8f9fa"),
            ticks_area: hex_to_color32("#495057"),
            selection_area: hex_to_color32("#6c757d"),

            big_tick: hex_to_color32("#e9ecef"),
            small_tick: hex_to_color32("#adb5bd"),
            keyframe_tick: hex_to_color32("#020202"),
            selected_fill: with_alpha(hex_to_color32("#f8f9fa"), 128),
            selected_hatch: hex_to_color32("#f8f9fa"),
            selection_marker: hex_to_color32("#212529"),
            playhead: hex_to_color32("#005c9e"),
            hover_marker: hex_to_color32("#c81717"),
            tooltip_background: Color32::LIGHT_YELLOW,
            tooltip_text: Color32::GRAY,
        },
    }
}

fn dark_theme() -> Theme {
    Theme {
        name: "Dark".to_string(),
        description: "Dark UI with a dark timeline".to_string(),
        colors: ThemeColors {
            panel_background: Color32::from_rgb(39, 39, 39),
            extreme_background: Color32::from_rgb(16, 16, 16),
            text: Color32::from_rgb(255, 255, 255),
            text_dim: Color32::from_rgb(160, 160, 160),
            selection: Color32::from_rgb(50, 80, 120),
            hover: Color32::from_rgb(70, 70, 70),
            error: Color32::from_rgb(231, 76, 60),

            timeline_background: hex_to_color32("#2b2f33"),
            info_area: hex_to_color32("#2b2f33"),
            info_area_window: hex_to_color32("#4a5057"),
            info_text: hex_to_color32("#e9ecef"),
            ticks_area: hex_to_color32("#1c1f22"),
            selection_area: hex_to_color32("#3a3f44"),

            big_tick: hex_to_color32("#ced4da"),
            small_tick: hex_to_color32("#6c757d"),
            keyframe_tick: hex_to_color32("#f1c40f"),
            selected_fill: with_alpha(hex_to_color32("#3498db"), 90),
            selected_hatch: hex_to_color32("#5dade2"),
            selection_marker: hex_to_color32("#f8f9fa"),
            playhead: hex_to_color32("#3498db"),
            hover_marker: hex_to_color32("#e74c3c"),
            tooltip_background: hex_to_color32("#343a40"),
            tooltip_text: hex_to_color32("#f8f9fa"),
        },
    }
}

fn light_theme() -> Theme {
    Theme {
        name: "Light".to_string(),
        description: "Light UI with a pale timeline".to_string(),
        colors: ThemeColors {
            panel_background: Color32::from_rgb(248, 248, 248),
            extreme_background: Color32::from_rgb(255, 255, 255),
            text: Color32::from_rgb(0, 0, 0),
            text_dim: Color32::from_rgb(120, 120, 120),
            selection: Color32::from_rgb(180, 200, 255),
            hover: Color32::from_rgb(220, 220, 220),
            error: Color32::from_rgb(200, 40, 40),

            timeline_background: hex_to_color32("#f1f3f5"),
            info_area: hex_to_color32("#e9ecef"),
            info_area_window: hex_to_color32("#ced4da"),
            info_text: hex_to_color32("#212529"),
            ticks_area: hex_to_color32("#dee2e6"),
            selection_area: hex_to_color32("#f8f9fa"),

            big_tick: hex_to_color32("#495057"),
            small_tick: hex_to_color32("#adb5bd"),
            keyframe_tick: hex_to_color32("#868e96"),
            selected_fill: with_alpha(hex_to_color32("#74c0fc"), 110),
            selected_hatch: hex_to_color32("#1c7ed6"),
            selection_marker: hex_to_color32("#212529"),
            playhead: hex_to_color32("#1864ab"),
            hover_marker: hex_to_color32("#c92a2a"),
            tooltip_background: Color32::LIGHT_YELLOW,
            tooltip_text: hex_to_color32("#495057"),
        },
    }
}

/// Converts a hex color string (like "#adb5bd") to Color32
pub fn hex_to_color32(hex: &str) -> Color32 {
    let hex = hex.trim_start_matches('#');

    if hex.len() == 6 {
        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
        Color32::from_rgb(r, g, b)
    } else {
        Color32::from_rgb(0, 0, 0) // Fallback to black
    }
}

/// Sets the alpha channel of a color
pub fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_themes() {
        let manager = ThemeManager::new();
        assert_eq!(manager.list_themes(), vec!["Slate", "Dark", "Light"]);
        assert_eq!(manager.current_theme().name, DEFAULT_THEME_NAME);
    }

    #[test]
    fn test_set_unknown_theme_keeps_current() {
        let mut manager = ThemeManager::new();
        assert!(manager.set_current_theme("Dark").is_ok());
        assert!(manager.set_current_theme("Solarized").is_err());
        assert_eq!(manager.current_theme_name(), "Dark");
    }

    #[test]
    fn test_hex_to_color32() {
        assert_eq!(hex_to_color32("#005c9e"), Color32::from_rgb(0x00, 0x5c, 0x9e));
        assert_eq!(hex_to_color32("bogus"), Color32::from_rgb(0, 0, 0));
    }
}
