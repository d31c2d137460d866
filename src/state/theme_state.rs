//! Theme and styling state management.

use vcutter::{ThemeColors, ThemeManager};

/// State related to the visual theme.
///
/// Unknown theme names (for example from an older settings file) fall back to
/// the default theme.
pub struct ThemeState {
    theme_manager: ThemeManager,
}

impl std::fmt::Debug for ThemeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeState")
            .field("current_theme_name", &self.current_theme_name())
            .finish_non_exhaustive()
    }
}

impl Default for ThemeState {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeState {
    pub fn new() -> Self {
        Self {
            theme_manager: ThemeManager::new(),
        }
    }

    /// Creates a new theme state with a specific theme.
    ///
    /// # Arguments
    /// * `theme_name` - The name of the theme to use
    pub fn with_theme(theme_name: &str) -> Self {
        let mut state = Self::new();
        state.set_theme(theme_name);
        state
    }

    // ===== Theme Queries =====

    pub fn theme_manager(&self) -> &ThemeManager {
        &self.theme_manager
    }

    pub fn current_theme_name(&self) -> &str {
        self.theme_manager.current_theme_name()
    }

    /// Palette of the current theme.
    pub fn colors(&self) -> &'static ThemeColors {
        &self.theme_manager.current_theme().colors
    }

    // ===== Theme Mutations =====

    pub fn set_theme(&mut self, theme_name: &str) {
        if let Err(e) = self.theme_manager.set_current_theme(theme_name) {
            log::warn!("{}", e);
        }
    }
}
