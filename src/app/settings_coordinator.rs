//! Settings persistence coordination.
//!
//! Loads and saves any serializable setting as a JSON string in eframe's
//! persistent storage. The window persists its `TimelineConfig` and the last
//! directory the file dialog was opened in this way.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use vcutter::TimelineConfig;

pub const TIMELINE_CONFIG_KEY: &str = "timeline_config";
pub const LAST_DIRECTORY_KEY: &str = "last_directory";

/// Coordinates settings persistence.
pub struct SettingsCoordinator;

impl SettingsCoordinator {
    /// Loads a setting, falling back to `T::default()`.
    ///
    /// # Arguments
    /// * `storage` - The eframe storage interface
    /// * `key` - The storage key for this setting
    ///
    /// # Returns
    /// The deserialized value if found and valid, otherwise the default value for type T
    pub fn load_setting<T>(storage: Option<&dyn eframe::Storage>, key: &str) -> T
    where
        T: for<'de> Deserialize<'de> + Default,
    {
        Self::try_load_setting(storage, key).unwrap_or_default()
    }

    /// Saves a setting to persistent storage.
    ///
    /// # Arguments
    /// * `storage` - The eframe storage interface (mutable)
    /// * `key` - The storage key for this setting
    /// * `value` - The value to serialize and save
    pub fn save_setting<T>(storage: &mut dyn eframe::Storage, key: &str, value: &T)
    where
        T: Serialize,
    {
        match serde_json::to_string(value) {
            Ok(json_str) => {
                storage.set_string(key, json_str);
                storage.flush();
            }
            Err(e) => log::warn!("failed to serialize setting '{}': {}", key, e),
        }
    }

    /// Attempts to load a setting, returning None if not found or invalid.
    pub fn try_load_setting<T>(storage: Option<&dyn eframe::Storage>, key: &str) -> Option<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let storage = storage?;
        let json_str = storage.get_string(key)?;
        match serde_json::from_str(&json_str) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("ignoring invalid setting '{}': {}", key, e);
                None
            }
        }
    }

    // ===== Typed settings =====

    pub fn load_timeline_config(storage: Option<&dyn eframe::Storage>) -> TimelineConfig {
        Self::load_setting(storage, TIMELINE_CONFIG_KEY)
    }

    /// Last directory used by the file dialog, or the user's video directory.
    pub fn load_last_directory(storage: Option<&dyn eframe::Storage>) -> Option<PathBuf> {
        Self::try_load_setting::<PathBuf>(storage, LAST_DIRECTORY_KEY)
            .filter(|dir| dir.is_dir())
            .or_else(dirs::video_dir)
            .or_else(dirs::home_dir)
    }

    pub fn save_timeline_settings(
        storage: &mut dyn eframe::Storage,
        config: &TimelineConfig,
        last_directory: Option<&std::path::Path>,
    ) {
        Self::save_setting(storage, TIMELINE_CONFIG_KEY, config);
        if let Some(dir) = last_directory {
            Self::save_setting(storage, LAST_DIRECTORY_KEY, &dir);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::Storage;
    use std::collections::HashMap;

    /// Simple mock storage for testing
    struct MockStorage {
        data: HashMap<String, String>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                data: HashMap::new(),
            }
        }
    }

    impl eframe::Storage for MockStorage {
        fn get_string(&self, key: &str) -> Option<String> {
            self.data.get(key).cloned()
        }

        fn set_string(&mut self, key: &str, value: String) {
            self.data.insert(key.to_string(), value);
        }

        fn flush(&mut self) {}
    }

    #[test]
    fn test_save_and_load_simple() {
        let mut storage = MockStorage::new();
        SettingsCoordinator::save_setting(&mut storage, "test_key", &42i32);

        let loaded: i32 = SettingsCoordinator::load_setting(Some(&storage), "test_key");
        assert_eq!(loaded, 42);
    }

    #[test]
    fn test_load_with_default() {
        let storage = MockStorage::new();
        let loaded: i32 = SettingsCoordinator::load_setting(Some(&storage), "missing_key");
        assert_eq!(loaded, 0);

        let loaded: i32 = SettingsCoordinator::load_setting(None, "missing_key");
        assert_eq!(loaded, 0);
    }

    #[test]
    fn test_invalid_json_falls_back() {
        let mut storage = MockStorage::new();
        storage.set_string(TIMELINE_CONFIG_KEY, "{not json".to_string());
        let config = SettingsCoordinator::load_timeline_config(Some(&storage));
        assert_eq!(config, TimelineConfig::default());
    }

    #[test]
    fn test_timeline_config_round_trip() {
        let mut storage = MockStorage::new();
        let config = TimelineConfig {
            drag_threshold_px: 6.0,
            seek_on_drag_release: false,
            ..TimelineConfig::default()
        };
        let dir = std::env::temp_dir();

        SettingsCoordinator::save_timeline_settings(&mut storage, &config, Some(&dir));

        assert_eq!(SettingsCoordinator::load_timeline_config(Some(&storage)), config);
        assert_eq!(SettingsCoordinator::load_last_directory(Some(&storage)), Some(dir));
    }
}
