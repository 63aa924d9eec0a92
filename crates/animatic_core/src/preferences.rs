//! Editor preference storage with an explicit load/save lifecycle.
//!
//! Preferences (collapsed panels, ruler density) travel with the editor
//! session as a plain value and persist as a JSON document under a
//! caller-chosen directory. Nothing here is ambient: the owner decides when
//! to load and when to save.

use animatic_error::{AnimaticResult, ConfigError, JsonError};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

fn default_tick_interval() -> u32 {
    5
}

/// User-tunable editor preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorPreferences {
    /// Script panel collapsed in the outline editor
    #[serde(default)]
    pub script_panel_collapsed: bool,
    /// AI ordering-suggestion panel collapsed
    #[serde(default)]
    pub suggestions_panel_collapsed: bool,
    /// Transcript panel collapsed
    #[serde(default)]
    pub transcript_panel_collapsed: bool,
    /// Seconds between major ruler ticks on the timeline track
    #[serde(default = "default_tick_interval")]
    pub tick_interval_seconds: u32,
}

impl Default for EditorPreferences {
    fn default() -> Self {
        Self {
            script_panel_collapsed: false,
            suggestions_panel_collapsed: false,
            transcript_panel_collapsed: false,
            tick_interval_seconds: default_tick_interval(),
        }
    }
}

/// Manages preference persistence.
#[derive(Debug, Clone, Getters)]
pub struct PreferenceStore {
    /// Base directory for preference files
    preference_dir: PathBuf,
}

impl PreferenceStore {
    /// Creates a new preference store rooted at `preference_dir`.
    pub fn new(preference_dir: impl AsRef<Path>) -> AnimaticResult<Self> {
        let preference_dir = preference_dir.as_ref().to_path_buf();

        if !preference_dir.exists() {
            std::fs::create_dir_all(&preference_dir).map_err(|e| {
                ConfigError::new(format!("Failed to create preference directory: {}", e))
            })?;
        }

        debug!(path = %preference_dir.display(), "Initialized preference store");
        Ok(Self { preference_dir })
    }

    fn file_path(&self) -> PathBuf {
        self.preference_dir.join("editor.json")
    }

    /// Loads preferences, falling back to defaults when none were saved yet.
    pub fn load(&self) -> AnimaticResult<EditorPreferences> {
        let path = self.file_path();

        if !path.exists() {
            debug!("No existing preference file, returning defaults");
            return Ok(EditorPreferences::default());
        }

        let contents = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::new(format!("Failed to read preference file: {}", e)))?;

        let preferences: EditorPreferences = serde_json::from_str(&contents)
            .map_err(|e| JsonError::new(format!("Failed to parse preference file: {}", e)))?;

        debug!("Loaded editor preferences");
        Ok(preferences)
    }

    /// Saves preferences, replacing whatever was stored before.
    pub fn save(&self, preferences: &EditorPreferences) -> AnimaticResult<()> {
        let path = self.file_path();

        let contents = serde_json::to_string_pretty(preferences)
            .map_err(|e| JsonError::new(format!("Failed to serialize preferences: {}", e)))?;

        std::fs::write(&path, contents)
            .map_err(|e| ConfigError::new(format!("Failed to write preference file: {}", e)))?;

        debug!("Saved editor preferences");
        Ok(())
    }

    /// Deletes stored preferences; the next load returns defaults.
    pub fn delete(&self) -> AnimaticResult<()> {
        let path = self.file_path();

        if path.exists() {
            std::fs::remove_file(&path).map_err(|e| {
                ConfigError::new(format!("Failed to delete preference file: {}", e))
            })?;
            debug!("Deleted editor preferences");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn preference_round_trip() {
        let temp_dir = env::temp_dir().join("animatic_preference_test");
        let store = PreferenceStore::new(&temp_dir).unwrap();

        let mut preferences = EditorPreferences::default();
        preferences.script_panel_collapsed = true;
        preferences.tick_interval_seconds = 10;

        store.save(&preferences).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, preferences);

        store.delete().unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, EditorPreferences::default());

        std::fs::remove_dir_all(&temp_dir).ok();
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let partial: EditorPreferences =
            serde_json::from_str(r#"{"script_panel_collapsed": true}"#).unwrap();
        assert!(partial.script_panel_collapsed);
        assert_eq!(partial.tick_interval_seconds, 5);
    }
}
