//! Reading and writing the preferences file

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;

use super::EditorPreferences;

const PREFERENCES_FILE: &str = "preferences.toml";

/// Errors that can occur when loading or saving preferences
#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Serialize error: {0}")]
    SerializeError(#[from] toml::ser::Error),
    #[error("No config directory available on this platform")]
    NoConfigDir,
}

/// Platform config directory for the editor
pub fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "terrain_map_editor").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Full path of the preferences file
pub fn preferences_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(PREFERENCES_FILE))
}

impl EditorPreferences {
    /// Load from the platform config directory, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = preferences_path() else {
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(prefs) => prefs,
            Err(e) => {
                tracing::warn!("Failed to load preferences from {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load from a specific file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, PreferencesError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Save to the platform config directory
    pub fn save(&self) -> Result<(), PreferencesError> {
        let path = preferences_path().ok_or(PreferencesError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Save to a specific file, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> Result<(), PreferencesError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = EditorPreferences::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(prefs, EditorPreferences::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(PREFERENCES_FILE);

        let mut prefs = EditorPreferences {
            show_grid: false,
            pixels_per_inch: 32.0,
            view_3d: true,
            ..Default::default()
        };
        prefs.keybindings.insert("rotate".to_string(), "e".to_string());
        prefs.add_recent_map(&dir.path().join("a.json"), "A".to_string());
        prefs.save_to(&path).unwrap();

        let loaded = EditorPreferences::load_from(&path).unwrap();
        assert_eq!(loaded, prefs);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PREFERENCES_FILE);
        fs::write(&path, "show_grid = false\n").unwrap();

        let loaded = EditorPreferences::load_from(&path).unwrap();
        assert!(!loaded.show_grid);
        assert!(loaded.snap_to_grid);
        assert_eq!(loaded.version, 1);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PREFERENCES_FILE);
        fs::write(&path, "show_grid = \"maybe\"\n").unwrap();
        assert!(matches!(
            EditorPreferences::load_from(&path),
            Err(PreferencesError::ParseError(_))
        ));
    }
}
