//! Editor preferences and persistent settings
//!
//! Manages user preferences stored in platform-specific config directories:
//! - Windows: %APPDATA%/terrain_map_editor/
//! - Linux: ~/.config/terrain_map_editor/
//! - macOS: ~/Library/Application Support/terrain_map_editor/

mod file;

pub use file::*;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use terrain_map_core::MapSettings;
use terrain_map_placement::{Viewport, DEFAULT_PIXELS_PER_INCH};

/// Maximum number of recent maps to track
pub const MAX_RECENT_MAPS: usize = 10;

/// Editor preferences that persist across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
#[serde(default)]
pub struct EditorPreferences {
    /// Version for future migrations
    pub version: u32,

    // Editor View Settings
    pub show_grid: bool,
    pub snap_to_grid: bool,
    pub magnetic_snap: bool,
    pub pixels_per_inch: f64,
    /// Start in the 3D preview instead of the 2D editor
    pub view_3d: bool,

    // Startup behavior
    pub auto_open_last_map: bool,

    // Custom keybindings (action name -> key identifier)
    pub keybindings: HashMap<String, String>,

    // Recent Maps
    pub recent_maps: Vec<RecentMap>,
}

/// A recent map entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentMap {
    pub path: String,
    pub name: String,
    pub last_opened: u64, // Unix timestamp
}

impl Default for EditorPreferences {
    fn default() -> Self {
        Self {
            version: 1,
            show_grid: true,
            snap_to_grid: true,
            magnetic_snap: true,
            pixels_per_inch: DEFAULT_PIXELS_PER_INCH,
            view_3d: false,
            auto_open_last_map: false,
            keybindings: HashMap::new(),
            recent_maps: Vec::new(),
        }
    }
}

impl EditorPreferences {
    /// Add a map to the recent maps list
    pub fn add_recent_map(&mut self, path: &Path, name: String) {
        use std::time::{SystemTime, UNIX_EPOCH};

        let path_str = path.to_string_lossy().to_string();

        // Re-added at the front
        self.recent_maps.retain(|m| m.path != path_str);

        self.recent_maps.insert(
            0,
            RecentMap {
                path: path_str,
                name,
                last_opened: SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_secs())
                    .unwrap_or(0),
            },
        );

        self.recent_maps.truncate(MAX_RECENT_MAPS);
    }

    /// Remove a map from the recent list (e.g., if the file no longer exists)
    pub fn remove_recent_map(&mut self, path: &str) {
        self.recent_maps.retain(|m| m.path != path);
    }

    /// Get the most recently opened map
    pub fn last_map(&self) -> Option<&RecentMap> {
        self.recent_maps.first()
    }

    pub fn clear_recent_maps(&mut self) {
        self.recent_maps.clear();
    }

    /// Settings for a new map, with the snapping toggles taken from preferences
    pub fn new_map_settings(&self, width: f64, height: f64) -> MapSettings {
        MapSettings::new(width, height)
            .with_snap_to_grid(self.snap_to_grid)
            .with_magnetic_snap(self.magnetic_snap)
    }

    /// Viewport at the preferred zoom
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.pixels_per_inch, [0.0, 0.0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_recent_maps_most_recent_first() {
        let mut prefs = EditorPreferences::default();
        prefs.add_recent_map(&PathBuf::from("/maps/a.json"), "A".to_string());
        prefs.add_recent_map(&PathBuf::from("/maps/b.json"), "B".to_string());
        prefs.add_recent_map(&PathBuf::from("/maps/a.json"), "A".to_string());

        assert_eq!(prefs.recent_maps.len(), 2);
        assert_eq!(prefs.last_map().unwrap().name, "A");

        prefs.remove_recent_map("/maps/a.json");
        assert_eq!(prefs.last_map().unwrap().name, "B");
        prefs.clear_recent_maps();
        assert!(prefs.last_map().is_none());
    }

    #[test]
    fn test_recent_maps_bounded() {
        let mut prefs = EditorPreferences::default();
        for i in 0..(MAX_RECENT_MAPS + 5) {
            prefs.add_recent_map(&PathBuf::from(format!("/maps/{i}.json")), format!("Map {i}"));
        }
        assert_eq!(prefs.recent_maps.len(), MAX_RECENT_MAPS);
        assert_eq!(prefs.last_map().unwrap().name, format!("Map {}", MAX_RECENT_MAPS + 4));
    }

    #[test]
    fn test_new_map_settings_follow_toggles() {
        let prefs = EditorPreferences {
            magnetic_snap: false,
            ..Default::default()
        };
        let settings = prefs.new_map_settings(48.0, 48.0);
        assert!(settings.snap_to_grid);
        assert!(!settings.magnetic_snap);
        assert_eq!(settings.cell_size, 3.0);
    }
}
