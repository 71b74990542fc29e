//! Terrain map document: settings plus the placed piece list

use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

use crate::cell_grid::BASE_CELL_INCHES;
use crate::placed::{PlacedPiece, PlacedPieceUpdate};
use crate::MapError;

fn default_cell_size() -> f64 {
    BASE_CELL_INCHES
}

fn default_true() -> bool {
    true
}

/// Map bounds and grid configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSettings {
    /// Map width in inches
    pub width: f64,
    /// Map height in inches
    pub height: f64,
    /// Grid cell size in inches
    #[serde(default = "default_cell_size")]
    pub cell_size: f64,
    #[serde(default = "default_true")]
    pub snap_to_grid: bool,
    #[serde(default = "default_true")]
    pub magnetic_snap: bool,
}

impl MapSettings {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_cell_size(mut self, cell_size: f64) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn with_snap_to_grid(mut self, snap_to_grid: bool) -> Self {
        self.snap_to_grid = snap_to_grid;
        self
    }

    pub fn with_magnetic_snap(mut self, magnetic_snap: bool) -> Self {
        self.magnetic_snap = magnetic_snap;
        self
    }
}

impl Default for MapSettings {
    fn default() -> Self {
        // 6' x 4' table
        Self {
            width: 72.0,
            height: 48.0,
            cell_size: BASE_CELL_INCHES,
            snap_to_grid: true,
            magnetic_snap: true,
        }
    }
}

/// A complete battle map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerrainMap {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    pub settings: MapSettings,
    #[serde(default)]
    pub pieces: Vec<PlacedPiece>,
}

impl Default for TerrainMap {
    fn default() -> Self {
        Self::new("Untitled", MapSettings::default())
    }
}

impl TerrainMap {
    pub fn new(name: impl Into<String>, settings: MapSettings) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            settings,
            pieces: Vec::new(),
        }
    }

    pub fn get_piece(&self, id: Uuid) -> Option<&PlacedPiece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    /// Pieces on one level, in placement order
    pub fn pieces_on_level(&self, level: i32) -> impl Iterator<Item = &PlacedPiece> {
        self.pieces.iter().filter(move |p| p.level == level)
    }

    pub fn add_piece(&mut self, piece: PlacedPiece) {
        self.pieces.push(piece);
    }

    /// Apply a partial update. Returns false if the piece does not exist.
    pub fn update_piece(&mut self, id: Uuid, update: &PlacedPieceUpdate) -> bool {
        match self.pieces.iter_mut().find(|p| p.id == id) {
            Some(piece) => {
                piece.apply(update);
                true
            }
            None => false,
        }
    }

    /// Remove a piece, returning it if it existed
    pub fn remove_piece(&mut self, id: Uuid) -> Option<PlacedPiece> {
        let idx = self.pieces.iter().position(|p| p.id == id)?;
        Some(self.pieces.remove(idx))
    }

    /// Remove every piece on every level
    pub fn clear(&mut self) {
        self.pieces.clear();
    }

    /// Remove every piece on one level
    pub fn clear_level(&mut self, level: i32) {
        self.pieces.retain(|p| p.level != level);
    }

    /// Distinct levels in use, ascending
    pub fn levels(&self) -> Vec<i32> {
        let mut levels: Vec<i32> = self.pieces.iter().map(|p| p.level).collect();
        levels.sort_unstable();
        levels.dedup();
        levels
    }

    /// Parse a map from a JSON string
    pub fn from_json(json: &str) -> Result<Self, MapError> {
        let map: TerrainMap =
            serde_json::from_str(json).map_err(|e| MapError::ParseError(e.to_string()))?;
        if !(map.settings.width > 0.0 && map.settings.height > 0.0) {
            return Err(MapError::ValidationError(format!(
                "Map size must be positive, got {}x{}",
                map.settings.width, map.settings.height
            )));
        }
        if !(map.settings.cell_size > 0.0) {
            return Err(MapError::ValidationError(format!(
                "Cell size must be positive, got {}",
                map.settings.cell_size
            )));
        }
        Ok(map)
    }

    pub fn to_json(&self) -> Result<String, MapError> {
        serde_json::to_string_pretty(self).map_err(|e| MapError::ParseError(e.to_string()))
    }

    /// Load a map from a JSON file
    pub fn load(path: &Path) -> Result<Self, MapError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| MapError::IoError(e.to_string()))?;
        Self::from_json(&content)
    }

    /// Save the map to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), MapError> {
        std::fs::write(path, self.to_json()?).map_err(|e| MapError::IoError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placed::PiecePose;
    use crate::rotation::Rotation;

    fn piece_at(x: f64, y: f64, level: i32) -> PlacedPiece {
        PlacedPiece::new("tile", PiecePose::new(x, y, Rotation::R0), level)
    }

    #[test]
    fn test_add_update_remove() {
        let mut map = TerrainMap::new("Test", MapSettings::new(24.0, 24.0));
        let piece = piece_at(0.0, 0.0, 0);
        let id = piece.id;
        map.add_piece(piece);

        assert!(map.update_piece(id, &PlacedPieceUpdate {
            x: Some(3.0),
            ..Default::default()
        }));
        assert_eq!(map.get_piece(id).unwrap().x, 3.0);
        assert!(!map.update_piece(Uuid::new_v4(), &PlacedPieceUpdate::default()));

        assert!(map.remove_piece(id).is_some());
        assert!(map.remove_piece(id).is_none());
        assert!(map.pieces.is_empty());
    }

    #[test]
    fn test_levels_and_clear_level() {
        let mut map = TerrainMap::default();
        map.add_piece(piece_at(0.0, 0.0, 1));
        map.add_piece(piece_at(3.0, 0.0, 0));
        map.add_piece(piece_at(6.0, 0.0, 1));

        assert_eq!(map.levels(), vec![0, 1]);
        assert_eq!(map.pieces_on_level(1).count(), 2);

        map.clear_level(1);
        assert_eq!(map.levels(), vec![0]);

        map.clear();
        assert!(map.pieces.is_empty());
    }

    #[test]
    fn test_settings_defaults_from_json() {
        let json = r#"{
            "id": "5f0c6a3e-0d7a-4b7e-9a53-2f1c7a9b8e10",
            "settings": { "width": 24, "height": 24 }
        }"#;
        let map = TerrainMap::from_json(json).unwrap();
        assert_eq!(map.settings.cell_size, 3.0);
        assert!(map.settings.snap_to_grid);
        assert!(map.settings.magnetic_snap);
        assert!(map.pieces.is_empty());
    }

    #[test]
    fn test_rejects_non_positive_size() {
        let json = r#"{
            "id": "5f0c6a3e-0d7a-4b7e-9a53-2f1c7a9b8e10",
            "settings": { "width": 0, "height": 24 }
        }"#;
        assert!(matches!(
            TerrainMap::from_json(json),
            Err(MapError::ValidationError(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("map.json");

        let settings = MapSettings::new(44.0, 30.0).with_magnetic_snap(false);
        let mut map = TerrainMap::new("Ruins", settings);
        map.add_piece(piece_at(3.0, 6.0, 0));
        map.save(&path).unwrap();

        let loaded = TerrainMap::load(&path).unwrap();
        assert_eq!(loaded, map);
    }

    #[test]
    fn test_load_missing_file() {
        let result = TerrainMap::load(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(MapError::IoError(_))));
    }
}
