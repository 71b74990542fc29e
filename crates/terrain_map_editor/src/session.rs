//! The open map and its editing state

use std::path::{Path, PathBuf};

use terrain_map_core::{MapError, MapSettings, PlacedPiece, PlacedPieceUpdate, TerrainMap};
use terrain_map_placement::PlacementStore;
use uuid::Uuid;

use crate::preferences::EditorPreferences;

/// An open map document plus the level being edited.
///
/// This is the store the placement engine reads and mutates. Every effective
/// mutation marks the session dirty.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
pub struct MapSession {
    map: TerrainMap,
    active_level: i32,
    path: Option<PathBuf>,
    dirty: bool,
}

impl MapSession {
    pub fn new(map: TerrainMap) -> Self {
        Self {
            map,
            active_level: 0,
            path: None,
            dirty: false,
        }
    }

    /// Open a map document from disk
    pub fn open(path: &Path) -> Result<Self, MapError> {
        let map = TerrainMap::load(path)?;
        tracing::info!("Opened map '{}' from {}", map.name, path.display());
        Ok(Self {
            map,
            active_level: 0,
            path: Some(path.to_path_buf()),
            dirty: false,
        })
    }

    /// Reopen the most recent map when the preferences ask for it.
    ///
    /// A recent entry that no longer loads is logged and skipped.
    pub fn restore_last(prefs: &EditorPreferences) -> Option<Self> {
        if !prefs.auto_open_last_map {
            return None;
        }
        let recent = prefs.last_map()?;
        match Self::open(Path::new(&recent.path)) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!("Could not reopen '{}': {}", recent.path, e);
                None
            }
        }
    }

    /// Save to the path the map was opened from or last saved to
    pub fn save(&mut self) -> Result<(), MapError> {
        let Some(path) = self.path.clone() else {
            return Err(MapError::IoError("Map has no file path yet".to_string()));
        };
        self.save_as(&path)
    }

    pub fn save_as(&mut self, path: &Path) -> Result<(), MapError> {
        self.map.save(path)?;
        self.path = Some(path.to_path_buf());
        self.dirty = false;
        tracing::info!("Saved map '{}' to {}", self.map.name, path.display());
        Ok(())
    }

    pub fn map(&self) -> &TerrainMap {
        &self.map
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn set_active_level(&mut self, level: i32) {
        self.active_level = level;
    }

    pub fn settings_mut(&mut self) -> &mut MapSettings {
        self.dirty = true;
        &mut self.map.settings
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Remove every piece on the active level
    pub fn clear_active_level(&mut self) {
        let before = self.map.pieces.len();
        self.map.clear_level(self.active_level);
        if self.map.pieces.len() != before {
            self.mark_dirty();
        }
    }
}

impl PlacementStore for MapSession {
    fn placed_pieces(&self) -> &[PlacedPiece] {
        &self.map.pieces
    }

    fn active_level(&self) -> i32 {
        self.active_level
    }

    fn map_settings(&self) -> MapSettings {
        self.map.settings
    }

    fn add_placed_piece(&mut self, piece: PlacedPiece) {
        self.map.add_piece(piece);
        self.mark_dirty();
    }

    fn update_placed_piece(&mut self, id: Uuid, update: PlacedPieceUpdate) {
        if self.map.update_piece(id, &update) {
            self.mark_dirty();
        }
    }

    fn remove_placed_piece(&mut self, id: Uuid) {
        if self.map.remove_piece(id).is_some() {
            self.mark_dirty();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use terrain_map_core::{PiecePose, Rotation};

    fn session() -> MapSession {
        MapSession::new(TerrainMap::new("Skirmish", MapSettings::new(24.0, 24.0)))
    }

    #[test]
    fn test_mutations_mark_dirty() {
        let mut session = session();
        assert!(!session.is_dirty());

        let piece = PlacedPiece::new("tile", PiecePose::new(0.0, 0.0, Rotation::R0), 0);
        let id = piece.id;
        session.add_placed_piece(piece);
        assert!(session.is_dirty());

        let dir = tempfile::tempdir().unwrap();
        session.save_as(&dir.path().join("skirmish.json")).unwrap();
        assert!(!session.is_dirty());
        let moved = PlacedPieceUpdate::pose(PiecePose::new(3.0, 0.0, Rotation::R0));
        session.update_placed_piece(id, moved);
        assert!(session.is_dirty());
    }

    #[test]
    fn test_missing_ids_do_not_mark_dirty() {
        let mut session = session();
        let update = PlacedPieceUpdate::pose(PiecePose::new(1.0, 1.0, Rotation::R0));
        session.update_placed_piece(Uuid::new_v4(), update);
        session.remove_placed_piece(Uuid::new_v4());
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_active_level_routes_pieces() {
        let mut session = session();
        session.set_active_level(2);
        let origin = PiecePose::new(0.0, 0.0, Rotation::R0);
        session.add_placed_piece(PlacedPiece::new("tile", origin, 2));
        session.add_placed_piece(PlacedPiece::new("tile", origin, 0));
        assert_eq!(session.active_level_pieces().len(), 1);

        session.clear_active_level();
        assert_eq!(session.placed_pieces().len(), 1);
        assert_eq!(session.placed_pieces()[0].level, 0);
    }

    #[test]
    fn test_save_requires_path() {
        let mut session = session();
        assert!(matches!(session.save(), Err(MapError::IoError(_))));
    }

    #[test]
    fn test_save_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skirmish.json");

        let mut session = session();
        let pose = PiecePose::new(3.0, 6.0, Rotation::R270);
        session.add_placed_piece(PlacedPiece::new("tile", pose, 0));
        session.save_as(&path).unwrap();
        assert!(!session.is_dirty());
        assert_eq!(session.path(), Some(path.as_path()));

        let reopened = MapSession::open(&path).unwrap();
        assert_eq!(reopened.map(), session.map());
        assert!(!reopened.is_dirty());
    }

    #[test]
    fn test_restore_last_follows_preference() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skirmish.json");
        session().save_as(&path).unwrap();

        let mut prefs = EditorPreferences::default();
        prefs.add_recent_map(&path, "Skirmish".to_string());
        assert!(MapSession::restore_last(&prefs).is_none());

        prefs.auto_open_last_map = true;
        let restored = MapSession::restore_last(&prefs).unwrap();
        assert_eq!(restored.path(), Some(path.as_path()));
        assert_eq!(restored.map().name, "Skirmish");

        prefs.add_recent_map(&dir.path().join("gone.json"), "Gone".to_string());
        assert!(MapSession::restore_last(&prefs).is_none());
    }
}
