//! The map/session store as seen by the placement engine

use terrain_map_core::{MapSettings, PlacedPiece, PlacedPieceUpdate};
use uuid::Uuid;

/// Placed-piece list, map configuration and mutation entry points.
///
/// The placement engine reads through this trait on every event and only
/// calls the mutation methods from a commit step, once per gesture.
pub trait PlacementStore {
    /// Every placed piece on every level
    fn placed_pieces(&self) -> &[PlacedPiece];
    /// Level new pieces go to and collisions are checked on
    fn active_level(&self) -> i32;
    /// Map bounds and grid configuration
    fn map_settings(&self) -> MapSettings;
    fn add_placed_piece(&mut self, piece: PlacedPiece);
    fn update_placed_piece(&mut self, id: Uuid, update: PlacedPieceUpdate);
    fn remove_placed_piece(&mut self, id: Uuid);

    /// Look up a placed piece by id
    fn placed_piece(&self, id: Uuid) -> Option<&PlacedPiece> {
        self.placed_pieces().iter().find(|p| p.id == id)
    }

    /// Pieces on the active level, in placement order
    fn active_level_pieces(&self) -> Vec<&PlacedPiece> {
        let level = self.active_level();
        self.placed_pieces()
            .iter()
            .filter(|p| p.level == level)
            .collect()
    }
}

/// Minimal in-memory store, used by tests and headless hosts
#[derive(Debug, Clone)]
pub struct MemoryStore {
    pub settings: MapSettings,
    pub level: i32,
    pub pieces: Vec<PlacedPiece>,
}

impl MemoryStore {
    pub fn new(settings: MapSettings) -> Self {
        Self {
            settings,
            level: 0,
            pieces: Vec::new(),
        }
    }
}

impl PlacementStore for MemoryStore {
    fn placed_pieces(&self) -> &[PlacedPiece] {
        &self.pieces
    }

    fn active_level(&self) -> i32 {
        self.level
    }

    fn map_settings(&self) -> MapSettings {
        self.settings
    }

    fn add_placed_piece(&mut self, piece: PlacedPiece) {
        self.pieces.push(piece);
    }

    fn update_placed_piece(&mut self, id: Uuid, update: PlacedPieceUpdate) {
        if let Some(piece) = self.pieces.iter_mut().find(|p| p.id == id) {
            piece.apply(&update);
        }
    }

    fn remove_placed_piece(&mut self, id: Uuid) {
        self.pieces.retain(|p| p.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use terrain_map_core::{PiecePose, Rotation};

    #[test]
    fn test_active_level_pieces_filters() {
        let mut store = MemoryStore::new(MapSettings::new(24.0, 24.0));
        store.add_placed_piece(PlacedPiece::new("tile", PiecePose::new(0.0, 0.0, Rotation::R0), 0));
        store.add_placed_piece(PlacedPiece::new("tile", PiecePose::new(0.0, 0.0, Rotation::R0), 1));
        assert_eq!(store.active_level_pieces().len(), 1);
        store.level = 1;
        assert_eq!(store.active_level_pieces()[0].level, 1);
    }

    #[test]
    fn test_update_and_remove() {
        let mut store = MemoryStore::new(MapSettings::new(24.0, 24.0));
        let piece = PlacedPiece::new("tile", PiecePose::new(0.0, 0.0, Rotation::R0), 0);
        let id = piece.id;
        store.add_placed_piece(piece);
        store.update_placed_piece(
            id,
            PlacedPieceUpdate::pose(PiecePose::new(3.0, 3.0, Rotation::R90)),
        );
        assert_eq!(store.placed_piece(id).unwrap().pose(), PiecePose::new(3.0, 3.0, Rotation::R90));
        store.remove_placed_piece(id);
        assert!(store.placed_piece(id).is_none());
    }
}
