//! Picking placed pieces under the cursor

use terrain_map_core::{PieceCatalog, PlacedPiece};

use crate::geometry::{PieceGeometry, Point};

/// The most recently placed piece on `level` whose occupied area contains
/// `point`. Clicks in the empty half of a diagonal piece fall through.
pub fn topmost_piece_at<'a>(
    point: Point,
    pieces: &'a [PlacedPiece],
    level: i32,
    catalog: &PieceCatalog,
) -> Option<&'a PlacedPiece> {
    pieces.iter().rev().filter(|p| p.level == level).find(|placed| {
        catalog
            .get(&placed.piece_id)
            .and_then(|def| PieceGeometry::of_placed(placed, def))
            .is_some_and(|geom| geom.contains_point(point))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use terrain_map_core::{PieceDefinition, PiecePose, Rotation};

    fn catalog() -> PieceCatalog {
        let mut catalog = PieceCatalog::new();
        catalog.insert_piece(PieceDefinition::new("tile", 3.0, 3.0));
        catalog.insert_piece(PieceDefinition::diagonal("wedge", 3.0, 3.0, Rotation::R0));
        catalog
    }

    #[test]
    fn test_picks_latest_on_level() {
        let catalog = catalog();
        let below = PlacedPiece::new("tile", PiecePose::new(0.0, 0.0, Rotation::R0), 0);
        let above = PlacedPiece::new("tile", PiecePose::new(1.0, 1.0, Rotation::R0), 0);
        let other_level = PlacedPiece::new("tile", PiecePose::new(0.0, 0.0, Rotation::R0), 1);
        let pieces = vec![below.clone(), above.clone(), other_level];

        assert_eq!(
            topmost_piece_at([2.0, 2.0], &pieces, 0, &catalog).map(|p| p.id),
            Some(above.id)
        );
        assert_eq!(
            topmost_piece_at([0.5, 0.5], &pieces, 0, &catalog).map(|p| p.id),
            Some(below.id)
        );
        assert!(topmost_piece_at([10.0, 10.0], &pieces, 0, &catalog).is_none());
    }

    #[test]
    fn test_empty_half_of_wedge_falls_through() {
        let catalog = catalog();
        let wedge = PlacedPiece::new("wedge", PiecePose::new(0.0, 0.0, Rotation::R0), 0);
        let pieces = vec![wedge.clone()];
        assert!(topmost_piece_at([2.8, 2.8], &pieces, 0, &catalog).is_none());
        assert_eq!(
            topmost_piece_at([0.5, 0.5], &pieces, 0, &catalog).map(|p| p.id),
            Some(wedge.id)
        );
    }
}
