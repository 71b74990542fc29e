//! Piece overlap detection.
//!
//! Rectangles use a plain axis-aligned test. Any pair involving a diagonal
//! piece first rejects on bounding boxes, then runs the Separating Axis
//! Theorem over the occupied outlines. Touching (shared edge, shared
//! hypotenuse or corner) is NOT counted as overlap.

use terrain_map_core::{PieceCatalog, PlacedPiece};
use uuid::Uuid;

use crate::geometry::{PieceGeometry, Point};

/// Penetration below this is treated as touching
const SAT_TOLERANCE: f64 = 1e-9;

fn project(outline: &[Point], axis: Point) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for p in outline {
        let dot = p[0] * axis[0] + p[1] * axis[1];
        lo = lo.min(dot);
        hi = hi.max(dot);
    }
    (lo, hi)
}

/// True if the interiors of two convex outlines overlap
fn convex_overlap(a: &[Point], b: &[Point]) -> bool {
    for outline in [a, b] {
        for i in 0..outline.len() {
            let j = (i + 1) % outline.len();
            let ex = outline[j][0] - outline[i][0];
            let ey = outline[j][1] - outline[i][1];
            let length = (ex * ex + ey * ey).sqrt();
            if length == 0.0 {
                continue;
            }
            let axis = [-ey / length, ex / length];
            let (min_a, max_a) = project(a, axis);
            let (min_b, max_b) = project(b, axis);
            if max_a <= min_b + SAT_TOLERANCE || max_b <= min_a + SAT_TOLERANCE {
                return false;
            }
        }
    }
    true
}

/// True if two pieces' occupied areas overlap
pub fn overlaps(a: &PieceGeometry, b: &PieceGeometry) -> bool {
    if !a.bounds().overlaps(&b.bounds()) {
        return false;
    }
    if !a.is_diagonal && !b.is_diagonal {
        return true;
    }
    convex_overlap(&a.outline(), &b.outline())
}

/// True if `candidate` overlaps any of `existing`.
///
/// Callers pass pieces from the candidate's level only. `exclude_id` skips
/// the piece being moved so it never collides with its own prior placement.
/// Pieces whose definition is missing from the catalog are ignored.
pub fn find_colliding<'a>(
    candidate: &PieceGeometry,
    existing: impl IntoIterator<Item = &'a PlacedPiece>,
    catalog: &PieceCatalog,
    exclude_id: Option<Uuid>,
) -> bool {
    first_colliding(candidate, existing, catalog, exclude_id).is_some()
}

/// First piece in `existing` that overlaps `candidate`
pub fn first_colliding<'a>(
    candidate: &PieceGeometry,
    existing: impl IntoIterator<Item = &'a PlacedPiece>,
    catalog: &PieceCatalog,
    exclude_id: Option<Uuid>,
) -> Option<&'a PlacedPiece> {
    existing.into_iter().find(|placed| {
        if Some(placed.id) == exclude_id {
            return false;
        }
        catalog
            .get(&placed.piece_id)
            .and_then(|def| PieceGeometry::of_placed(placed, def))
            .is_some_and(|geom| overlaps(candidate, &geom))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use terrain_map_core::{PieceDefinition, PiecePose, Rotation};

    fn rect(x: f64, y: f64, w: f64, h: f64) -> PieceGeometry {
        PieceGeometry {
            x,
            y,
            effective_width: w,
            effective_height: h,
            is_diagonal: false,
            rotation: Rotation::R0,
        }
    }

    fn wedge(x: f64, y: f64, size: f64, rotation: Rotation) -> PieceGeometry {
        PieceGeometry {
            x,
            y,
            effective_width: size,
            effective_height: size,
            is_diagonal: true,
            rotation,
        }
    }

    #[test]
    fn test_separated_no_overlap() {
        assert!(!overlaps(&rect(0.0, 0.0, 3.0, 3.0), &rect(10.0, 0.0, 3.0, 3.0)));
    }

    #[test]
    fn test_overlapping_rectangles() {
        assert!(overlaps(&rect(0.0, 0.0, 3.0, 3.0), &rect(2.0, 1.0, 3.0, 3.0)));
    }

    #[test]
    fn test_touching_edge_no_overlap() {
        assert!(!overlaps(&rect(0.0, 0.0, 3.0, 3.0), &rect(3.0, 0.0, 3.0, 3.0)));
    }

    #[test]
    fn test_touching_corner_no_overlap() {
        assert!(!overlaps(&rect(0.0, 0.0, 3.0, 3.0), &rect(3.0, 3.0, 3.0, 3.0)));
    }

    #[test]
    fn test_wedges_sharing_hypotenuse_no_overlap() {
        let a = wedge(0.0, 0.0, 3.0, Rotation::R0);
        let b = wedge(0.0, 0.0, 3.0, Rotation::R180);
        assert!(!overlaps(&a, &b));
        assert!(!overlaps(&b, &a));
    }

    #[test]
    fn test_wedges_hypotenuses_apart_no_overlap() {
        let a = wedge(0.0, 0.0, 3.0, Rotation::R0);
        let b = wedge(1.0, 1.0, 3.0, Rotation::R180);
        assert!(a.bounds().overlaps(&b.bounds()));
        assert!(!overlaps(&a, &b));
    }

    #[test]
    fn test_wedges_facing_each_other_overlap() {
        let a = wedge(0.0, 0.0, 3.0, Rotation::R180);
        let b = wedge(1.0, 1.0, 3.0, Rotation::R0);
        assert!(overlaps(&a, &b));
        assert!(overlaps(&b, &a));
    }

    #[test]
    fn test_same_wedge_overlaps_itself() {
        let a = wedge(0.0, 0.0, 3.0, Rotation::R90);
        assert!(overlaps(&a, &a));
    }

    #[test]
    fn test_rect_in_empty_corner_no_overlap() {
        let w = wedge(0.0, 0.0, 3.0, Rotation::R0);
        let r = rect(2.0, 2.0, 1.0, 1.0);
        assert!(!overlaps(&w, &r));
        assert!(!overlaps(&r, &w));
    }

    #[test]
    fn test_rect_in_occupied_corner_overlaps() {
        let w = wedge(0.0, 0.0, 3.0, Rotation::R0);
        let r = rect(0.0, 0.0, 1.0, 1.0);
        assert!(overlaps(&w, &r));
        assert!(overlaps(&r, &w));
    }

    #[test]
    fn test_rect_touching_hypotenuse_no_overlap() {
        // Rect corner sits exactly on the hypotenuse x + y = 3
        let w = wedge(0.0, 0.0, 3.0, Rotation::R0);
        let r = rect(1.5, 1.5, 1.5, 1.5);
        assert!(!overlaps(&w, &r));
    }

    #[test]
    fn test_rect_crossing_hypotenuse_overlaps() {
        let w = wedge(0.0, 0.0, 3.0, Rotation::R90);
        // Rotation 90 occupies the top-right half: x >= y
        assert!(overlaps(&w, &rect(2.0, 0.0, 1.0, 1.0)));
        assert!(!overlaps(&w, &rect(0.0, 2.0, 1.0, 1.0)));
    }

    #[test]
    fn test_non_square_wedge() {
        // 6 wide, 3 tall, right angle at bottom-left: occupied where x/6 <= y/3
        let w = PieceGeometry {
            x: 0.0,
            y: 0.0,
            effective_width: 6.0,
            effective_height: 3.0,
            is_diagonal: true,
            rotation: Rotation::R270,
        };
        assert!(!overlaps(&w, &rect(4.0, 0.0, 2.0, 1.0)));
        assert!(overlaps(&w, &rect(0.0, 2.0, 2.0, 1.0)));
    }

    #[test]
    fn test_find_colliding_respects_exclude() {
        let mut catalog = PieceCatalog::new();
        catalog.insert_piece(PieceDefinition::new("tile", 3.0, 3.0));
        let placed = PlacedPiece::new("tile", PiecePose::new(0.0, 0.0, Rotation::R0), 0);
        let candidate = rect(1.0, 1.0, 3.0, 3.0);

        assert!(find_colliding(&candidate, [&placed], &catalog, None));
        assert!(!find_colliding(&candidate, [&placed], &catalog, Some(placed.id)));
    }

    #[test]
    fn test_find_colliding_ignores_unknown_definitions() {
        let catalog = PieceCatalog::new();
        let placed = PlacedPiece::new("ghost", PiecePose::new(0.0, 0.0, Rotation::R0), 0);
        assert!(!find_colliding(&rect(0.0, 0.0, 3.0, 3.0), [&placed], &catalog, None));
    }

    #[test]
    fn test_first_colliding_returns_first_hit() {
        let mut catalog = PieceCatalog::new();
        catalog.insert_piece(PieceDefinition::new("tile", 3.0, 3.0));
        let a = PlacedPiece::new("tile", PiecePose::new(0.0, 0.0, Rotation::R0), 0);
        let b = PlacedPiece::new("tile", PiecePose::new(3.0, 0.0, Rotation::R0), 0);
        let pieces = vec![a.clone(), b.clone()];
        let hit = first_colliding(&rect(4.0, 0.0, 1.0, 1.0), &pieces, &catalog, None);
        assert_eq!(hit.map(|p| p.id), Some(b.id));
    }
}
