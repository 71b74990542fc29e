//! Moving placed pieces from the 3D transform gizmo
//!
//! The gizmo path shares the snap, clamp and collision pipeline of the 2D
//! preview so both views agree on where a piece may go.

use terrain_map_core::{PieceCatalog, PlacedPieceUpdate, Rotation};
use uuid::Uuid;

use crate::geometry::Point;
use crate::preview::{evaluate_at, PlacementPreview};
use crate::store::PlacementStore;

/// Candidate pose for dragging `placed_id` to `target_top_left` (map inches).
///
/// `rotation` overrides the piece's current rotation when set. Returns `None`
/// for an unknown placed piece or definition.
pub fn evaluate_move(
    placed_id: Uuid,
    target_top_left: Point,
    rotation: Option<Rotation>,
    store: &impl PlacementStore,
    catalog: &PieceCatalog,
) -> Option<PlacementPreview> {
    let placed = store.placed_piece(placed_id)?;
    let definition = catalog.get(&placed.piece_id)?;
    let rotation = rotation.unwrap_or(placed.rotation);
    evaluate_at(definition, rotation, target_top_left, store, catalog, Some(placed_id))
}

/// Evaluate and commit a gizmo move. Returns `false`, leaving the store
/// untouched, when the move collides or the piece is unknown.
pub fn apply_move(
    placed_id: Uuid,
    target_top_left: Point,
    rotation: Option<Rotation>,
    store: &mut impl PlacementStore,
    catalog: &PieceCatalog,
) -> bool {
    let Some(preview) = evaluate_move(placed_id, target_top_left, rotation, &*store, catalog) else {
        return false;
    };
    if !preview.can_commit() {
        tracing::debug!("Gizmo move of {} blocked at ({}, {})", placed_id, preview.x, preview.y);
        return false;
    }
    store.update_placed_piece(placed_id, PlacedPieceUpdate::pose(preview.pose()));
    true
}
