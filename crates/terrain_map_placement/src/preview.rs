//! Candidate placement shown while a gesture is in progress

use terrain_map_core::{
    CellGrid, PieceCatalog, PieceDefinition, PieceId, PiecePose, Rotation, TerrainId,
};
use uuid::Uuid;

use crate::collision::find_colliding;
use crate::geometry::{PieceGeometry, Point, Rect};
use crate::snap::{snap, SnapContext};
use crate::store::PlacementStore;

/// The ephemeral candidate placement.
///
/// This is the single source of truth at commit time: a commit writes the
/// preview's pose verbatim and never re-runs snapping.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementPreview {
    pub piece_id: PieceId,
    pub x: f64,
    pub y: f64,
    pub rotation: Rotation,
    pub effective_width: f64,
    pub effective_height: f64,
    pub is_diagonal: bool,
    pub has_collision: bool,
    pub visible: bool,
}

impl PlacementPreview {
    pub fn pose(&self) -> PiecePose {
        PiecePose::new(self.x, self.y, self.rotation)
    }

    pub fn geometry(&self) -> PieceGeometry {
        PieceGeometry {
            x: self.x,
            y: self.y,
            effective_width: self.effective_width,
            effective_height: self.effective_height,
            is_diagonal: self.is_diagonal,
            rotation: self.rotation,
        }
    }

    /// Occupied polygon for drawing
    pub fn outline(&self) -> Vec<Point> {
        self.geometry().outline()
    }

    /// Visible and collision-free
    pub fn can_commit(&self) -> bool {
        self.visible && !self.has_collision
    }

    /// Per-cell terrain for multi-terrain pieces
    pub fn cell_colors<'a>(&self, catalog: &'a PieceCatalog) -> Option<&'a CellGrid> {
        catalog
            .get(&self.piece_id)
            .and_then(|def| def.cell_colors.as_ref())
    }

    /// Map rectangles of the painted cells at the preview pose
    pub fn cell_rects<'a>(&self, catalog: &'a PieceCatalog) -> Option<Vec<(Rect, &'a TerrainId)>> {
        self.cell_colors(catalog)
            .map(|cells| self.geometry().cell_rects(cells))
    }
}

/// Snap, clamp and collision-check a raw top-left position.
///
/// Returns `None` when the definition has a non-positive size.
pub fn evaluate_at(
    definition: &PieceDefinition,
    rotation: Rotation,
    raw_top_left: Point,
    store: &impl PlacementStore,
    catalog: &PieceCatalog,
    exclude_id: Option<Uuid>,
) -> Option<PlacementPreview> {
    let (effective_width, effective_height) = definition.effective_size(rotation)?;
    let settings = store.map_settings();
    let level = store.active_level();
    let ctx = SnapContext::from_settings(
        &settings,
        store.placed_pieces(),
        level,
        catalog,
        exclude_id,
    );

    let (x, y) = snap(raw_top_left[0], raw_top_left[1], effective_width, effective_height, &ctx);
    let geometry = PieceGeometry {
        x,
        y,
        effective_width,
        effective_height,
        is_diagonal: definition.is_diagonal,
        rotation,
    };
    let has_collision = find_colliding(
        &geometry,
        store.placed_pieces().iter().filter(|p| p.level == level),
        catalog,
        exclude_id,
    );

    Some(PlacementPreview {
        piece_id: definition.id.clone(),
        x,
        y,
        rotation,
        effective_width,
        effective_height,
        is_diagonal: definition.is_diagonal,
        has_collision,
        visible: true,
    })
}

/// Like [`evaluate_at`], with the piece centered on a cursor position in map
/// inches
pub fn evaluate_centered(
    definition: &PieceDefinition,
    rotation: Rotation,
    cursor: Point,
    store: &impl PlacementStore,
    catalog: &PieceCatalog,
    exclude_id: Option<Uuid>,
) -> Option<PlacementPreview> {
    let (width, height) = definition.effective_size(rotation)?;
    let top_left = [cursor[0] - width / 2.0, cursor[1] - height / 2.0];
    evaluate_at(definition, rotation, top_left, store, catalog, exclude_id)
}
