//! Grid and magnetic snapping for candidate placements

use terrain_map_core::{MapSettings, PieceCatalog, PlacedPiece};
use uuid::Uuid;

use crate::geometry::{PieceGeometry, Rect};

/// Maximum edge-to-edge distance (inches) that magnetic snap will close
pub const MAGNETIC_SNAP_THRESHOLD: f64 = 0.75;

/// Everything the snapping engine needs besides the raw position
#[derive(Debug, Clone, Copy)]
pub struct SnapContext<'a> {
    pub grid_enabled: bool,
    pub magnetic_enabled: bool,
    pub cell_size: f64,
    pub map_width: f64,
    pub map_height: f64,
    /// Placed pieces; only those on `level` are considered
    pub neighbors: &'a [PlacedPiece],
    pub level: i32,
    pub catalog: &'a PieceCatalog,
    /// The piece being moved, which never attracts itself
    pub exclude_id: Option<Uuid>,
}

impl<'a> SnapContext<'a> {
    /// Context built from map settings
    pub fn from_settings(
        settings: &MapSettings,
        neighbors: &'a [PlacedPiece],
        level: i32,
        catalog: &'a PieceCatalog,
        exclude_id: Option<Uuid>,
    ) -> Self {
        Self {
            grid_enabled: settings.snap_to_grid,
            magnetic_enabled: settings.magnetic_snap,
            cell_size: settings.cell_size,
            map_width: settings.width,
            map_height: settings.height,
            neighbors,
            level,
            catalog,
            exclude_id,
        }
    }
}

/// Round to the nearest multiple of `cell_size`
pub fn snap_to_grid(value: f64, cell_size: f64) -> f64 {
    if cell_size > 0.0 {
        (value / cell_size).round() * cell_size
    } else {
        value
    }
}

/// Best displacement per axis found so far
#[derive(Debug, Clone, Copy)]
struct AxisSnap {
    distance: f64,
    target: Option<f64>,
}

impl AxisSnap {
    fn new() -> Self {
        Self {
            distance: MAGNETIC_SNAP_THRESHOLD,
            target: None,
        }
    }

    /// Consider the four edge alignments of a span `[start, start + len]`
    /// against a neighbor span `[n_start, n_end]`
    fn consider(&mut self, start: f64, len: f64, n_start: f64, n_end: f64) {
        let end = start + len;
        let candidates = [
            // far edge against neighbor's near edge
            (n_start - end, n_start - len),
            // near edge against neighbor's far edge
            (n_end - start, n_end),
            // near to near
            (n_start - start, n_start),
            // far to far
            (n_end - end, n_end - len),
        ];
        for (displacement, target) in candidates {
            let distance = displacement.abs();
            if distance < self.distance {
                self.distance = distance;
                self.target = Some(target);
            }
        }
    }
}

/// Align a candidate to nearby pieces' edges.
///
/// X alignments are only considered against neighbors whose vertical extent
/// overlaps the candidate's, and Y alignments against neighbors whose
/// horizontal extent overlaps. The closest alignment under
/// `MAGNETIC_SNAP_THRESHOLD` wins on each axis independently.
pub fn magnetic_snap(x: f64, y: f64, width: f64, height: f64, ctx: &SnapContext) -> (f64, f64) {
    let candidate = Rect::new(x, y, width, height);
    let mut snap_x = AxisSnap::new();
    let mut snap_y = AxisSnap::new();

    for neighbor in ctx.neighbors {
        if neighbor.level != ctx.level || Some(neighbor.id) == ctx.exclude_id {
            continue;
        }
        let Some(bounds) = ctx
            .catalog
            .get(&neighbor.piece_id)
            .and_then(|def| PieceGeometry::of_placed(neighbor, def))
            .map(|geom| geom.bounds())
        else {
            continue;
        };

        if candidate.overlaps_vertically(&bounds) {
            snap_x.consider(x, width, bounds.x, bounds.right());
        }
        if candidate.overlaps_horizontally(&bounds) {
            snap_y.consider(y, height, bounds.y, bounds.bottom());
        }
    }

    (snap_x.target.unwrap_or(x), snap_y.target.unwrap_or(y))
}

/// Keep a `width` x `height` box inside the map
pub fn clamp_to_map(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    map_width: f64,
    map_height: f64,
) -> (f64, f64) {
    let max_x = (map_width - width).max(0.0);
    let max_y = (map_height - height).max(0.0);
    (x.clamp(0.0, max_x), y.clamp(0.0, max_y))
}

/// Largest multiple of `cell_size` that is at most `limit`
fn grid_floor(limit: f64, cell_size: f64) -> f64 {
    if cell_size > 0.0 {
        ((limit / cell_size + 1e-9).floor() * cell_size).max(0.0)
    } else {
        limit
    }
}

/// Snap a raw top-left position for a piece with the given effective size.
///
/// Grid snap runs first; magnetic snap is evaluated against the grid-snapped
/// position and overrides it on any axis where an alignment was found. The
/// result is clamped so the piece stays inside the map. With grid snap on,
/// the clamp stops at the last grid line where the piece still fits, so a
/// snapped position never leaves the grid.
pub fn snap(
    raw_x: f64,
    raw_y: f64,
    effective_width: f64,
    effective_height: f64,
    ctx: &SnapContext,
) -> (f64, f64) {
    let (mut x, mut y) = (raw_x, raw_y);

    if ctx.grid_enabled {
        x = snap_to_grid(x, ctx.cell_size);
        y = snap_to_grid(y, ctx.cell_size);
    }

    if ctx.magnetic_enabled {
        (x, y) = magnetic_snap(x, y, effective_width, effective_height, ctx);
    }

    if ctx.grid_enabled {
        let max_x = grid_floor((ctx.map_width - effective_width).max(0.0), ctx.cell_size);
        let max_y = grid_floor((ctx.map_height - effective_height).max(0.0), ctx.cell_size);
        return (x.clamp(0.0, max_x), y.clamp(0.0, max_y));
    }
    clamp_to_map(x, y, effective_width, effective_height, ctx.map_width, ctx.map_height)
}
