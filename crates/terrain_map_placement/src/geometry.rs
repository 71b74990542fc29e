//! Occupied geometry of rectangular and diagonal pieces
//!
//! This is the single place that defines effective dimensions and the corner
//! anchor of diagonal pieces. The 2D preview, the collision kernel and the 3D
//! extrusion all read outlines from here.

use terrain_map_core::{CellGrid, PieceDefinition, PiecePose, PlacedPiece, Rotation, TerrainId};

/// A point in map inches (x right, y down)
pub type Point = [f64; 2];

/// Corner of the bounding box holding a diagonal piece's right angle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    /// Right-angle corner for a rotation: 0° is top-left, each quarter turn
    /// moves it clockwise
    pub fn for_rotation(rotation: Rotation) -> Self {
        match rotation {
            Rotation::R0 => Corner::TopLeft,
            Rotation::R90 => Corner::TopRight,
            Rotation::R180 => Corner::BottomRight,
            Rotation::R270 => Corner::BottomLeft,
        }
    }
}

/// Axis-aligned rectangle in map inches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Interiors overlap. Shared edges and corners do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Open vertical extents overlap
    pub fn overlaps_vertically(&self, other: &Rect) -> bool {
        self.y < other.bottom() && self.bottom() > other.y
    }

    /// Open horizontal extents overlap
    pub fn overlaps_horizontally(&self, other: &Rect) -> bool {
        self.x < other.right() && self.right() > other.x
    }

    /// Inclusive containment
    pub fn contains(&self, point: Point) -> bool {
        point[0] >= self.x
            && point[0] <= self.right()
            && point[1] >= self.y
            && point[1] <= self.bottom()
    }
}

/// Post-rotation geometry of a piece on the map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieceGeometry {
    pub x: f64,
    pub y: f64,
    pub effective_width: f64,
    pub effective_height: f64,
    pub is_diagonal: bool,
    pub rotation: Rotation,
}

impl PieceGeometry {
    /// Geometry of `definition` at `pose`, or `None` for non-positive sizes
    pub fn from_definition(definition: &PieceDefinition, pose: PiecePose) -> Option<Self> {
        let (effective_width, effective_height) = definition.effective_size(pose.rotation)?;
        Some(Self {
            x: pose.x,
            y: pose.y,
            effective_width,
            effective_height,
            is_diagonal: definition.is_diagonal,
            rotation: pose.rotation,
        })
    }

    /// Geometry of an already-placed piece
    pub fn of_placed(placed: &PlacedPiece, definition: &PieceDefinition) -> Option<Self> {
        Self::from_definition(definition, placed.pose())
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.effective_width, self.effective_height)
    }

    /// Right-angle corner, for diagonal pieces
    pub fn anchor(&self) -> Option<Corner> {
        self.is_diagonal.then(|| Corner::for_rotation(self.rotation))
    }

    /// Occupied polygon, clockwise on screen (y down).
    ///
    /// Rectangles yield four vertices starting at the top-left. Diagonal pieces
    /// yield three, starting at the right-angle corner.
    pub fn outline(&self) -> Vec<Point> {
        let (x0, y0) = (self.x, self.y);
        let (x1, y1) = (self.x + self.effective_width, self.y + self.effective_height);
        match self.anchor() {
            None => vec![[x0, y0], [x1, y0], [x1, y1], [x0, y1]],
            Some(Corner::TopLeft) => vec![[x0, y0], [x1, y0], [x0, y1]],
            Some(Corner::TopRight) => vec![[x1, y0], [x1, y1], [x0, y0]],
            Some(Corner::BottomRight) => vec![[x1, y1], [x0, y1], [x1, y0]],
            Some(Corner::BottomLeft) => vec![[x0, y1], [x0, y0], [x1, y1]],
        }
    }

    /// Center of the bounding box
    pub fn center(&self) -> Point {
        [
            self.x + self.effective_width / 2.0,
            self.y + self.effective_height / 2.0,
        ]
    }

    /// Whether a map point lies in the occupied area (edges included)
    pub fn contains_point(&self, point: Point) -> bool {
        if !self.bounds().contains(point) {
            return false;
        }
        if !self.is_diagonal {
            return true;
        }
        let outline = self.outline();
        let mut sign = 0.0;
        for i in 0..outline.len() {
            let a = outline[i];
            let b = outline[(i + 1) % outline.len()];
            let cross = (b[0] - a[0]) * (point[1] - a[1]) - (b[1] - a[1]) * (point[0] - a[0]);
            if cross.abs() <= f64::EPSILON {
                continue;
            }
            if sign == 0.0 {
                sign = cross.signum();
            } else if cross.signum() != sign {
                return false;
            }
        }
        true
    }

    /// Map rectangle of every painted cell of `cells` laid over this piece.
    ///
    /// The grid is authored on the unrotated piece (rows run down its height)
    /// and turns with it. Diagonal pieces drop cells centered in the empty half.
    pub fn cell_rects<'g>(&self, cells: &'g CellGrid) -> Vec<(Rect, &'g TerrainId)> {
        let dims = cells.dimensions();
        if dims.rows == 0 || dims.cols == 0 {
            return Vec::new();
        }
        // Undo the axis swap to get the authored size
        let (width, height) = self
            .rotation
            .apply_to_size(self.effective_width, self.effective_height);
        let cell_w = width / dims.cols as f64;
        let cell_h = height / dims.rows as f64;

        cells
            .iter_cells()
            .filter_map(|(row, col, terrain)| {
                let (u, v) = (col as f64 * cell_w, row as f64 * cell_h);
                let a = self.local_to_map([u, v], width, height);
                let b = self.local_to_map([u + cell_w, v + cell_h], width, height);
                let rect = Rect::new(
                    a[0].min(b[0]),
                    a[1].min(b[1]),
                    (b[0] - a[0]).abs(),
                    (b[1] - a[1]).abs(),
                );
                let center = [rect.x + rect.width / 2.0, rect.y + rect.height / 2.0];
                (!self.is_diagonal || self.contains_point(center)).then_some((rect, terrain))
            })
            .collect()
    }

    /// Unrotated piece-local point to map inches
    fn local_to_map(&self, [u, v]: Point, width: f64, height: f64) -> Point {
        let (dx, dy) = match self.rotation {
            Rotation::R0 => (u, v),
            Rotation::R90 => (height - v, u),
            Rotation::R180 => (width - u, height - v),
            Rotation::R270 => (v, width - u),
        };
        [self.x + dx, self.y + dy]
    }
}
