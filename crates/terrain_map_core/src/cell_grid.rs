//! Paint grid for multi-terrain pieces
//!
//! A piece's physical size maps to a grid of `BASE_CELL_INCHES` cells. Custom
//! pieces store one terrain id per cell; renderers (2D preview and 3D
//! extrusion) draw each cell in its terrain's color.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::terrain::TerrainId;

/// Physical size of one paint cell, in inches
pub const BASE_CELL_INCHES: f64 = 3.0;

/// Rows x columns of a paint grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDimensions {
    pub rows: usize,
    pub cols: usize,
}

impl GridDimensions {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows: rows.max(1),
            cols: cols.max(1),
        }
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }
}

/// Derive the paint grid for a piece of `width` x `height` inches.
///
/// Each axis is rounded to the nearest whole cell with a minimum of one cell,
/// so a 4.5" x 3" piece has one row and two columns.
pub fn grid_dimensions(width: f64, height: f64) -> GridDimensions {
    GridDimensions::new(cells_along(height), cells_along(width))
}

fn cells_along(length: f64) -> usize {
    let cells = (length / BASE_CELL_INCHES).round();
    if cells.is_finite() && cells >= 1.0 {
        cells as usize
    } else {
        1
    }
}

/// Row-major grid of terrain ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellGrid {
    rows: Vec<Vec<TerrainId>>,
}

impl CellGrid {
    /// Create a grid with every cell set to `terrain`
    pub fn uniform(dimensions: GridDimensions, terrain: impl Into<TerrainId>) -> Self {
        let terrain = terrain.into();
        let dimensions = GridDimensions::new(dimensions.rows, dimensions.cols);
        Self {
            rows: vec![vec![terrain; dimensions.cols]; dimensions.rows],
        }
    }

    /// Wrap existing rows. Returns `None` for an empty or ragged grid.
    pub fn from_rows(rows: Vec<Vec<TerrainId>>) -> Option<Self> {
        let cols = rows.first()?.len();
        if cols == 0 || rows.iter().any(|row| row.len() != cols) {
            return None;
        }
        Some(Self { rows })
    }

    pub fn dimensions(&self) -> GridDimensions {
        GridDimensions {
            rows: self.rows.len(),
            cols: self.rows.first().map_or(0, Vec::len),
        }
    }

    /// False for grids deserialized with no cells or uneven rows
    pub fn is_well_formed(&self) -> bool {
        let cols = self.rows.first().map_or(0, Vec::len);
        cols > 0 && self.rows.iter().all(|row| row.len() == cols)
    }

    pub fn rows(&self) -> &[Vec<TerrainId>] {
        &self.rows
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&TerrainId> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Set one cell. Returns false when the cell is outside the grid.
    pub fn set_cell(&mut self, row: usize, col: usize, terrain: impl Into<TerrainId>) -> bool {
        match self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) => {
                *cell = terrain.into();
                true
            }
            None => false,
        }
    }

    /// Set every cell to `terrain`
    pub fn fill(&mut self, terrain: impl Into<TerrainId>) {
        let terrain = terrain.into();
        for cell in self.rows.iter_mut().flatten() {
            cell.clone_from(&terrain);
        }
    }

    /// Resize to new dimensions, keeping cells that exist in both grids and
    /// filling new cells with `fill`
    pub fn resized(&self, dimensions: GridDimensions, fill: impl Into<TerrainId>) -> Self {
        let fill = fill.into();
        let dimensions = GridDimensions::new(dimensions.rows, dimensions.cols);
        let rows = (0..dimensions.rows)
            .map(|row| {
                (0..dimensions.cols)
                    .map(|col| self.get(row, col).cloned().unwrap_or_else(|| fill.clone()))
                    .collect()
            })
            .collect();
        Self { rows }
    }

    /// Distinct terrain ids in row-major order of first appearance
    pub fn distinct_terrains(&self) -> Vec<TerrainId> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .flatten()
            .filter(|terrain| seen.insert(terrain.as_str()))
            .cloned()
            .collect()
    }

    /// True when every cell holds the same terrain
    pub fn is_uniform(&self) -> bool {
        self.distinct_terrains().len() <= 1
    }

    /// Iterate `(row, col, terrain)` in row-major order
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, &TerrainId)> {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, terrain)| (row, col, terrain))
        })
    }
}
