//! Piece definitions from the terrain inventory

use serde::{Deserialize, Serialize};

use crate::cell_grid::{grid_dimensions, CellGrid, GridDimensions};
use crate::rotation::Rotation;
use crate::MapError;

/// Identifier of a piece definition, as issued by the inventory
pub type PieceId = String;

/// Physical size of a piece in inches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PieceSize {
    pub width: f64,
    pub height: f64,
}

impl PieceSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both sides finite and strictly positive
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// A catalog entry describing one kind of physical terrain piece.
///
/// Diagonal pieces occupy the right triangle of their bounding box whose right
/// angle sits at the local origin corner; rotation moves that corner clockwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieceDefinition {
    pub id: PieceId,
    #[serde(default)]
    pub name: String,
    pub size: PieceSize,
    #[serde(default)]
    pub is_diagonal: bool,
    /// Rotation applied when a diagonal piece is first picked from the palette
    #[serde(default)]
    pub default_rotation: Rotation,
    /// Terrain of a uniform piece
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terrain_id: Option<String>,
    /// Per-cell terrain of a custom multi-terrain piece
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_colors: Option<CellGrid>,
}

impl PieceDefinition {
    /// Create a rectangular piece definition
    pub fn new(id: impl Into<PieceId>, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            size: PieceSize::new(width, height),
            is_diagonal: false,
            default_rotation: Rotation::R0,
            terrain_id: None,
            cell_colors: None,
        }
    }

    /// Create a diagonal (wedge) piece definition
    pub fn diagonal(
        id: impl Into<PieceId>,
        width: f64,
        height: f64,
        default_rotation: Rotation,
    ) -> Self {
        Self {
            is_diagonal: true,
            default_rotation,
            ..Self::new(id, width, height)
        }
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the uniform terrain
    pub fn with_terrain(mut self, terrain_id: impl Into<String>) -> Self {
        self.terrain_id = Some(terrain_id.into());
        self
    }

    /// Set per-cell terrain
    pub fn with_cell_colors(mut self, cells: CellGrid) -> Self {
        self.cell_colors = Some(cells);
        self
    }

    /// Paint grid dimensions derived from the physical size
    pub fn grid_dimensions(&self) -> GridDimensions {
        grid_dimensions(self.size.width, self.size.height)
    }

    /// Bounding box size after rotation, or `None` for non-positive sizes
    pub fn effective_size(&self, rotation: Rotation) -> Option<(f64, f64)> {
        if !self.size.is_valid() {
            return None;
        }
        Some(rotation.apply_to_size(self.size.width, self.size.height))
    }

    /// Rotation a fresh palette pick starts with.
    ///
    /// Diagonal pieces start at their default rotation; rectangular pieces
    /// keep whatever rotation the user has dialed in.
    pub fn initial_rotation(&self, current: Rotation) -> Rotation {
        if self.is_diagonal {
            self.default_rotation
        } else {
            current
        }
    }

    /// Has per-cell terrain with more than one terrain
    pub fn is_multi_terrain(&self) -> bool {
        self.cell_colors.as_ref().is_some_and(|cells| !cells.is_uniform())
    }

    /// Check size and cell grid consistency
    pub fn validate(&self) -> Result<(), MapError> {
        if !self.size.is_valid() {
            return Err(MapError::ValidationError(format!(
                "Piece '{}' has non-positive size {}x{}",
                self.id, self.size.width, self.size.height
            )));
        }
        if let Some(cells) = &self.cell_colors {
            if !cells.is_well_formed() {
                return Err(MapError::ValidationError(format!(
                    "Piece '{}' has an empty or ragged cell grid",
                    self.id
                )));
            }
            let expected = self.grid_dimensions();
            let actual = cells.dimensions();
            if expected != actual {
                return Err(MapError::ValidationError(format!(
                    "Piece '{}' cell grid is {}x{}, expected {}x{} for its size",
                    self.id, actual.rows, actual.cols, expected.rows, expected.cols
                )));
            }
        }
        Ok(())
    }
}
