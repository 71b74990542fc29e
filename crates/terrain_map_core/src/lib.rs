//! Core data structures for the terrain map designer
//!
//! This crate provides the fundamental types for describing modular terrain:
//! - `PieceDefinition` - A catalog entry (size, diagonal flag, per-cell terrain)
//! - `PlacedPiece` - A piece instance positioned on a map level
//! - `Rotation` - Quarter-turn rotation shared by 2D and 3D views
//! - `CellGrid` - Paint grid for multi-terrain pieces
//! - `PieceCatalog` - Read-only inventory snapshot
//! - `TerrainMap` - Map settings plus the placed piece list
//!
//! This crate has no renderer dependency.

mod catalog;
mod cell_grid;
mod map;
mod piece;
mod placed;
mod rotation;
mod terrain;

pub use catalog::PieceCatalog;
pub use cell_grid::{grid_dimensions, CellGrid, GridDimensions, BASE_CELL_INCHES};
pub use map::{MapSettings, TerrainMap};
pub use piece::{PieceDefinition, PieceId, PieceSize};
pub use placed::{PiecePose, PlacedPiece, PlacedPieceUpdate};
pub use rotation::Rotation;
pub use terrain::{Color, TerrainId, TerrainType};

use thiserror::Error;

/// Errors that can occur when loading or validating catalogs and maps
#[derive(Debug, Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
}
