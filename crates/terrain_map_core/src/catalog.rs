//! Read-only snapshot of the terrain inventory

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::piece::{PieceDefinition, PieceId};
use crate::terrain::{Color, TerrainId, TerrainType};
use crate::MapError;

/// Serialized catalog layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogFile {
    #[serde(default)]
    pieces: Vec<PieceDefinition>,
    #[serde(default)]
    terrain_types: Vec<TerrainType>,
}

/// Piece definitions and terrain types available to the editor
#[derive(Debug, Clone, Default)]
pub struct PieceCatalog {
    pieces: Vec<PieceDefinition>,
    piece_index: HashMap<PieceId, usize>,
    terrains: HashMap<TerrainId, TerrainType>,
}

impl PieceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog, skipping definitions that fail validation
    pub fn from_parts(pieces: Vec<PieceDefinition>, terrain_types: Vec<TerrainType>) -> Self {
        let mut catalog = Self::new();
        for piece in pieces {
            catalog.insert_piece(piece);
        }
        for terrain in terrain_types {
            catalog.insert_terrain(terrain);
        }
        catalog
    }

    /// Add or replace a piece definition. Invalid definitions are skipped.
    pub fn insert_piece(&mut self, piece: PieceDefinition) -> bool {
        if let Err(e) = piece.validate() {
            tracing::warn!("Skipping piece definition: {}", e);
            return false;
        }
        match self.piece_index.get(&piece.id) {
            Some(&idx) => self.pieces[idx] = piece,
            None => {
                self.piece_index.insert(piece.id.clone(), self.pieces.len());
                self.pieces.push(piece);
            }
        }
        true
    }

    /// Add or replace a terrain type
    pub fn insert_terrain(&mut self, terrain: TerrainType) {
        self.terrains.insert(terrain.id.clone(), terrain);
    }

    /// Look up a piece definition by id
    pub fn get(&self, id: &str) -> Option<&PieceDefinition> {
        self.piece_index.get(id).map(|&idx| &self.pieces[idx])
    }

    /// All piece definitions in insertion order
    pub fn pieces(&self) -> &[PieceDefinition] {
        &self.pieces
    }

    pub fn terrain(&self, id: &str) -> Option<&TerrainType> {
        self.terrains.get(id)
    }

    /// Display color of a terrain, falling back for unknown ids
    pub fn terrain_color(&self, id: &str) -> Color {
        self.terrain(id)
            .map(TerrainType::display_color)
            .unwrap_or(Color::FALLBACK)
    }

    /// Display name of a terrain, or the raw id when unknown
    pub fn terrain_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.terrain(id).map_or(id, |t| t.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Parse a catalog from a JSON string
    pub fn from_json(json: &str) -> Result<Self, MapError> {
        let file: CatalogFile =
            serde_json::from_str(json).map_err(|e| MapError::ParseError(e.to_string()))?;
        Ok(Self::from_parts(file.pieces, file.terrain_types))
    }

    /// Load a catalog from a JSON file
    pub fn load(path: &Path) -> Result<Self, MapError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| MapError::IoError(e.to_string()))?;
        Self::from_json(&content)
    }

    /// Serialize the catalog to pretty JSON
    pub fn to_json(&self) -> Result<String, MapError> {
        let mut terrain_types: Vec<TerrainType> = self.terrains.values().cloned().collect();
        terrain_types.sort_by(|a, b| a.id.cmp(&b.id));
        let file = CatalogFile {
            pieces: self.pieces.clone(),
            terrain_types,
        };
        serde_json::to_string_pretty(&file).map_err(|e| MapError::ParseError(e.to_string()))
    }
}
