//! Piece instances placed on a map

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::piece::PieceId;
use crate::rotation::Rotation;

/// Position and rotation of a placed piece.
///
/// `x`/`y` is the top-left corner of the rotated bounding box, in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PiecePose {
    pub x: f64,
    pub y: f64,
    pub rotation: Rotation,
}

impl PiecePose {
    pub fn new(x: f64, y: f64, rotation: Rotation) -> Self {
        Self { x, y, rotation }
    }
}

/// A terrain piece placed on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedPiece {
    /// Unique identifier for this instance
    pub id: Uuid,
    /// The catalog definition this instance was placed from
    pub piece_id: PieceId,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub rotation: Rotation,
    /// Map level; pieces on different levels never collide
    #[serde(default)]
    pub level: i32,
}

impl PlacedPiece {
    /// Create a new placed piece with a fresh id
    pub fn new(piece_id: impl Into<PieceId>, pose: PiecePose, level: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            piece_id: piece_id.into(),
            x: pose.x,
            y: pose.y,
            rotation: pose.rotation,
            level,
        }
    }

    pub fn pose(&self) -> PiecePose {
        PiecePose::new(self.x, self.y, self.rotation)
    }

    /// Apply a partial update
    pub fn apply(&mut self, update: &PlacedPieceUpdate) {
        if let Some(x) = update.x {
            self.x = x;
        }
        if let Some(y) = update.y {
            self.y = y;
        }
        if let Some(rotation) = update.rotation {
            self.rotation = rotation;
        }
        if let Some(level) = update.level {
            self.level = level;
        }
    }

    /// Get a short display name
    pub fn get_display_name(&self) -> String {
        format!("{} ({})", self.piece_id, &self.id.to_string()[..8])
    }
}

/// Partial update for a placed piece; `None` fields are left unchanged
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlacedPieceUpdate {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub rotation: Option<Rotation>,
    pub level: Option<i32>,
}

impl PlacedPieceUpdate {
    /// Update position and rotation together
    pub fn pose(pose: PiecePose) -> Self {
        Self {
            x: Some(pose.x),
            y: Some(pose.y),
            rotation: Some(pose.rotation),
            level: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.rotation.is_none() && self.level.is_none()
    }
}
