//! Terrain types used to color pieces and grid cells

use serde::{Deserialize, Serialize};

/// Identifier of a terrain type, as issued by the inventory
pub type TerrainId = String;

/// Simple RGB color for terrain visualization (no renderer dependency)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Fallback used when a terrain has no parseable color
    pub const FALLBACK: Self = Self::rgb(0, 200, 100);

    /// Parse a hex color string like "#FF0000" or "FF0000"
    pub fn from_hex(color_str: &str) -> Option<Self> {
        let hex = color_str.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }

    /// Format as "#RRGGBB"
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Normalized components for renderers working in 0..1
    pub fn to_f32_array(&self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::FALLBACK
    }
}

/// A terrain type from the inventory (grass, water, rock...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainType {
    pub id: TerrainId,
    pub name: String,
    /// Display color as a hex string
    #[serde(default)]
    pub color: String,
}

impl TerrainType {
    pub fn new(
        id: impl Into<TerrainId>,
        name: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
        }
    }

    /// Parsed display color, falling back when the stored value is malformed
    pub fn display_color(&self) -> Color {
        Color::from_hex(&self.color).unwrap_or(Color::FALLBACK)
    }
}
