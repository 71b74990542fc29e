//! Quarter-turn rotation for terrain pieces

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rotation of a piece in 90° steps, clockwise in screen space (y down)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    /// All rotations in clockwise order
    pub const ALL: [Rotation; 4] = [Rotation::R0, Rotation::R90, Rotation::R180, Rotation::R270];

    /// Rotation in degrees (0, 90, 180 or 270)
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 90,
            Rotation::R180 => 180,
            Rotation::R270 => 270,
        }
    }

    /// Build from any multiple of 90 degrees, normalizing into 0..360
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        if degrees % 90 != 0 {
            return None;
        }
        match degrees.rem_euclid(360) {
            0 => Some(Rotation::R0),
            90 => Some(Rotation::R90),
            180 => Some(Rotation::R180),
            270 => Some(Rotation::R270),
            _ => None,
        }
    }

    /// Next rotation, 90° clockwise
    pub fn next_clockwise(self) -> Self {
        match self {
            Rotation::R0 => Rotation::R90,
            Rotation::R90 => Rotation::R180,
            Rotation::R180 => Rotation::R270,
            Rotation::R270 => Rotation::R0,
        }
    }

    /// True when this rotation swaps the bounding box axes (90° and 270°)
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::R90 | Rotation::R270)
    }

    /// Width/height of a `width` x `height` box after applying this rotation
    pub fn apply_to_size(self, width: f64, height: f64) -> (f64, f64) {
        if self.swaps_axes() {
            (height, width)
        } else {
            (width, height)
        }
    }
}

impl From<Rotation> for i32 {
    fn from(rotation: Rotation) -> Self {
        i32::from(rotation.degrees())
    }
}

impl TryFrom<i32> for Rotation {
    type Error = String;

    fn try_from(degrees: i32) -> Result<Self, Self::Error> {
        Rotation::from_degrees(degrees)
            .ok_or_else(|| format!("rotation must be a multiple of 90 degrees, got {degrees}"))
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_clockwise_cycles() {
        let mut rotation = Rotation::R0;
        for expected in [Rotation::R90, Rotation::R180, Rotation::R270, Rotation::R0] {
            rotation = rotation.next_clockwise();
            assert_eq!(rotation, expected);
        }
    }

    #[test]
    fn test_from_degrees_normalizes() {
        assert_eq!(Rotation::from_degrees(450), Some(Rotation::R90));
        assert_eq!(Rotation::from_degrees(-90), Some(Rotation::R270));
        assert_eq!(Rotation::from_degrees(45), None);
    }

    #[test]
    fn test_apply_to_size_swaps_on_quarter_turns() {
        assert_eq!(Rotation::R90.apply_to_size(2.0, 4.0), (4.0, 2.0));
        assert_eq!(Rotation::R270.apply_to_size(2.0, 4.0), (4.0, 2.0));
        assert_eq!(Rotation::R180.apply_to_size(2.0, 4.0), (2.0, 4.0));
    }

    #[test]
    fn test_rotation_serializes_as_degrees() {
        let json = serde_json::to_string(&Rotation::R270).unwrap();
        assert_eq!(json, "270");
        let parsed: Rotation = serde_json::from_str("180").unwrap();
        assert_eq!(parsed, Rotation::R180);
        assert!(serde_json::from_str::<Rotation>("30").is_err());
    }
}
