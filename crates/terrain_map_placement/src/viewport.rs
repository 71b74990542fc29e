//! Screen pixel <-> map inch conversion

use crate::geometry::Point;

/// Default zoom: one inch on the table is this many screen pixels
pub const DEFAULT_PIXELS_PER_INCH: f64 = 20.0;

/// How the map is drawn on the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub pixels_per_inch: f64,
    /// Canvas pixel position of the map origin
    pub pan: Point,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pixels_per_inch: DEFAULT_PIXELS_PER_INCH,
            pan: [0.0, 0.0],
        }
    }
}

impl Viewport {
    pub fn new(pixels_per_inch: f64, pan: Point) -> Self {
        Self {
            pixels_per_inch,
            pan,
        }
    }

    /// Canvas pixels to map inches
    pub fn to_map(&self, screen: Point) -> Point {
        let scale = self.scale();
        [
            (screen[0] - self.pan[0]) / scale,
            (screen[1] - self.pan[1]) / scale,
        ]
    }

    /// Map inches to canvas pixels
    pub fn to_screen(&self, map: Point) -> Point {
        let scale = self.scale();
        [map[0] * scale + self.pan[0], map[1] * scale + self.pan[1]]
    }

    fn scale(&self) -> f64 {
        if self.pixels_per_inch > 0.0 {
            self.pixels_per_inch
        } else {
            DEFAULT_PIXELS_PER_INCH
        }
    }
}
