//! Unit conversion and the board coordinate offset
//!
//! Raw board descriptions measure everything in hundredths of an inch, in a
//! screen-down coordinate frame anchored at a per-board offset. All geometry
//! downstream works in millimeters, offset removed and y pointing up.
//!
//! Values are rounded to three decimal places, the finest precision the
//! board editor itself can represent.

use crate::error::DecodeError;
use crate::geom::types::Point;

/// Convert a distance from hundredths of an inch to millimeters, rounded to
/// three decimal places.
pub fn dist_to_mm(raw: f64) -> f64 {
    (raw * 0.254 * 1000.0).round() / 1000.0
}

/// The per-board coordinate offset, in raw units.
///
/// Every decoded point is expressed relative to this pair, so it must exist
/// before any point is converted; constructing it up front makes that
/// ordering structural.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Offset {
    x: f64,
    y: f64,
}

impl Offset {
    /// Build the offset, rejecting non-finite components.
    pub fn new(x: f64, y: f64) -> Result<Self, DecodeError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(DecodeError::NonFiniteOffset { x, y });
        }
        Ok(Offset { x, y })
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Convert a raw coordinate pair to an offset-corrected millimeter
    /// point. X is measured past the offset; y is measured from the offset
    /// downward, which flips it to point up.
    pub fn point_to_mm(&self, raw_x: f64, raw_y: f64) -> Point {
        Point::new(dist_to_mm(raw_x - self.x), dist_to_mm(self.y - raw_y))
    }
}
