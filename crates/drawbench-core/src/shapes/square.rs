//! Square shape.

use super::{Color, ShapeId, normalize_degrees};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A square, anchored at its top-left corner.
///
/// Kept as its own variant rather than a constrained rectangle so resizing
/// can never break the equal-sides invariant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Square {
    pub(crate) id: ShapeId,
    /// Top-left corner (the anchor).
    pub origin: Point,
    /// Side length.
    pub size: f64,
    /// Rotation in degrees, normalized to `[0, 360)`.
    #[serde(default)]
    pub rotation_deg: f64,
    /// Fill color.
    pub color: Color,
    /// Selection flag.
    pub selected: bool,
}

impl Square {
    /// Create a new square with its top-left corner at `origin`.
    pub fn new(origin: Point, size: f64, color: Color) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin,
            size,
            rotation_deg: 0.0,
            color,
            selected: false,
        }
    }

    /// Create a square centered on a click point.
    pub fn centered_at(center: Point, size: f64, color: Color) -> Self {
        Self::new(
            Point::new(center.x - size / 2.0, center.y - size / 2.0),
            size,
            color,
        )
    }

    /// Bounding box derived from origin and side length.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.origin.x,
            self.origin.y,
            self.origin.x + self.size,
            self.origin.y + self.size,
        )
    }

    /// Rotate by a delta in degrees.
    pub fn rotate(&mut self, delta_deg: f64) {
        self.rotation_deg = normalize_degrees(self.rotation_deg + delta_deg);
    }
}

impl PartialEq for Square {
    fn eq(&self, other: &Self) -> bool {
        self.origin == other.origin
            && self.size == other.size
            && self.rotation_deg == other.rotation_deg
            && self.color == other.color
            && self.selected == other.selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_at_offsets_origin() {
        let square = Square::centered_at(Point::new(50.0, 50.0), 100.0, Color::Red);
        assert_eq!(square.origin, Point::new(0.0, 0.0));
        assert_eq!(square.bounds().center(), Point::new(50.0, 50.0));
    }

    #[test]
    fn bounds_are_square() {
        let square = Square::new(Point::new(10.0, 10.0), 30.0, Color::Black);
        let bounds = square.bounds();
        assert_eq!(bounds.width(), bounds.height());
        assert_eq!(bounds, Rect::new(10.0, 10.0, 40.0, 40.0));
    }
}
