//! Circle shape.

use super::{Color, ShapeId};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A circle, anchored at its center.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circle {
    pub(crate) id: ShapeId,
    /// Center point (the anchor).
    pub center: Point,
    /// Diameter.
    pub diameter: f64,
    /// Fill color.
    pub color: Color,
    /// Selection flag.
    pub selected: bool,
}

impl Circle {
    /// Create a new circle centered at `center`.
    pub fn new(center: Point, diameter: f64, color: Color) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            diameter,
            color,
            selected: false,
        }
    }

    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }

    /// Bounding box derived from center and diameter.
    pub fn bounds(&self) -> Rect {
        let r = self.radius();
        Rect::new(
            self.center.x - r,
            self.center.y - r,
            self.center.x + r,
            self.center.y + r,
        )
    }
}

impl PartialEq for Circle {
    fn eq(&self, other: &Self) -> bool {
        self.center == other.center
            && self.diameter == other.diameter
            && self.color == other.color
            && self.selected == other.selected
    }
}
