//! Rectangle shape.

use super::{Color, ShapeId, normalize_degrees};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A rectangle, anchored at its top-left corner.
///
/// Rotation is a display attribute in degrees around the center; the bounding
/// box stays axis-aligned and is not affected by it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    /// Top-left corner (the anchor).
    pub origin: Point,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
    /// Rotation in degrees, normalized to `[0, 360)`.
    #[serde(default)]
    pub rotation_deg: f64,
    /// Fill color.
    pub color: Color,
    /// Selection flag.
    pub selected: bool,
}

impl Rectangle {
    /// Create a new rectangle with its top-left corner at `origin`.
    pub fn new(origin: Point, width: f64, height: f64, color: Color) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin,
            width,
            height,
            rotation_deg: 0.0,
            color,
            selected: false,
        }
    }

    /// Create a rectangle centered on a click point.
    pub fn centered_at(center: Point, width: f64, height: f64, color: Color) -> Self {
        Self::new(
            Point::new(center.x - width / 2.0, center.y - height / 2.0),
            width,
            height,
            color,
        )
    }

    /// Bounding box derived from origin and size.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.origin.x,
            self.origin.y,
            self.origin.x + self.width,
            self.origin.y + self.height,
        )
    }

    /// Rotate by a delta in degrees.
    pub fn rotate(&mut self, delta_deg: f64) {
        self.rotation_deg = normalize_degrees(self.rotation_deg + delta_deg);
    }
}

impl PartialEq for Rectangle {
    fn eq(&self, other: &Self) -> bool {
        self.origin == other.origin
            && self.width == other.width
            && self.height == other.height
            && self.rotation_deg == other.rotation_deg
            && self.color == other.color
            && self.selected == other.selected
    }
}
