//! Shape definitions for the scene model.

mod circle;
mod rectangle;
mod square;

pub use circle::Circle;
pub use rectangle::Rectangle;
pub use square::Square;

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Smallest side length a rectangle or square may be resized to.
pub const MIN_SIDE: f64 = 20.0;
/// Smallest diameter a circle may be resized to.
pub const MIN_DIAMETER: f64 = 20.0;

/// The fixed drawing palette.
///
/// Unrecognized tokens fall back to `Red` when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Color {
    #[default]
    Red,
    Blue,
    Green,
    Yellow,
    Black,
}

impl Color {
    /// Parse a palette token. Unrecognized input yields `Red`, never an error.
    pub fn from_token(token: &str) -> Self {
        match token.to_ascii_uppercase().as_str() {
            "RED" => Color::Red,
            "BLUE" => Color::Blue,
            "GREEN" => Color::Green,
            "YELLOW" => Color::Yellow,
            "BLACK" => Color::Black,
            _ => Color::Red,
        }
    }

    /// The canonical uppercase token used by the scene text format.
    pub fn token(self) -> &'static str {
        match self {
            Color::Red => "RED",
            Color::Blue => "BLUE",
            Color::Green => "GREEN",
            Color::Yellow => "YELLOW",
            Color::Black => "BLACK",
        }
    }

    /// Convert to a render color.
    pub fn to_peniko(self) -> peniko::Color {
        let (r, g, b) = match self {
            Color::Red => (255, 0, 0),
            Color::Blue => (0, 0, 255),
            Color::Green => (0, 255, 0),
            Color::Yellow => (255, 255, 0),
            Color::Black => (0, 0, 0),
        };
        peniko::Color::from_rgba8(r, g, b, 255)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// Which kind of shape a tool draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ShapeKind {
    #[default]
    Square,
    Circle,
    Rectangle,
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapeKind::Square => f.write_str("SQUARE"),
            ShapeKind::Circle => f.write_str("CIRCLE"),
            ShapeKind::Rectangle => f.write_str("RECTANGLE"),
        }
    }
}

/// Enum wrapper over all shape variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Shape {
    Circle(Circle),
    Rectangle(Rectangle),
    Square(Square),
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Circle(s) => s.id,
            Shape::Rectangle(s) => s.id,
            Shape::Square(s) => s.id,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Square(_) => ShapeKind::Square,
        }
    }

    /// Axis-aligned bounding box, derived from anchor and size.
    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Circle(s) => s.bounds(),
            Shape::Rectangle(s) => s.bounds(),
            Shape::Square(s) => s.bounds(),
        }
    }

    /// Point containment test against the bounding box.
    pub fn contains(&self, point: Point) -> bool {
        self.bounds().contains(point)
    }

    /// Bounding-box overlap test against a selection rectangle.
    pub fn intersects_rect(&self, rect: Rect) -> bool {
        rect.intersect(self.bounds()).area() > 0.0
    }

    /// Move the shape by a delta. The bounding box follows the anchor.
    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Shape::Circle(s) => s.center += delta,
            Shape::Rectangle(s) => s.origin += delta,
            Shape::Square(s) => s.origin += delta,
        }
    }

    /// Scale the shape about its anchor, clamped to the minimum sizes.
    pub fn scale(&mut self, factor: f64) {
        match self {
            Shape::Circle(s) => s.diameter = (s.diameter * factor).max(MIN_DIAMETER),
            Shape::Rectangle(s) => {
                s.width = (s.width * factor).max(MIN_SIDE);
                s.height = (s.height * factor).max(MIN_SIDE);
            }
            Shape::Square(s) => s.size = (s.size * factor).max(MIN_SIDE),
        }
    }

    /// Rotate by a delta in degrees. Circles are unaffected.
    pub fn rotate(&mut self, delta_deg: f64) {
        match self {
            Shape::Circle(_) => {}
            Shape::Rectangle(s) => s.rotate(delta_deg),
            Shape::Square(s) => s.rotate(delta_deg),
        }
    }

    /// Whether `rotate` has any effect on this shape.
    pub fn supports_rotation(&self) -> bool {
        !matches!(self, Shape::Circle(_))
    }

    pub fn color(&self) -> Color {
        match self {
            Shape::Circle(s) => s.color,
            Shape::Rectangle(s) => s.color,
            Shape::Square(s) => s.color,
        }
    }

    pub fn set_color(&mut self, color: Color) {
        match self {
            Shape::Circle(s) => s.color = color,
            Shape::Rectangle(s) => s.color = color,
            Shape::Square(s) => s.color = color,
        }
    }

    pub fn selected(&self) -> bool {
        match self {
            Shape::Circle(s) => s.selected,
            Shape::Rectangle(s) => s.selected,
            Shape::Square(s) => s.selected,
        }
    }

    pub fn set_selected(&mut self, selected: bool) {
        match self {
            Shape::Circle(s) => s.selected = selected,
            Shape::Rectangle(s) => s.selected = selected,
            Shape::Square(s) => s.selected = selected,
        }
    }

    /// Center of the bounding box.
    pub fn center(&self) -> Point {
        self.bounds().center()
    }
}

// Value equality: compares geometry, color, and selection; the id is identity,
// not value, so clones and round-tripped shapes compare equal.
impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Shape::Circle(a), Shape::Circle(b)) => a == b,
            (Shape::Rectangle(a), Shape::Rectangle(b)) => a == b,
            (Shape::Square(a), Shape::Square(b)) => a == b,
            _ => false,
        }
    }
}

/// Normalize an angle in degrees to `[0, 360)`.
pub(crate) fn normalize_degrees(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}
