//! Scene: an ordered collection of shapes plus rubber-band selection state.

use crate::shapes::{Shape, ShapeId};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Rubber-band drag state while a selection rectangle is being swept out.
#[derive(Debug, Clone)]
struct DragState {
    /// Corner where the drag started.
    start: Point,
    /// Current normalized selection rectangle.
    rect: Rect,
}

/// An ordered scene of shapes.
///
/// Insertion order is z-order: the first shape added is drawn underneath.
/// Selection is a per-shape flag; the scene only aggregates over it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    shapes: Vec<Shape>,
    #[serde(skip)]
    drag: Option<DragState>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a scene from an existing shape list, preserving order.
    pub fn from_shapes(shapes: Vec<Shape>) -> Self {
        Self { shapes, drag: None }
    }

    /// Add a shape on top of the z-order.
    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Remove a shape by id. Returns the shape if it was present.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        let pos = self.shapes.iter().position(|s| s.id() == id)?;
        Some(self.shapes.remove(pos))
    }

    /// Remove every selected shape. Returns how many were removed.
    pub fn remove_selected(&mut self) -> usize {
        let before = self.shapes.len();
        self.shapes.retain(|s| !s.selected());
        before - self.shapes.len()
    }

    /// Remove all shapes.
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Iterate shapes in z-order (back to front).
    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Shape> {
        self.shapes.iter_mut()
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id() == id)
    }

    /// Ids of shapes whose bounds contain `point`, in insertion order.
    pub fn shapes_at(&self, point: Point) -> Vec<ShapeId> {
        self.shapes
            .iter()
            .filter(|s| s.contains(point))
            .map(|s| s.id())
            .collect()
    }

    /// Ids of shapes whose bounds overlap `rect`, in insertion order.
    pub fn shapes_in_rect(&self, rect: Rect) -> Vec<ShapeId> {
        self.shapes
            .iter()
            .filter(|s| s.intersects_rect(rect))
            .map(|s| s.id())
            .collect()
    }

    /// Point-select: mark every shape containing `point` selected, leaving
    /// other selections intact. If nothing is hit, the whole selection is
    /// cleared. Returns the number of hits.
    pub fn select_at(&mut self, point: Point) -> usize {
        let mut hits = 0;
        for shape in &mut self.shapes {
            if shape.contains(point) {
                shape.set_selected(true);
                hits += 1;
            }
        }
        if hits == 0 {
            self.deselect_all();
        }
        hits
    }

    pub fn deselect_all(&mut self) {
        for shape in &mut self.shapes {
            shape.set_selected(false);
        }
    }

    /// Ids of selected shapes, in insertion order.
    pub fn selected_ids(&self) -> Vec<ShapeId> {
        self.shapes
            .iter()
            .filter(|s| s.selected())
            .map(|s| s.id())
            .collect()
    }

    pub fn selection_count(&self) -> usize {
        self.shapes.iter().filter(|s| s.selected()).count()
    }

    /// Whether any selected shape responds to rotation.
    pub fn any_selected_rotatable(&self) -> bool {
        self.shapes
            .iter()
            .any(|s| s.selected() && s.supports_rotation())
    }

    /// Translate every selected shape by `delta`.
    pub fn translate_selected(&mut self, delta: Vec2) {
        for shape in self.shapes.iter_mut().filter(|s| s.selected()) {
            shape.translate(delta);
        }
    }

    /// Scale every selected shape about its anchor.
    pub fn scale_selected(&mut self, factor: f64) {
        for shape in self.shapes.iter_mut().filter(|s| s.selected()) {
            shape.scale(factor);
        }
    }

    /// Rotate every selected rectangle and square by `delta_deg`.
    pub fn rotate_selected(&mut self, delta_deg: f64) {
        for shape in self.shapes.iter_mut().filter(|s| s.selected()) {
            shape.rotate(delta_deg);
        }
    }

    /// Start a rubber-band selection drag at `point`.
    pub fn begin_drag(&mut self, point: Point) {
        self.drag = Some(DragState {
            start: point,
            rect: Rect::from_points(point, point),
        });
    }

    /// Update the rubber-band with the current pointer position. The two
    /// corners are normalized into a canonical rectangle regardless of drag
    /// direction; the selection is rebuilt from scratch on every update.
    pub fn update_drag(&mut self, point: Point) {
        let Some(drag) = &mut self.drag else {
            return;
        };
        drag.rect = Rect::from_points(drag.start, point);
        let rect = drag.rect;
        for shape in &mut self.shapes {
            shape.set_selected(shape.intersects_rect(rect));
        }
    }

    /// Finish the rubber-band drag, keeping the resulting selection.
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// The current rubber-band rectangle, if a drag is in progress.
    pub fn drag_rect(&self) -> Option<Rect> {
        self.drag.as_ref().map(|d| d.rect)
    }

    /// Union of all shape bounds. `None` for an empty scene.
    pub fn bounds(&self) -> Option<Rect> {
        self.shapes
            .iter()
            .map(|s| s.bounds())
            .reduce(|acc, b| acc.union(b))
    }

    /// Serialize the shape list to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a scene from JSON. The loaded scene starts deselected.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut scene: Self = serde_json::from_str(json)?;
        scene.deselect_all();
        Ok(scene)
    }
}

// Value equality over the shape list; transient drag state is ignored.
impl PartialEq for Scene {
    fn eq(&self, other: &Self) -> bool {
        self.shapes == other.shapes
    }
}
