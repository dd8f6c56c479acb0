//! Editor controller: translates input events into scene mutations and
//! maintains the undo/redo history.

use crate::history::History;
use crate::scene::Scene;
use crate::shapes::{Circle, Color, Rectangle, Shape, ShapeId, ShapeKind, Square};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Default side length for new squares.
pub const DEFAULT_SQUARE_SIZE: f64 = 100.0;
/// Default diameter for new circles.
pub const DEFAULT_CIRCLE_DIAMETER: f64 = 100.0;
/// Default width for new rectangles.
pub const DEFAULT_RECT_WIDTH: f64 = 100.0;
/// Default height for new rectangles.
pub const DEFAULT_RECT_HEIGHT: f64 = 200.0;

/// Wheel scale step when shrinking the selection.
pub const SHRINK_FACTOR: f64 = 0.8;
/// Wheel scale step when growing the selection.
pub const GROW_FACTOR: f64 = 1.2;
/// Wheel rotation step in degrees.
pub const WHEEL_ROTATE_STEP: f64 = 15.0;

/// Interaction mode for pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Click to place a new shape; drag sweeps a selection rectangle.
    #[default]
    Draw,
    /// Drag selected shapes around.
    Move,
    /// Wheel grows or shrinks the selection.
    Resize,
    /// Wheel or drag rotates selected rectangles and squares.
    Rotate,
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Toolkit-agnostic pointer event.
///
/// Whatever shell hosts the editor converts its native events into these;
/// the controller keeps no notion of windows or widgets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { pos: Point, button: MouseButton },
    Moved { pos: Point },
    Up { pos: Point },
    /// Wheel movement; positive steps scroll toward the user.
    Wheel { pos: Point, steps: i32 },
}

/// The editing core: a scene, its history, and interaction state.
#[derive(Debug, Clone, Default)]
pub struct Editor {
    scene: Scene,
    history: History,
    mode: Mode,
    shape_kind: ShapeKind,
    color: Color,
    /// Pointer position at the start of the current press, if any.
    press_origin: Option<Point>,
    /// Last pointer position while dragging shapes (move/rotate).
    last_drag_point: Option<Point>,
    /// Whether the pointer moved since the press (distinguishes clicks).
    dragged: bool,
    /// Whether the current drag already took its undo checkpoint.
    drag_checkpointed: bool,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scene(scene: Scene) -> Self {
        Self {
            scene,
            ..Self::default()
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        log::debug!("mode -> {mode:?}");
        self.mode = mode;
        if mode == Mode::Draw {
            self.scene.deselect_all();
        }
    }

    pub fn shape_kind(&self) -> ShapeKind {
        self.shape_kind
    }

    pub fn set_shape_kind(&mut self, kind: ShapeKind) {
        self.shape_kind = kind;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Replace the scene wholesale (e.g. after a load). The previous scene
    /// remains reachable through undo.
    pub fn replace_scene(&mut self, scene: Scene) {
        self.history.checkpoint(&self.scene);
        self.scene = scene;
    }

    /// Insert a new shape of the configured kind and color, centered on
    /// `point`. Any existing selection is cleared first.
    pub fn add_shape_at(&mut self, point: Point) -> ShapeId {
        self.history.checkpoint(&self.scene);
        self.scene.deselect_all();
        let shape = match self.shape_kind {
            ShapeKind::Square => {
                Shape::Square(Square::centered_at(point, DEFAULT_SQUARE_SIZE, self.color))
            }
            ShapeKind::Circle => {
                Shape::Circle(Circle::new(point, DEFAULT_CIRCLE_DIAMETER, self.color))
            }
            ShapeKind::Rectangle => Shape::Rectangle(Rectangle::centered_at(
                point,
                DEFAULT_RECT_WIDTH,
                DEFAULT_RECT_HEIGHT,
                self.color,
            )),
        };
        let id = shape.id();
        log::debug!("add {} at ({}, {})", shape.kind(), point.x, point.y);
        self.scene.add_shape(shape);
        id
    }

    /// Select shapes containing `point` (clears the selection on a miss).
    pub fn select_at(&mut self, point: Point) -> usize {
        self.scene.select_at(point)
    }

    /// One-shot rubber-band selection between two corners.
    pub fn box_select(&mut self, a: Point, b: Point) -> usize {
        self.scene.begin_drag(a);
        self.scene.update_drag(b);
        self.scene.end_drag();
        self.scene.selection_count()
    }

    pub fn deselect_all(&mut self) {
        self.scene.deselect_all();
    }

    /// Translate the selection. Returns false when nothing is selected.
    pub fn move_selected(&mut self, delta: Vec2) -> bool {
        if self.scene.selection_count() == 0 {
            return false;
        }
        self.history.checkpoint(&self.scene);
        self.scene.translate_selected(delta);
        true
    }

    /// Scale the selection about each shape's anchor.
    pub fn scale_selected(&mut self, factor: f64) -> bool {
        if self.scene.selection_count() == 0 {
            return false;
        }
        self.history.checkpoint(&self.scene);
        self.scene.scale_selected(factor);
        true
    }

    /// Rotate selected rectangles and squares by `delta_deg`.
    pub fn rotate_selected(&mut self, delta_deg: f64) -> bool {
        if !self.scene.any_selected_rotatable() {
            return false;
        }
        self.history.checkpoint(&self.scene);
        self.scene.rotate_selected(delta_deg);
        true
    }

    /// Delete the selection. Returns how many shapes were removed.
    pub fn delete_selected(&mut self) -> usize {
        if self.scene.selection_count() == 0 {
            return 0;
        }
        self.history.checkpoint(&self.scene);
        self.scene.remove_selected()
    }

    /// Remove every shape from the scene.
    pub fn clear_scene(&mut self) -> bool {
        if self.scene.is_empty() {
            return false;
        }
        self.history.checkpoint(&self.scene);
        self.scene.clear();
        true
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo(self.scene.clone()) {
            Some(scene) => {
                self.scene = scene;
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo(self.scene.clone()) {
            Some(scene) => {
                self.scene = scene;
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Feed a pointer event through the current mode.
    pub fn handle_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { pos, button } => self.on_down(pos, button),
            PointerEvent::Moved { pos } => self.on_moved(pos),
            PointerEvent::Up { pos } => self.on_up(pos),
            PointerEvent::Wheel { steps, .. } => self.on_wheel(steps),
        }
    }

    fn on_down(&mut self, pos: Point, button: MouseButton) {
        match button {
            MouseButton::Left => {
                self.press_origin = Some(pos);
                self.dragged = false;
                self.drag_checkpointed = false;
                match self.mode {
                    Mode::Move | Mode::Rotate => {
                        let hits = self.scene.shapes_at(pos);
                        if hits.is_empty() {
                            self.scene.begin_drag(pos);
                        } else {
                            for id in hits {
                                if let Some(shape) = self.scene.get_mut(id) {
                                    shape.set_selected(true);
                                }
                            }
                            self.last_drag_point = Some(pos);
                        }
                    }
                    Mode::Draw | Mode::Resize => {
                        self.scene.begin_drag(pos);
                    }
                }
            }
            MouseButton::Right => {
                self.scene.select_at(pos);
            }
            MouseButton::Middle => {}
        }
    }

    fn on_moved(&mut self, pos: Point) {
        if self.press_origin.is_none() {
            return;
        }
        self.dragged = true;
        match (self.mode, self.last_drag_point) {
            (Mode::Move, Some(last)) => {
                if self.scene.selection_count() > 0 {
                    self.ensure_drag_checkpoint();
                    self.scene.translate_selected(pos - last);
                }
                self.last_drag_point = Some(pos);
            }
            (Mode::Rotate, Some(last)) => {
                if self.scene.any_selected_rotatable() {
                    self.ensure_drag_checkpoint();
                    for shape in self
                        .scene
                        .iter_mut()
                        .filter(|s| s.selected() && s.supports_rotation())
                    {
                        let center = shape.center();
                        let last_angle = (last.y - center.y).atan2(last.x - center.x);
                        let cur_angle = (pos.y - center.y).atan2(pos.x - center.x);
                        shape.rotate((cur_angle - last_angle).to_degrees());
                    }
                }
                self.last_drag_point = Some(pos);
            }
            _ => {
                self.scene.update_drag(pos);
            }
        }
    }

    fn on_up(&mut self, pos: Point) {
        let was_press = self.press_origin.take().is_some();
        let was_click = was_press && !self.dragged;
        self.scene.end_drag();
        self.last_drag_point = None;
        if was_click && self.mode == Mode::Draw {
            self.add_shape_at(pos);
        }
    }

    fn on_wheel(&mut self, steps: i32) {
        if steps == 0 {
            return;
        }
        match self.mode {
            Mode::Resize => {
                let factor = if steps > 0 { SHRINK_FACTOR } else { GROW_FACTOR };
                self.scale_selected(factor);
            }
            Mode::Rotate => {
                let delta = if steps > 0 {
                    WHEEL_ROTATE_STEP
                } else {
                    -WHEEL_ROTATE_STEP
                };
                self.rotate_selected(delta);
            }
            Mode::Draw | Mode::Move => {}
        }
    }

    /// Take the undo checkpoint for the drag in progress, once.
    fn ensure_drag_checkpoint(&mut self) {
        if !self.drag_checkpointed {
            self.history.checkpoint(&self.scene);
            self.drag_checkpointed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click(editor: &mut Editor, x: f64, y: f64) {
        let pos = Point::new(x, y);
        editor.handle_event(PointerEvent::Down {
            pos,
            button: MouseButton::Left,
        });
        editor.handle_event(PointerEvent::Up { pos });
    }

    #[test]
    fn click_in_draw_mode_places_default_square() {
        let mut editor = Editor::new();
        click(&mut editor, 200.0, 150.0);

        assert_eq!(editor.scene().len(), 1);
        let shape = editor.scene().iter().next().unwrap();
        assert_eq!(shape.kind(), ShapeKind::Square);
        assert_eq!(shape.color(), Color::Red);
        assert_eq!(shape.center(), Point::new(200.0, 150.0));
        assert_eq!(shape.bounds().width(), DEFAULT_SQUARE_SIZE);
    }

    #[test]
    fn configured_kind_and_color_apply_to_new_shapes() {
        let mut editor = Editor::new();
        editor.set_shape_kind(ShapeKind::Rectangle);
        editor.set_color(Color::Yellow);
        click(&mut editor, 0.0, 0.0);

        let shape = editor.scene().iter().next().unwrap();
        assert_eq!(shape.kind(), ShapeKind::Rectangle);
        assert_eq!(shape.color(), Color::Yellow);
        assert_eq!(shape.bounds().width(), DEFAULT_RECT_WIDTH);
        assert_eq!(shape.bounds().height(), DEFAULT_RECT_HEIGHT);
    }

    #[test]
    fn right_click_selects_shape_under_pointer() {
        let mut editor = Editor::new();
        click(&mut editor, 100.0, 100.0);

        editor.handle_event(PointerEvent::Down {
            pos: Point::new(100.0, 100.0),
            button: MouseButton::Right,
        });
        assert_eq!(editor.scene().selection_count(), 1);

        // Right-click on empty space clears the selection.
        editor.handle_event(PointerEvent::Down {
            pos: Point::new(900.0, 900.0),
            button: MouseButton::Right,
        });
        assert_eq!(editor.scene().selection_count(), 0);
    }

    #[test]
    fn drag_in_draw_mode_sweeps_selection_not_a_shape() {
        let mut editor = Editor::new();
        click(&mut editor, 100.0, 100.0);
        click(&mut editor, 300.0, 300.0);
        assert_eq!(editor.scene().len(), 2);

        editor.handle_event(PointerEvent::Down {
            pos: Point::new(0.0, 0.0),
            button: MouseButton::Left,
        });
        editor.handle_event(PointerEvent::Moved {
            pos: Point::new(400.0, 400.0),
        });
        assert_eq!(editor.scene().selection_count(), 2);
        editor.handle_event(PointerEvent::Up {
            pos: Point::new(400.0, 400.0),
        });

        // The drag must not have placed a third shape.
        assert_eq!(editor.scene().len(), 2);
        assert_eq!(editor.scene().selection_count(), 2);
    }

    #[test]
    fn move_drag_translates_selection_once_per_checkpoint() {
        let mut editor = Editor::new();
        click(&mut editor, 100.0, 100.0);
        editor.set_mode(Mode::Move);

        editor.handle_event(PointerEvent::Down {
            pos: Point::new(100.0, 100.0),
            button: MouseButton::Left,
        });
        editor.handle_event(PointerEvent::Moved {
            pos: Point::new(120.0, 110.0),
        });
        editor.handle_event(PointerEvent::Moved {
            pos: Point::new(150.0, 130.0),
        });
        editor.handle_event(PointerEvent::Up {
            pos: Point::new(150.0, 130.0),
        });

        let shape = editor.scene().iter().next().unwrap();
        assert_eq!(shape.center(), Point::new(150.0, 130.0));

        // The whole drag is one undo step.
        assert!(editor.undo());
        let shape = editor.scene().iter().next().unwrap();
        assert_eq!(shape.center(), Point::new(100.0, 100.0));
    }

    #[test]
    fn wheel_resize_shrinks_and_grows() {
        let mut editor = Editor::new();
        click(&mut editor, 100.0, 100.0);
        editor.handle_event(PointerEvent::Down {
            pos: Point::new(100.0, 100.0),
            button: MouseButton::Right,
        });
        editor.set_mode(Mode::Resize);

        editor.handle_event(PointerEvent::Wheel {
            pos: Point::new(100.0, 100.0),
            steps: 1,
        });
        let width = editor.scene().iter().next().unwrap().bounds().width();
        assert_eq!(width, DEFAULT_SQUARE_SIZE * SHRINK_FACTOR);

        editor.handle_event(PointerEvent::Wheel {
            pos: Point::new(100.0, 100.0),
            steps: -1,
        });
        let width = editor.scene().iter().next().unwrap().bounds().width();
        assert_eq!(width, DEFAULT_SQUARE_SIZE * SHRINK_FACTOR * GROW_FACTOR);
    }

    #[test]
    fn wheel_rotate_steps_fifteen_degrees() {
        let mut editor = Editor::new();
        editor.set_shape_kind(ShapeKind::Rectangle);
        click(&mut editor, 100.0, 100.0);
        editor.handle_event(PointerEvent::Down {
            pos: Point::new(100.0, 100.0),
            button: MouseButton::Right,
        });
        editor.set_mode(Mode::Rotate);

        editor.handle_event(PointerEvent::Wheel {
            pos: Point::new(100.0, 100.0),
            steps: 1,
        });
        match editor.scene().iter().next().unwrap() {
            Shape::Rectangle(r) => assert_eq!(r.rotation_deg, WHEEL_ROTATE_STEP),
            other => panic!("expected rectangle, got {other:?}"),
        }
    }

    #[test]
    fn wheel_rotate_ignores_circle_only_selection() {
        let mut editor = Editor::new();
        editor.set_shape_kind(ShapeKind::Circle);
        click(&mut editor, 100.0, 100.0);
        editor.handle_event(PointerEvent::Down {
            pos: Point::new(100.0, 100.0),
            button: MouseButton::Right,
        });
        editor.set_mode(Mode::Rotate);

        editor.handle_event(PointerEvent::Wheel {
            pos: Point::new(100.0, 100.0),
            steps: 1,
        });
        // No rotatable shape selected: no mutation, no undo entry.
        assert!(!editor.rotate_selected(15.0));
    }

    #[test]
    fn draw_click_deselects_previous_shapes() {
        let mut editor = Editor::new();
        click(&mut editor, 100.0, 100.0);
        editor.handle_event(PointerEvent::Down {
            pos: Point::new(100.0, 100.0),
            button: MouseButton::Right,
        });
        assert_eq!(editor.scene().selection_count(), 1);

        click(&mut editor, 400.0, 400.0);
        assert_eq!(editor.scene().selection_count(), 0);
    }

    #[test]
    fn undo_redo_round_trip_through_editor() {
        let mut editor = Editor::new();
        click(&mut editor, 100.0, 100.0);
        click(&mut editor, 300.0, 300.0);
        assert_eq!(editor.scene().len(), 2);

        assert!(editor.undo());
        assert_eq!(editor.scene().len(), 1);
        assert!(editor.undo());
        assert_eq!(editor.scene().len(), 0);
        assert!(!editor.undo());

        assert!(editor.redo());
        assert!(editor.redo());
        assert_eq!(editor.scene().len(), 2);
        assert!(!editor.redo());
    }

    #[test]
    fn clear_scene_is_undoable() {
        let mut editor = Editor::new();
        click(&mut editor, 100.0, 100.0);
        assert!(editor.clear_scene());
        assert!(editor.scene().is_empty());
        assert!(editor.undo());
        assert_eq!(editor.scene().len(), 1);
    }

    #[test]
    fn delete_selected_removes_and_reports() {
        let mut editor = Editor::new();
        click(&mut editor, 100.0, 100.0);
        click(&mut editor, 300.0, 300.0);
        editor.handle_event(PointerEvent::Down {
            pos: Point::new(300.0, 300.0),
            button: MouseButton::Right,
        });

        assert_eq!(editor.delete_selected(), 1);
        assert_eq!(editor.scene().len(), 1);
        assert_eq!(editor.delete_selected(), 0);
    }

    #[test]
    fn box_select_reports_count() {
        let mut editor = Editor::new();
        click(&mut editor, 100.0, 100.0);
        click(&mut editor, 500.0, 500.0);
        let n = editor.box_select(Point::new(0.0, 0.0), Point::new(200.0, 200.0));
        assert_eq!(n, 1);
    }

    #[test]
    fn replace_scene_is_undoable() {
        let mut editor = Editor::new();
        click(&mut editor, 100.0, 100.0);
        let old = editor.scene().clone();

        editor.replace_scene(Scene::new());
        assert!(editor.scene().is_empty());
        assert!(editor.undo());
        assert_eq!(*editor.scene(), old);
    }
}
