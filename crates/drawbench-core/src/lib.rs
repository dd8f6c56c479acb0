//! Drawbench Core Library
//!
//! Toolkit-agnostic scene model and editing core for the drawbench shape
//! editor: shape variants, hit-testing and selection, bounded snapshot
//! undo/redo, and scene persistence.

pub mod editor;
pub mod format;
pub mod history;
pub mod scene;
pub mod shapes;
pub mod storage;

pub use editor::{Editor, Mode, MouseButton, PointerEvent};
pub use format::FormatError;
pub use history::History;
pub use scene::Scene;
pub use shapes::{Color, Shape, ShapeId, ShapeKind};
pub use storage::{SceneStore, StorageError};
