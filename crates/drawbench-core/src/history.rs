//! Bounded undo/redo history of whole-scene snapshots.

use crate::scene::Scene;

/// Maximum number of undo snapshots to keep.
pub const MAX_UNDO_HISTORY: usize = 20;

/// Linear undo/redo history.
///
/// Snapshots are deep clones of the scene taken before each mutating action.
/// Pushing a new snapshot clears the redo stack; the undo stack evicts its
/// oldest entry past [`MAX_UNDO_HISTORY`].
#[derive(Debug, Clone, Default)]
pub struct History {
    undo_stack: Vec<Scene>,
    redo_stack: Vec<Scene>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `scene` as an undo point. Skipped when the scene value-equals
    /// the top of the stack, so repeated no-op actions don't pile up.
    /// Returns whether a snapshot was actually pushed.
    pub fn checkpoint(&mut self, scene: &Scene) -> bool {
        if self.undo_stack.last().is_some_and(|top| top == scene) {
            return false;
        }
        self.undo_stack.push(scene.clone());
        self.redo_stack.clear();
        if self.undo_stack.len() > MAX_UNDO_HISTORY {
            self.undo_stack.remove(0);
        }
        true
    }

    /// Pop the most recent snapshot, parking `current` on the redo stack.
    pub fn undo(&mut self, current: Scene) -> Option<Scene> {
        let restored = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(restored)
    }

    /// Reverse of [`undo`](Self::undo).
    pub fn redo(&mut self, current: Scene) -> Option<Scene> {
        let restored = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(restored)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Depth of the undo stack (for diagnostics and tests).
    pub fn depth(&self) -> usize {
        self.undo_stack.len()
    }
}
