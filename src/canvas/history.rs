use super::surface::{PixelSurface, Rgba8};

/// One pixel's value before and after an operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelChange {
    pub index: usize,
    pub before: Rgba8,
    pub after: Rgba8,
}

/// Atomic set of pixel changes produced by a single user operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangeSet {
    pub description: String,
    changes: Vec<PixelChange>,
}

impl ChangeSet {
    /// Build a change set, dropping no-op entries and ordering by index.
    /// Returns `None` when nothing actually changed.
    pub fn new(description: impl Into<String>, changes: Vec<PixelChange>) -> Option<Self> {
        let mut changes: Vec<PixelChange> = changes
            .into_iter()
            .filter(|c| c.before != c.after)
            .collect();
        if changes.is_empty() {
            return None;
        }
        changes.sort_by_key(|c| c.index);
        Some(Self {
            description: description.into(),
            changes,
        })
    }

    pub fn changes(&self) -> &[PixelChange] {
        &self.changes
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Change recorded for a flat pixel index, if any.
    pub fn change_at(&self, index: usize) -> Option<&PixelChange> {
        self.changes
            .binary_search_by_key(&index, |c| c.index)
            .ok()
            .map(|i| &self.changes[i])
    }

    /// Write every `before` value back to the surface.
    pub fn revert(&self, target: &mut dyn PixelSurface) {
        for change in &self.changes {
            target.set_pixel(change.index, change.before);
        }
    }

    /// Write every `after` value to the surface.
    pub fn apply(&self, target: &mut dyn PixelSurface) {
        for change in &self.changes {
            target.set_pixel(change.index, change.after);
        }
    }
}

/// Stack-based undo/redo manager for committed change sets.
#[derive(Debug, Default)]
pub struct History {
    undo_stack: Vec<ChangeSet>,
    redo_stack: Vec<ChangeSet>,
}

impl History {
    /// Create an empty history with no recorded actions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a new action onto the undo stack and clear redo.
    pub fn push_action(&mut self, action: ChangeSet) {
        log::debug!(
            "history: push \"{}\" ({} pixels)",
            action.description,
            action.len()
        );
        self.undo_stack.push(action);
        self.redo_stack.clear();
    }

    /// Undo the latest action, returning its description.
    pub fn undo(&mut self, target: &mut dyn PixelSurface) -> Option<&str> {
        let action = self.undo_stack.pop()?;
        action.revert(target);
        self.redo_stack.push(action);
        self.redo_stack.last().map(|a| a.description.as_str())
    }

    /// Redo the previously undone action, returning its description.
    pub fn redo(&mut self, target: &mut dyn PixelSurface) -> Option<&str> {
        let action = self.redo_stack.pop()?;
        action.apply(target);
        self.undo_stack.push(action);
        self.undo_stack.last().map(|a| a.description.as_str())
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}
