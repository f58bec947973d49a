//! Undo/redo history for designer documents.
//!
//! Provides `SnapshotHistory<S>`, a bounded stack of document snapshots. The
//! document records its state before each change and swaps states on
//! back/forward.

/// Bounded undo/redo stacks over whole-state snapshots.
#[derive(Debug, Clone)]
pub struct SnapshotHistory<S> {
    undo_stack: Vec<S>,
    redo_stack: Vec<S>,
    max_steps: usize,
}

impl<S> Default for SnapshotHistory<S> {
    fn default() -> Self {
        Self::new(100)
    }
}

impl<S> SnapshotHistory<S> {
    /// Create an empty history keeping at most `max_steps` undo steps.
    pub fn new(max_steps: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_steps,
        }
    }

    /// Record the state as it was before a change.
    pub fn record(&mut self, before: S) {
        // New edit invalidates redo
        self.redo_stack.clear();
        self.undo_stack.push(before);

        if self.undo_stack.len() > self.max_steps {
            let excess = self.undo_stack.len() - self.max_steps;
            self.undo_stack.drain(..excess);
        }
    }

    pub fn can_back(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_forward(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Step back. Takes the current state and returns the one to restore.
    pub fn back(&mut self, current: S) -> Result<S, S> {
        match self.undo_stack.pop() {
            Some(previous) => {
                self.redo_stack.push(current);
                Ok(previous)
            }
            None => Err(current),
        }
    }

    /// Step forward. Takes the current state and returns the one to restore.
    pub fn forward(&mut self, current: S) -> Result<S, S> {
        match self.redo_stack.pop() {
            Some(next) => {
                self.undo_stack.push(current);
                Ok(next)
            }
            None => Err(current),
        }
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Clear all undo/redo history.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
