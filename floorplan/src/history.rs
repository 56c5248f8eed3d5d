use std::collections::VecDeque;

use crate::model::EditorSnapshot;

/// Linear undo/redo over whole-state snapshots.
///
/// `record` is called with the state as it was *before* a mutation. The undo
/// stack is bounded; the oldest entry falls off when it is full.
#[derive(Clone, Debug)]
pub struct History {
    undo: VecDeque<EditorSnapshot>,
    redo: Vec<EditorSnapshot>,
    depth: usize,
}

impl History {
    pub fn new(depth: usize) -> Self {
        History {
            undo: VecDeque::with_capacity(depth.min(64)),
            redo: Vec::new(),
            depth: depth.max(1),
        }
    }

    pub fn record(&mut self, before: EditorSnapshot) {
        self.undo.push_back(before);
        while self.undo.len() > self.depth {
            self.undo.pop_front();
        }
        self.redo.clear();
    }

    /// Swaps `current` for the previous snapshot. Returns false on an empty stack.
    pub fn undo(&mut self, current: &mut EditorSnapshot) -> bool {
        let Some(prev) = self.undo.pop_back() else {
            return false;
        };
        self.redo.push(std::mem::replace(current, prev));
        true
    }

    pub fn redo(&mut self, current: &mut EditorSnapshot) -> bool {
        let Some(next) = self.redo.pop() else {
            return false;
        };
        self.undo.push_back(std::mem::replace(current, next));
        while self.undo.len() > self.depth {
            self.undo.pop_front();
        }
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

impl Default for History {
    fn default() -> Self {
        History::new(20)
    }
}
