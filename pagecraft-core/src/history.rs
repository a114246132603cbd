//! Undo/redo over committed documents.
//!
//! Documents are values, so history is a pair of stacks of earlier states.

use crate::Document;

/// Maximum number of undo states to keep.
pub const MAX_UNDO_HISTORY: usize = 50;

/// Bounded undo/redo stacks.
#[derive(Debug, Clone, Default)]
pub struct History {
    undo_stack: Vec<Document>,
    redo_stack: Vec<Document>,
}

impl History {
    /// Create empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the state before a change. Clears the redo stack.
    pub fn record(&mut self, before: Document) {
        self.undo_stack.push(before);
        self.redo_stack.clear();

        if self.undo_stack.len() > MAX_UNDO_HISTORY {
            self.undo_stack.remove(0);
        }
    }

    /// Step back from `current`, returning the state to restore.
    pub fn undo(&mut self, current: &Document) -> Option<Document> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(current.clone());
        Some(previous)
    }

    /// Step forward from `current`, returning the state to restore.
    pub fn redo(&mut self, current: &Document) -> Option<Document> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current.clone());
        Some(next)
    }

    /// Check if undo is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Forget everything, e.g. after loading a different document.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{mutation, ComponentKind, Point};

    #[test]
    fn test_undo_redo_cycle() {
        let empty = Document::new();
        let one = mutation::add(&empty, ComponentKind::Text, Point::default()).document;

        let mut history = History::new();
        assert!(!history.can_undo());
        history.record(empty.clone());

        let restored = history.undo(&one).expect("undo");
        assert_eq!(restored, empty);
        assert!(history.can_redo());

        let again = history.redo(&restored).expect("redo");
        assert_eq!(again, one);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_record_clears_redo() {
        let mut history = History::new();
        let doc = Document::new();
        history.record(doc.clone());
        let _ = history.undo(&doc);
        assert!(history.can_redo());

        history.record(doc);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_history_is_bounded() {
        let mut history = History::new();
        for _ in 0..(MAX_UNDO_HISTORY + 10) {
            history.record(Document::new());
        }
        let current = Document::new();
        let mut steps = 0;
        while history.undo(&current).is_some() {
            steps += 1;
        }
        assert_eq!(steps, MAX_UNDO_HISTORY);
    }
}
