//! Branch-discarding linear undo/redo history.

use crate::models::Snapshot;

/// Append-only sequence of document snapshots with a movable cursor.
///
/// `cursor == None` means no state has been committed yet. Committing while
/// the cursor is behind the tail discards the redo branch permanently.
/// Owned exclusively by one [`crate::EditorSession`]; all operations are
/// synchronous and total.
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    entries: Vec<Snapshot>,
    cursor: Option<usize>,
}

impl HistoryStore {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a snapshot.
    ///
    /// Truncates any entries after the cursor, appends the snapshot, and
    /// moves the cursor to the new tail. Every call commits a new entry;
    /// identical consecutive snapshots are not deduplicated.
    pub fn push(&mut self, snapshot: Snapshot) {
        if let Some(i) = self.cursor {
            self.entries.truncate(i + 1);
        }
        self.entries.push(snapshot);
        self.cursor = Some(self.entries.len() - 1);
    }

    /// Step the cursor back and return the now-active snapshot.
    ///
    /// Returns `None` without touching the cursor when there is nothing to
    /// undo.
    pub fn undo(&mut self) -> Option<Snapshot> {
        let i = self.cursor?;
        if i == 0 {
            return None;
        }
        self.cursor = Some(i - 1);
        self.entries.get(i - 1).cloned()
    }

    /// Step the cursor forward and return the now-active snapshot.
    ///
    /// Returns `None` without touching the cursor when there is nothing to
    /// redo.
    pub fn redo(&mut self) -> Option<Snapshot> {
        let i = self.cursor?;
        if i + 1 >= self.entries.len() {
            return None;
        }
        self.cursor = Some(i + 1);
        self.entries.get(i + 1).cloned()
    }

    /// The snapshot at the cursor, or an empty default when history is empty.
    pub fn current(&self) -> Snapshot {
        self.cursor
            .and_then(|i| self.entries.get(i).cloned())
            .unwrap_or_default()
    }

    /// Whether a prior snapshot exists.
    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(i) if i > 0)
    }

    /// Whether a later snapshot exists.
    pub fn can_redo(&self) -> bool {
        matches!(self.cursor, Some(i) if i + 1 < self.entries.len())
    }

    /// Number of committed snapshots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no snapshot has been committed yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current cursor index, if any snapshot is committed.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Selection;

    fn snap(content: &str) -> Snapshot {
        Snapshot::new(content, Selection::caret(content.len()))
    }

    #[test]
    fn empty_history_has_no_undo_or_redo() {
        let mut history = HistoryStore::new();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), None);
        assert_eq!(history.current(), Snapshot::default());
    }

    #[test]
    fn n_pushes_leave_cursor_at_tail() {
        let mut history = HistoryStore::new();
        for i in 0..5 {
            history.push(snap(&format!("v{}", i)));
        }
        assert_eq!(history.len(), 5);
        assert_eq!(history.cursor(), Some(4));
        assert_eq!(history.current().content, "v4");
    }

    #[test]
    fn full_undo_then_redo_returns_to_final_snapshot() {
        let mut history = HistoryStore::new();
        for i in 0..4 {
            history.push(snap(&format!("v{}", i)));
        }
        for _ in 0..3 {
            assert!(history.undo().is_some());
        }
        assert_eq!(history.current().content, "v0");
        assert!(!history.can_undo());
        for _ in 0..3 {
            assert!(history.redo().is_some());
        }
        assert_eq!(history.current(), snap("v3"));
        assert!(!history.can_redo());
    }

    #[test]
    fn push_after_undo_discards_redo_branch() {
        let mut history = HistoryStore::new();
        history.push(snap("a"));
        history.push(snap("b"));
        history.push(snap("c"));

        history.undo();
        history.undo();
        assert_eq!(history.current().content, "a");

        history.push(snap("d"));
        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), Some(1));
        // The discarded branch is gone for good.
        assert_eq!(history.redo(), None);
        assert_eq!(history.current().content, "d");
    }

    #[test]
    fn identical_consecutive_snapshots_each_commit() {
        let mut history = HistoryStore::new();
        history.push(snap("same"));
        history.push(snap("same"));
        assert_eq!(history.len(), 2);
        assert!(history.can_undo());
    }

    #[test]
    fn undo_at_first_entry_is_a_no_op() {
        let mut history = HistoryStore::new();
        history.push(snap("only"));
        assert_eq!(history.undo(), None);
        assert_eq!(history.cursor(), Some(0));
        assert_eq!(history.current().content, "only");
    }

    #[test]
    fn undo_restores_selection() {
        let mut history = HistoryStore::new();
        history.push(Snapshot::new("hello", Selection::new(1, 3)));
        history.push(Snapshot::new("hello world", Selection::caret(11)));
        let restored = history.undo().expect("one step back");
        assert_eq!(restored.selection, Selection::new(1, 3));
    }
}
