//! Editable document session: current content, caret selection, and history.

use crate::format::FormatAction;
use crate::history::HistoryStore;
use crate::models::{Selection, Snapshot};

/// Owns the current document content and caret selection, and commits every
/// mutation into its [`HistoryStore`].
///
/// All operations are synchronous, atomic, and total; the current state
/// always equals the snapshot at the history cursor once anything has been
/// committed. One writer at a time: the owner must serialize mutations.
#[derive(Debug, Default)]
pub struct EditorSession {
    content: String,
    selection: Selection,
    history: HistoryStore,
}

fn floor_char_boundary(content: &str, offset: usize) -> usize {
    let mut i = offset.min(content.len());
    while !content.is_char_boundary(i) {
        i -= 1;
    }
    i
}

impl EditorSession {
    /// Create a session with empty content, empty selection, empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current document content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Current caret selection.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Read access to the committed history.
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Whether an undo step is available.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether a redo step is available.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Apply a direct edit: the new content and caret produced by typing.
    pub fn apply_manual_edit(&mut self, new_content: impl Into<String>, new_selection: Selection) {
        self.content = new_content.into();
        self.selection = self.clamp(new_selection);
        self.commit();
    }

    /// Wrap the current selection in `prefix` and `suffix`.
    ///
    /// When `suffix` is `None` the prefix closes the wrap as well. The new
    /// selection spans exactly the wrapped text, which keeps the caret
    /// between the markers when the selection was empty.
    pub fn apply_formatting(&mut self, prefix: &str, suffix: Option<&str>) {
        let sel = self.clamp(self.selection);
        let close = suffix.unwrap_or(prefix);
        let wrapped_len = sel.end - sel.start;

        let mut next =
            String::with_capacity(self.content.len() + prefix.len() + close.len());
        next.push_str(&self.content[..sel.start]);
        next.push_str(prefix);
        next.push_str(&self.content[sel.start..sel.end]);
        next.push_str(close);
        next.push_str(&self.content[sel.end..]);

        self.content = next;
        self.selection =
            Selection::new(sel.start + prefix.len(), sel.start + prefix.len() + wrapped_len);
        self.commit();
    }

    /// Apply a toolbar action through its fixed `(prefix, suffix)` pair.
    pub fn apply_action(&mut self, action: FormatAction) {
        let (prefix, suffix) = action.affixes();
        self.apply_formatting(prefix, suffix);
    }

    /// Replace the whole document, collapsing the selection to the start.
    ///
    /// Used after a successful generation; the caret lands at offset 0 so the
    /// new document is read from the top.
    pub fn replace_content(&mut self, new_content: impl Into<String>) {
        self.content = new_content.into();
        self.selection = Selection::caret(0);
        self.commit();
    }

    /// Step back in history, restoring content and selection.
    ///
    /// Returns `false` when there is nothing to undo; state is untouched.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.content = snapshot.content;
                self.selection = snapshot.selection;
                true
            }
            None => false,
        }
    }

    /// Step forward in history, restoring content and selection.
    ///
    /// Returns `false` when there is nothing to redo; state is untouched.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.content = snapshot.content;
                self.selection = snapshot.selection;
                true
            }
            None => false,
        }
    }

    fn commit(&mut self) {
        self.history
            .push(Snapshot::new(self.content.clone(), self.selection));
    }

    // Out-of-range or mid-char offsets are caller bugs; clamping keeps the
    // operations total instead of panicking inside slice arithmetic.
    fn clamp(&self, selection: Selection) -> Selection {
        let lo = selection.start.min(selection.end);
        let hi = selection.start.max(selection.end);
        Selection::new(
            floor_char_boundary(&self.content, lo),
            floor_char_boundary(&self.content, hi),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with(content: &str, selection: Selection) -> EditorSession {
        let mut session = EditorSession::new();
        session.apply_manual_edit(content, selection);
        session
    }

    #[test]
    fn new_session_is_empty() {
        let session = EditorSession::new();
        assert_eq!(session.content(), "");
        assert_eq!(session.selection(), Selection::caret(0));
        assert!(!session.can_undo());
        assert!(!session.can_redo());
    }

    #[test]
    fn manual_edit_commits_a_snapshot() {
        let session = session_with("hello", Selection::caret(5));
        assert_eq!(session.content(), "hello");
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history().current().content, "hello");
    }

    #[test]
    fn formatting_wraps_selection_and_reselects_wrapped_text() {
        let mut session = session_with("hello world", Selection::new(0, 5));
        session.apply_formatting("**", Some("**"));
        assert_eq!(session.content(), "**hello** world");
        assert_eq!(session.selection(), Selection::new(2, 7));
    }

    #[test]
    fn formatting_empty_selection_doubles_prefix_and_collapses_caret() {
        let mut session = session_with("hello", Selection::caret(5));
        session.apply_formatting("**", None);
        assert_eq!(session.content(), "hello****");
        assert_eq!(session.selection(), Selection::new(7, 7));
    }

    #[test]
    fn formatting_with_distinct_suffix_places_caret_over_wrapped_text() {
        let mut session = session_with("see docs", Selection::new(4, 8));
        session.apply_formatting("[", Some("](url)"));
        assert_eq!(session.content(), "see [docs](url)");
        assert_eq!(session.selection(), Selection::new(5, 9));
    }

    #[test]
    fn toolbar_action_routes_through_the_affix_table() {
        let mut session = session_with("done", Selection::new(0, 4));
        session.apply_action(FormatAction::Strikethrough);
        assert_eq!(session.content(), "~~done~~");
        assert_eq!(session.selection(), Selection::new(2, 6));
    }

    #[test]
    fn replace_content_collapses_selection_to_start() {
        let mut session = session_with("draft", Selection::new(0, 5));
        session.replace_content("# Generated\n\nBody");
        assert_eq!(session.content(), "# Generated\n\nBody");
        assert_eq!(session.selection(), Selection::caret(0));
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn undo_and_redo_restore_content_and_selection() {
        let mut session = session_with("hello", Selection::caret(5));
        session.apply_formatting("*", Some("*"));
        assert_eq!(session.content(), "*hello*");

        assert!(session.undo());
        assert_eq!(session.content(), "hello");
        assert_eq!(session.selection(), Selection::caret(5));

        assert!(session.redo());
        assert_eq!(session.content(), "*hello*");
        assert_eq!(session.selection(), Selection::new(1, 6));
    }

    #[test]
    fn undo_with_single_entry_is_a_no_op() {
        let mut session = session_with("only", Selection::caret(4));
        assert!(!session.undo());
        assert_eq!(session.content(), "only");
    }

    #[test]
    fn edit_after_undo_discards_the_redo_branch() {
        let mut session = session_with("a", Selection::caret(1));
        session.apply_manual_edit("ab", Selection::caret(2));
        session.apply_manual_edit("abc", Selection::caret(3));

        session.undo();
        session.undo();
        session.apply_manual_edit("aX", Selection::caret(2));

        assert!(!session.redo());
        assert_eq!(session.content(), "aX");
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn out_of_range_selection_is_clamped() {
        let mut session = session_with("short", Selection::caret(5));
        session.apply_manual_edit("short", Selection::new(3, 99));
        assert_eq!(session.selection(), Selection::new(3, 5));
    }

    #[test]
    fn mid_char_offsets_are_floored_to_boundaries() {
        // "é" is two bytes; offset 1 falls inside it.
        let mut session = session_with("été", Selection::caret(0));
        session.apply_manual_edit("été", Selection::new(1, 3));
        session.apply_formatting("*", Some("*"));
        assert_eq!(session.content(), "*ét*é");
    }
}
