//! Document snapshot types and generation API payloads.

use serde::{Deserialize, Serialize};

/// Caret selection over document content, as byte offsets.
///
/// Invariant: `start <= end`, both within `[0, content.len()]` and on char
/// boundaries. Session operations clamp caller input to uphold this.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Selection spanning `[start, end)`.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Collapsed selection (caret) at the given offset.
    pub fn caret(at: usize) -> Self {
        Self { start: at, end: at }
    }

    /// Whether the selection is collapsed to a caret.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Length of the selected span in bytes.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }
}

/// Immutable record of document content plus caret selection at one point in
/// history. Never mutated after being committed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub content: String,
    pub selection: Selection,
}

impl Snapshot {
    /// Create a snapshot from content and selection.
    pub fn new(content: impl Into<String>, selection: Selection) -> Self {
        Self {
            content: content.into(),
            selection,
        }
    }
}

/// Request payload for the generation endpoint.
///
/// A missing topic deserializes to the empty string so the handler can
/// report both "missing" and "empty" as the same validation failure.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub topic: String,
}

/// Success payload for the generation endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub content: String,
}
