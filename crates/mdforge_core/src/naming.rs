//! Utilities for deriving download filenames from document topics.

/// Derive a markdown download filename from a topic.
///
/// Lowercases the topic and collapses whitespace runs into single dashes.
/// Empty or whitespace-only topics fall back to `untitled.md`.
///
/// # Returns
/// A `.md` filename suitable for a save dialog or content-disposition header.
pub fn download_filename(topic: &str) -> String {
    let slug = topic
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        "untitled.md".to_string()
    } else {
        format!("{}.md", slug)
    }
}
