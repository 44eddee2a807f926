//! Text normalization shared by every cascade.

use crate::UNKNOWN;

/// Marker appended by [`truncate`]. A single char so the truncated result
/// is never more than one char over the cap.
pub const ELLIPSIS: char = '…';

/// Collapse every whitespace run (newlines included) to a single space and
/// trim. The unknown marker passes through untouched. Idempotent.
pub fn clean(text: &str) -> String {
    if text == UNKNOWN {
        return text.to_string();
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cap `text` at `max_len` chars, appending the ellipsis when cut.
/// Char-based, not byte-based: the inputs are Cyrillic.
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_len).collect();
    cut.push(ELLIPSIS);
    cut
}
