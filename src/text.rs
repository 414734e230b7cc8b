//! Review text helpers used by the review list.

use std::borrow::Cow;

use crate::constants::text::EXPANDABLE_REVIEW_CHARS;

/// Collapse runs of whitespace into single spaces and trim.
pub fn normalize_inline_whitespace<T: AsRef<str>>(text: T) -> String {
    let mut normalized = String::new();
    let mut seen_space = false;
    for ch in text.as_ref().chars() {
        if ch.is_whitespace() {
            if !seen_space {
                normalized.push(' ');
                seen_space = true;
            }
        } else {
            normalized.push(ch);
            seen_space = false;
        }
    }
    normalized.trim().to_string()
}

/// True when the review is long enough to need a "See More" toggle.
pub fn is_expandable(text: &str) -> bool {
    text.chars().count() > EXPANDABLE_REVIEW_CHARS
}

/// Cut `text` to at most `max_chars` characters on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => Cow::Borrowed(&text[..byte_idx]),
        None => Cow::Borrowed(text),
    }
}

/// Collapsed single-line preview of a review, with an ellipsis when cut.
pub fn review_preview(text: &str) -> String {
    let flattened = normalize_inline_whitespace(text);
    if !is_expandable(&flattened) {
        return flattened;
    }
    let mut preview = truncate_chars(&flattened, EXPANDABLE_REVIEW_CHARS)
        .trim_end()
        .to_string();
    preview.push('…');
    preview
}
