//! Shared utility functions.

/// The first `max_chars` characters of `s`.
///
/// Counts characters rather than bytes, so multibyte text is never split.
pub fn preview_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}
