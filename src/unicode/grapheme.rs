//! Grapheme cluster counting and slicing.

use unicode_segmentation::UnicodeSegmentation;

/// Iterate over extended grapheme clusters in a string.
pub fn graphemes(s: &str) -> impl Iterator<Item = &str> {
    s.graphemes(true)
}

/// Count extended grapheme clusters.
#[must_use]
pub fn grapheme_count(s: &str) -> usize {
    if s.is_ascii() {
        return s.len();
    }
    s.graphemes(true).count()
}

/// Return the first `n` grapheme clusters of `s`.
///
/// Returns the whole string when it has `n` or fewer clusters.
#[must_use]
pub fn grapheme_prefix(s: &str, n: usize) -> &str {
    if s.is_ascii() {
        return &s[..n.min(s.len())];
    }
    match s.grapheme_indices(true).nth(n) {
        Some((byte_idx, _)) => &s[..byte_idx],
        None => s,
    }
}

/// Whether a grapheme is whitespace (a word-wrap break opportunity).
#[must_use]
pub fn is_whitespace_grapheme(grapheme: &str) -> bool {
    !grapheme.is_empty() && grapheme.chars().all(char::is_whitespace)
}
