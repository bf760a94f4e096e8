//! Substring helpers used when escaping delimited output.

use memchr::memmem;

/// Check whether `haystack` contains `needle`.
///
/// An empty needle never matches.
#[inline]
pub fn contains(haystack: &str, needle: &str) -> bool {
    !needle.is_empty() && memmem::find(haystack.as_bytes(), needle.as_bytes()).is_some()
}

/// Double every occurrence of `quote` in `text`.
///
/// Returns `None` when `text` has no occurrence, so callers can keep the
/// original string without copying.
pub fn double_occurrences(text: &str, quote: &str) -> Option<String> {
    if quote.is_empty() {
        return None;
    }

    let bytes = text.as_bytes();
    let mut matches = memmem::find_iter(bytes, quote.as_bytes()).peekable();
    matches.peek()?;

    let mut out = String::with_capacity(text.len() + quote.len() * 2);
    let mut last = 0;
    for pos in matches {
        // find_iter yields non-overlapping matches on char boundaries of valid UTF-8 needles
        out.push_str(&text[last..pos + quote.len()]);
        out.push_str(quote);
        last = pos + quote.len();
    }
    out.push_str(&text[last..]);
    Some(out)
}
