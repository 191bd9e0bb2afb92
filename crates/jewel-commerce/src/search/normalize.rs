//! Query and catalog text normalization.

/// Queries shorter than this (in characters, after normalization) produce
/// no suggestions and are never fuzzy-corrected.
pub const MIN_QUERY_LEN: usize = 2;

/// Lowercase, trim, and collapse internal whitespace runs to one space.
///
/// Total: every input, including the empty string, yields a string.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.extend(word.chars().flat_map(char::to_lowercase));
    }
    out
}

/// Length in characters, which is what the query thresholds count.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Check whether an already-normalized query is long enough to search.
pub fn is_searchable(normalized: &str) -> bool {
    char_len(normalized) >= MIN_QUERY_LEN
}
