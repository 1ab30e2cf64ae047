// src/utils/text.rs

//! Case-insensitive matching, collation and plain-text helpers.

use std::cmp::Ordering;

use scraper::Html;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};
use unicode_segmentation::UnicodeSegmentation;

/// Position (in characters) of the first case-insensitive occurrence of
/// `needle` in `haystack`.
pub fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    let hay = haystack.to_lowercase();
    let needle = needle.to_lowercase();
    hay.find(&needle).map(|byte| hay[..byte].chars().count())
}

/// Case-insensitive substring test.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Lowercased `text` with diacritics removed ("Élan" becomes "elan").
pub fn fold_diacritics(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Locale-style comparison: base letters first, ignoring accents and case.
/// Unaccented precedes accented, then lowercase precedes uppercase, only
/// when the strings are otherwise equal.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    fold_diacritics(a)
        .cmp(&fold_diacritics(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

/// Number of words in `text`.
pub fn word_count(text: &str) -> usize {
    text.unicode_words().count()
}

/// The first `max` user-perceived characters of `text`.
pub fn truncate_graphemes(text: &str, max: usize) -> &str {
    match text.grapheme_indices(true).nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Text content of an HTML fragment, markup removed.
pub fn strip_markup(html: &str) -> String {
    Html::parse_fragment(html)
        .root_element()
        .text()
        .collect::<String>()
}
