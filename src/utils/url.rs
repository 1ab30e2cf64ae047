// src/utils/url.rs

//! URL and filename helpers.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::error::Result;
use crate::utils::text::truncate_graphemes;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Public URL of an article's details page.
///
/// # Examples
/// ```
/// use catalog::utils::url::article_url;
///
/// assert_eq!(
///     article_url("https://library.example.edu/repo", "a-17").unwrap().as_str(),
///     "https://library.example.edu/repo/articles/a-17"
/// );
/// ```
pub fn article_url(base_url: &str, article_id: &str) -> Result<Url> {
    let mut base = Url::parse(base_url)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join(&format!("articles/{article_id}"))?)
}

/// Download filename for a citation: `citation-apa-Deep-Learning-for.txt`.
///
/// Only the first 30 characters of the title are used.
pub fn citation_filename(style_label: &str, title: &str) -> String {
    let stem = WHITESPACE_RUN.replace_all(truncate_graphemes(title, 30), "-");
    format!("citation-{}-{}.txt", style_label.to_lowercase(), stem)
}
