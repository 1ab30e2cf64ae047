//! Citation styles.
//!
//! The style set is closed, so each style is an enum variant and formatting
//! dispatches with a `match`. Output may contain `<em>` around the title;
//! use [`plain_text`] for clipboard or file output.

use std::fmt;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Article, Author, CitationData};
use crate::services::Catalog;
use crate::utils::text::strip_markup;
use crate::utils::time::access_date;
use crate::utils::url::{article_url, citation_filename};

/// Supported citation styles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CitationStyle {
    #[default]
    #[serde(rename = "APA")]
    Apa,
    #[serde(rename = "MLA")]
    Mla,
    #[serde(rename = "Chicago")]
    Chicago,
    #[serde(rename = "Harvard")]
    Harvard,
    #[serde(rename = "BibTeX")]
    BibTex,
    #[serde(rename = "IEEE")]
    Ieee,
}

impl CitationStyle {
    pub const ALL: [CitationStyle; 6] = [
        CitationStyle::Apa,
        CitationStyle::Mla,
        CitationStyle::Chicago,
        CitationStyle::Harvard,
        CitationStyle::BibTex,
        CitationStyle::Ieee,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CitationStyle::Apa => "APA",
            CitationStyle::Mla => "MLA",
            CitationStyle::Chicago => "Chicago",
            CitationStyle::Harvard => "Harvard",
            CitationStyle::BibTex => "BibTeX",
            CitationStyle::Ieee => "IEEE",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CitationStyle::Apa => "American Psychological Association (7th Edition)",
            CitationStyle::Mla => "Modern Language Association (9th Edition)",
            CitationStyle::Chicago => "Chicago Manual of Style (17th Edition)",
            CitationStyle::Harvard => "Harvard Referencing Style",
            CitationStyle::BibTex => "BibTeX Format for LaTeX",
            CitationStyle::Ieee => "Institute of Electrical and Electronics Engineers",
        }
    }

    /// Style with the given label (case-insensitive). Unknown labels get APA.
    pub fn from_label(label: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|style| style.label().eq_ignore_ascii_case(label.trim()))
            .unwrap_or_else(|| {
                log::debug!("Unknown citation style '{label}', using APA");
                Self::default()
            })
    }

    /// Format with today's date as the fallback access date.
    pub fn format(&self, data: &CitationData) -> String {
        self.format_on(data, Local::now().date_naive())
    }

    /// Format, using `today` when `data.accessed` is absent.
    pub fn format_on(&self, data: &CitationData, today: NaiveDate) -> String {
        let parts = Parts::new(data, today);
        match self {
            CitationStyle::Apa => apa(data, &parts),
            CitationStyle::Mla => mla(data, &parts),
            CitationStyle::Chicago => chicago(data, &parts),
            CitationStyle::Harvard => harvard(data, &parts),
            CitationStyle::BibTex => bibtex(data),
            CitationStyle::Ieee => ieee(data, &parts),
        }
    }

    /// Download filename for a citation of `title` in this style.
    pub fn filename(&self, title: &str) -> String {
        citation_filename(self.label(), title)
    }
}

impl fmt::Display for CitationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A citation with markup removed.
pub fn plain_text(citation: &str) -> String {
    strip_markup(citation)
}

/// Build citation input for an article.
///
/// Authors come from the submitter's display name; an article without a
/// resolvable submitter is cited as "Unknown Author".
pub fn citation_data(catalog: &Catalog, article: &Article, base_url: &str) -> Result<CitationData> {
    let author = catalog
        .user(&article.submitter_id)
        .and_then(|u| Author::from_full_name(&u.full_name))
        .unwrap_or_else(Author::unknown);

    let item_type = catalog.item_type_name(article.item_type_id);

    Ok(CitationData {
        title: article.title.clone(),
        authors: vec![author],
        year: article.year().map(|y| y.to_string()).unwrap_or_default(),
        publisher: article.publisher.clone(),
        pages: article.pages.map(|p| p.to_string()),
        url: Some(article_url(base_url, &article.id)?.to_string()),
        doi: None,
        accessed: None,
        abstract_text: Some(article.abstract_text.clone()),
        item_type: (!item_type.is_empty()).then(|| item_type.to_string()),
    })
}

/// Values shared by the prose styles.
struct Parts<'a> {
    year: &'a str,
    publisher: Option<&'a str>,
    url: Option<&'a str>,
    pages: Option<&'a str>,
    accessed: String,
}

impl<'a> Parts<'a> {
    fn new(data: &'a CitationData, today: NaiveDate) -> Self {
        let non_empty = |s: &'a Option<String>| s.as_deref().filter(|s| !s.is_empty());
        Self {
            year: if data.year.is_empty() { "n.d." } else { &data.year },
            publisher: non_empty(&data.publisher),
            url: non_empty(&data.url),
            pages: non_empty(&data.pages),
            accessed: non_empty(&data.accessed)
                .map(str::to_string)
                .unwrap_or_else(|| access_date(today)),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum NameStyle {
    Apa,
    Mla,
    Chicago,
    Harvard,
    Ieee,
}

fn initial(name: &str) -> String {
    name.chars().next().map(String::from).unwrap_or_default()
}

fn middle(author: &Author) -> Option<&str> {
    author.middle_name.as_deref().filter(|m| !m.is_empty())
}

fn format_name(author: &Author, style: NameStyle, is_first: bool) -> String {
    match style {
        NameStyle::Apa | NameStyle::Harvard => format!(
            "{}, {}.{}",
            author.last_name,
            initial(&author.first_name),
            middle(author)
                .map(|m| format!(" {}.", initial(m)))
                .unwrap_or_default()
        ),
        NameStyle::Mla | NameStyle::Chicago if is_first => format!(
            "{}, {}{}",
            author.last_name,
            author.first_name,
            middle(author)
                .map(|m| format!(" {}.", initial(m)))
                .unwrap_or_default()
        ),
        NameStyle::Mla | NameStyle::Chicago => {
            format!("{} {}", author.first_name, author.last_name)
        }
        NameStyle::Ieee => format!(
            "{}. {}{}",
            initial(&author.first_name),
            middle(author)
                .map(|m| format!("{}. ", initial(m)))
                .unwrap_or_default(),
            author.last_name
        ),
    }
}

fn format_authors(authors: &[Author], style: NameStyle) -> String {
    match authors {
        [] => "Unknown Author".to_string(),
        [only] => format_name(only, style, true),
        [first, second] if style == NameStyle::Ieee => format!(
            "{} and {}",
            format_name(first, style, true),
            format_name(second, style, false)
        ),
        [first, second] => format!(
            "{}, & {}",
            format_name(first, style, true),
            format_name(second, style, false)
        ),
        [init @ .., last] if style == NameStyle::Apa && authors.len() <= 7 => {
            let head: Vec<String> = init
                .iter()
                .enumerate()
                .map(|(i, a)| format_name(a, style, i == 0))
                .collect();
            format!("{}, & {}", head.join(", "), format_name(last, style, false))
        }
        [first, ..] => format!("{} et al.", format_name(first, style, true)),
    }
}

fn apa(data: &CitationData, p: &Parts<'_>) -> String {
    let authors = format_authors(&data.authors, NameStyle::Apa);
    let publisher = p.publisher.map(|v| format!(" {v}.")).unwrap_or_default();
    let retrieved = p
        .url
        .map(|u| format!(" Retrieved {}, from {u}", p.accessed))
        .unwrap_or_default();
    format!(
        "{authors} ({}). <em>{}</em>.{publisher}{retrieved}",
        p.year, data.title
    )
}

fn mla(data: &CitationData, p: &Parts<'_>) -> String {
    let authors = format_authors(&data.authors, NameStyle::Mla);
    let publisher = p.publisher.unwrap_or("N.p.");
    let accessed = p
        .url
        .map(|_| format!(" Accessed {}.", p.accessed))
        .unwrap_or_default();
    let url = p.url.map(|u| format!(" <{u}>")).unwrap_or_default();
    format!(
        "{authors}. \"<em>{}</em>.\" {publisher}, {}.{accessed}{url}",
        data.title, p.year
    )
}

fn chicago(data: &CitationData, p: &Parts<'_>) -> String {
    let authors = format_authors(&data.authors, NameStyle::Chicago);
    let publisher = p.publisher.unwrap_or("n.p.");
    let accessed = p
        .url
        .map(|u| format!(" Accessed {}. {u}", p.accessed))
        .unwrap_or_default();
    format!(
        "{authors}. \"<em>{}</em>.\" {publisher}, {}.{accessed}",
        data.title, p.year
    )
}

fn harvard(data: &CitationData, p: &Parts<'_>) -> String {
    let authors = format_authors(&data.authors, NameStyle::Harvard);
    let publisher = p.publisher.map(|v| format!(" {v}.")).unwrap_or_default();
    let available = p
        .url
        .map(|u| format!(" Available at: {u} (Accessed: {}).", p.accessed))
        .unwrap_or_default();
    format!(
        "{authors} {}. <em>{}</em>.{publisher}{available}",
        p.year, data.title
    )
}

fn bibtex(data: &CitationData) -> String {
    let key_name = data
        .authors
        .first()
        .map(|a| a.last_name.to_lowercase())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "unknown".to_string());
    let key_year = if data.year.is_empty() { "n.d." } else { &data.year };

    let authors = data
        .authors
        .iter()
        .map(|a| format!("{} {}", a.first_name, a.last_name))
        .collect::<Vec<_>>()
        .join(" and ");

    let mut out = format!(
        "@article{{{key_name}{key_year},\n  author = {{{authors}}},\n  title = {{{}}},\n  year = {{{}}},",
        data.title, data.year
    );
    let optional = [
        ("publisher", &data.publisher),
        ("pages", &data.pages),
        ("url", &data.url),
    ];
    for (field, value) in optional {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            out.push_str(&format!("\n  {field} = {{{value}}},"));
        }
    }
    out.push_str("\n}");
    out
}

fn ieee(data: &CitationData, p: &Parts<'_>) -> String {
    let authors = format_authors(&data.authors, NameStyle::Ieee);
    let publisher = p.publisher.unwrap_or("N.p.");
    let pages = p.pages.map(|v| format!(", pp. {v}")).unwrap_or_default();
    let tail = p
        .url
        .map(|u| format!("., [Online]. Available: {u} (accessed {}).", p.accessed))
        .unwrap_or_else(|| ".".to_string());
    format!(
        "{authors}, \"<em>{}</em>,\" {publisher}, {}{pages}{tail}",
        data.title, p.year
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    const URL: &str = "http://localhost:5173/articles/a1";

    fn full_data() -> CitationData {
        CitationData {
            title: "Neural Networks".into(),
            authors: vec![Author::new("Ada", "Lovelace")],
            year: "2023".into(),
            publisher: Some("University Press".into()),
            pages: Some("84".into()),
            url: Some(URL.into()),
            accessed: Some("5 Mar. 2024".into()),
            ..Default::default()
        }
    }

    fn bare_data() -> CitationData {
        CitationData {
            title: "T".into(),
            ..Default::default()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    #[test]
    fn test_apa() {
        assert_eq!(
            CitationStyle::Apa.format_on(&full_data(), today()),
            format!(
                "Lovelace, A. (2023). <em>Neural Networks</em>. University Press. \
                 Retrieved 5 Mar. 2024, from {URL}"
            )
        );
        assert_eq!(
            CitationStyle::Apa.format_on(&bare_data(), today()),
            "Unknown Author (n.d.). <em>T</em>."
        );
    }

    #[test]
    fn test_mla() {
        assert_eq!(
            CitationStyle::Mla.format_on(&full_data(), today()),
            format!(
                "Lovelace, Ada. \"<em>Neural Networks</em>.\" University Press, 2023. \
                 Accessed 5 Mar. 2024. <{URL}>"
            )
        );
        assert_eq!(
            CitationStyle::Mla.format_on(&bare_data(), today()),
            "Unknown Author. \"<em>T</em>.\" N.p., n.d.."
        );
    }

    #[test]
    fn test_chicago() {
        assert_eq!(
            CitationStyle::Chicago.format_on(&full_data(), today()),
            format!(
                "Lovelace, Ada. \"<em>Neural Networks</em>.\" University Press, 2023. \
                 Accessed 5 Mar. 2024. {URL}"
            )
        );
        assert_eq!(
            CitationStyle::Chicago.format_on(&bare_data(), today()),
            "Unknown Author. \"<em>T</em>.\" n.p., n.d.."
        );
    }

    #[test]
    fn test_harvard() {
        assert_eq!(
            CitationStyle::Harvard.format_on(&full_data(), today()),
            format!(
                "Lovelace, A. 2023. <em>Neural Networks</em>. University Press. \
                 Available at: {URL} (Accessed: 5 Mar. 2024)."
            )
        );
    }

    #[test]
    fn test_bibtex() {
        assert_eq!(
            CitationStyle::BibTex.format_on(&full_data(), today()),
            format!(
                "@article{{lovelace2023,\n  author = {{Ada Lovelace}},\n  title = {{Neural Networks}},\n  year = {{2023}},\n  publisher = {{University Press}},\n  pages = {{84}},\n  url = {{{URL}}},\n}}"
            )
        );
        assert_eq!(
            CitationStyle::BibTex.format_on(&bare_data(), today()),
            "@article{unknownn.d.,\n  author = {},\n  title = {T},\n  year = {},\n}"
        );
    }

    #[test]
    fn test_ieee() {
        assert_eq!(
            CitationStyle::Ieee.format_on(&full_data(), today()),
            format!(
                "A. Lovelace, \"<em>Neural Networks</em>,\" University Press, 2023, pp. 84., \
                 [Online]. Available: {URL} (accessed 5 Mar. 2024)."
            )
        );
        assert_eq!(
            CitationStyle::Ieee.format_on(&bare_data(), today()),
            "Unknown Author, \"<em>T</em>,\" N.p., n.d.."
        );
    }

    #[test]
    fn test_missing_access_date_uses_today() {
        let data = CitationData {
            accessed: None,
            ..full_data()
        };
        let citation = CitationStyle::Harvard.format_on(&data, today());
        assert!(citation.ends_with("(Accessed: 5 Mar. 2024)."));
    }

    #[test]
    fn test_author_lists() {
        let ada = Author::new("Ada", "Lovelace");
        let grace = Author {
            middle_name: Some("Brewster".into()),
            ..Author::new("Grace", "Hopper")
        };
        let alan = Author::new("Alan", "Turing");

        let two = vec![ada.clone(), grace.clone()];
        let three = vec![ada.clone(), grace.clone(), alan.clone()];
        let eight = vec![ada.clone(); 8];

        assert_eq!(
            format_authors(&three, NameStyle::Apa),
            "Lovelace, A., Hopper, G. B., & Turing, A."
        );
        assert_eq!(format_authors(&eight, NameStyle::Apa), "Lovelace, A. et al.");
        assert_eq!(format_authors(&two, NameStyle::Mla), "Lovelace, Ada, & Grace Hopper");
        assert_eq!(format_authors(&two, NameStyle::Ieee), "A. Lovelace and G. B. Hopper");
        assert_eq!(format_authors(&three, NameStyle::Chicago), "Lovelace, Ada et al.");
        assert_eq!(format_authors(&[grace], NameStyle::Mla), "Hopper, Grace B.");
    }

    #[test]
    fn test_from_label_falls_back_to_apa() {
        assert_eq!(CitationStyle::from_label("bibtex"), CitationStyle::BibTex);
        assert_eq!(CitationStyle::from_label("IEEE"), CitationStyle::Ieee);
        assert_eq!(CitationStyle::from_label("Vancouver"), CitationStyle::Apa);
    }

    #[test]
    fn test_plain_text_strips_emphasis() {
        let citation = CitationStyle::Apa.format_on(&bare_data(), today());
        assert_eq!(plain_text(&citation), "Unknown Author (n.d.). T.");
    }

    #[test]
    fn test_citation_data_from_article() {
        let catalog = testing::catalog();
        let article = catalog.article("a1").unwrap();
        let data = citation_data(&catalog, article, "http://localhost:5173").unwrap();

        assert_eq!(data.authors, vec![Author::new("Amina", "Yusuf")]);
        assert_eq!(data.year, "2023");
        assert_eq!(data.pages.as_deref(), Some("84"));
        assert_eq!(data.url.as_deref(), Some(URL));
        assert_eq!(data.item_type.as_deref(), Some("Thesis"));
    }

    #[test]
    fn test_citation_data_unknown_submitter() {
        let catalog = testing::catalog();
        let article = catalog.article("a5").unwrap();
        let data = citation_data(&catalog, article, "http://localhost:5173").unwrap();
        assert_eq!(data.authors, vec![Author::unknown()]);
    }

    #[test]
    fn test_filename() {
        assert_eq!(
            CitationStyle::Mla.filename("Soil Chemistry Survey"),
            "citation-mla-Soil-Chemistry-Survey.txt"
        );
    }
}
