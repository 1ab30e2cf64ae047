//! Single-article view: files, viewers and reading time.

use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::{Article, ArticleFile, User};
use crate::services::Catalog;
use crate::utils::text::word_count;

/// Words read per minute when none is configured.
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

/// Which embedded viewer can show a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewerKind {
    Pdf,
    Doc,
    Video,
    Image,
}

impl ViewerKind {
    pub const ALL: [ViewerKind; 4] = [
        ViewerKind::Pdf,
        ViewerKind::Doc,
        ViewerKind::Video,
        ViewerKind::Image,
    ];

    pub fn matches(&self, mime_type: &str) -> bool {
        let mime = mime_type.to_lowercase();
        match self {
            ViewerKind::Pdf => mime.contains("pdf"),
            ViewerKind::Doc => mime.contains("doc") || mime.contains("word"),
            ViewerKind::Video => mime.contains("video"),
            ViewerKind::Image => mime.contains("image"),
        }
    }
}

/// First file for one viewer kind.
#[derive(Debug, Clone, Serialize)]
pub struct Viewer<'a> {
    pub kind: ViewerKind,
    pub file: &'a ArticleFile,
}

/// Estimated reading time of a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReadingTime {
    pub words: usize,
    pub minutes: u32,
}

impl ReadingTime {
    /// Estimate from word count, rounding partial minutes up.
    pub fn estimate(text: &str, words_per_minute: u32) -> Self {
        let words = word_count(text);
        let wpm = words_per_minute.max(1) as usize;
        let minutes = words.div_ceil(wpm) as u32;
        Self { words, minutes }
    }

    pub fn label(&self) -> String {
        match self.minutes {
            0 => "Less than 1 min".to_string(),
            1 => "1 min".to_string(),
            m if m < 60 => format!("{m} min"),
            m if m % 60 == 0 => format!("{} hr", m / 60),
            m => format!("{} hr {} min", m / 60, m % 60),
        }
    }
}

/// Everything the article page shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDetails<'a> {
    pub article: &'a Article,
    pub author: Option<&'a User>,
    pub files: Vec<&'a ArticleFile>,
    pub viewers: Vec<Viewer<'a>>,
    pub reading_time: ReadingTime,
    pub item_type_name: &'a str,
    pub collection_name: &'a str,
    pub community_name: &'a str,
}

impl<'a> ArticleDetails<'a> {
    /// Details for `id`, or `NotFound`.
    pub fn load(catalog: &'a Catalog, id: &str, words_per_minute: u32) -> Result<Self> {
        let article = catalog
            .article(id)
            .ok_or_else(|| AppError::not_found("article", id))?;
        let files = catalog.files(id);

        let viewers = ViewerKind::ALL
            .into_iter()
            .filter_map(|kind| {
                files
                    .iter()
                    .find(|f| kind.matches(&f.mime_type))
                    .map(|&file| Viewer { kind, file })
            })
            .collect();

        Ok(Self {
            article,
            author: catalog.author_of(id),
            files,
            viewers,
            reading_time: ReadingTime::estimate(&article.abstract_text, words_per_minute),
            item_type_name: catalog.item_type_name(article.item_type_id),
            collection_name: catalog.collection_name(article.collection_id),
            community_name: catalog.community_name(article.collection_id),
        })
    }

    pub fn viewer(&self, kind: ViewerKind) -> Option<&ArticleFile> {
        self.viewers.iter().find(|v| v.kind == kind).map(|v| v.file)
    }
}
