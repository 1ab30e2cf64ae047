//! Query parameters and page responses for article listings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{AppError, Result};
use crate::models::EnrichedArticle;

/// Default number of articles per page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Filter value meaning "no constraint".
const NO_CONSTRAINT: &str = "all";

/// Orderings offered by the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Title matches first, then earlier match position
    #[default]
    Relevance,
    DateDesc,
    DateAsc,
    TitleAsc,
    TitleDesc,
    AuthorAsc,
    AuthorDesc,
}

impl SortOption {
    pub const ALL: [SortOption; 7] = [
        SortOption::Relevance,
        SortOption::DateDesc,
        SortOption::DateAsc,
        SortOption::TitleAsc,
        SortOption::TitleDesc,
        SortOption::AuthorAsc,
        SortOption::AuthorDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Relevance => "relevance",
            SortOption::DateDesc => "date-desc",
            SortOption::DateAsc => "date-asc",
            SortOption::TitleAsc => "title-asc",
            SortOption::TitleDesc => "title-desc",
            SortOption::AuthorAsc => "author-asc",
            SortOption::AuthorDesc => "author-desc",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|option| option.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                AppError::validation(format!(
                    "Unknown sort option '{s}' (expected one of: {})",
                    Self::ALL.map(|o| o.as_str()).join(", ")
                ))
            })
    }
}

/// Narrowing criteria. Every field is optional; empty means unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleFilters {
    /// Item type name, matched case-insensitively
    #[serde(default)]
    pub category: String,

    /// Substring of a file MIME type (e.g. "pdf", "video")
    #[serde(default)]
    pub file_type: String,

    /// Substring of the submitter's full name
    #[serde(default)]
    pub author: String,

    /// Inclusive `[min, max]` creation year range
    #[serde(default, deserialize_with = "year_range")]
    pub year: Option<(i32, i32)>,

    /// Accepted but never applied: the fixture has no language field
    #[serde(default)]
    pub language: String,
}

/// Reads `year` as an array; anything but exactly two years means no range.
fn year_range<'de, D>(deserializer: D) -> std::result::Result<Option<(i32, i32)>, D::Error>
where
    D: Deserializer<'de>,
{
    let years = Option::<Vec<i32>>::deserialize(deserializer)?;
    Ok(match years.as_deref() {
        Some(&[min, max]) => Some((min, max)),
        _ => None,
    })
}

impl ArticleFilters {
    /// Whether a select-style filter value constrains the result.
    pub fn is_active(value: &str) -> bool {
        !value.is_empty() && value != NO_CONSTRAINT
    }

    pub fn is_empty(&self) -> bool {
        !Self::is_active(&self.category)
            && !Self::is_active(&self.file_type)
            && self.author.trim().is_empty()
            && self.year.is_none()
            && !Self::is_active(&self.language)
    }
}

/// Immutable query value threaded through the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
    #[serde(default)]
    pub term: Option<String>,

    #[serde(default)]
    pub sort_by: SortOption,

    #[serde(default)]
    pub filter: ArticleFilters,

    /// 1-based page index
    #[serde(default = "default_page")]
    pub page: u32,

    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            term: None,
            sort_by: SortOption::default(),
            filter: ArticleFilters::default(),
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl QueryParams {
    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.term = Some(term.into());
        self
    }

    pub fn with_sort(mut self, sort_by: SortOption) -> Self {
        self.sort_by = sort_by;
        self
    }

    pub fn with_filter(mut self, filter: ArticleFilters) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// The search term, if one was given and it is not empty.
    pub fn search_term(&self) -> Option<&str> {
        self.term.as_deref().filter(|t| !t.is_empty())
    }

    /// Reject malformed paging input.
    pub fn validate(&self) -> Result<()> {
        if self.page == 0 {
            return Err(AppError::validation("page must be >= 1"));
        }
        if self.limit == 0 {
            return Err(AppError::validation("limit must be >= 1"));
        }
        if let Some((min, max)) = self.filter.year {
            if min > max {
                return Err(AppError::validation(format!(
                    "year range is inverted: [{min}, {max}]"
                )));
            }
        }
        Ok(())
    }
}

/// One page of enriched query results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArticlePage {
    pub page: u32,
    pub limit: u32,

    /// True iff `page * limit < total`
    pub has_more: bool,

    /// Size of the filtered set before pagination
    pub total: usize,
    pub articles: Vec<EnrichedArticle>,
}

impl ArticlePage {
    /// SHA-256 hex digest of the serialized page.
    pub fn digest(&self) -> Result<String> {
        let bytes = serde_json::to_vec(self)?;
        Ok(hex::encode(Sha256::digest(&bytes)))
    }
}
