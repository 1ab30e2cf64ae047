//! Article records and the lookup tables they reference.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::time::parse_timestamp;

/// An article (thesis, journal, paper) as stored in the fixture.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Article {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "abstract", default)]
    pub abstract_text: String,

    /// Category reference (see [`ItemType`])
    pub item_type_id: i64,

    /// Collection reference (see [`Collection`])
    pub collection_id: i64,

    /// Submitter reference (see [`User`])
    pub submitter_id: String,

    #[serde(default)]
    pub embargo_until: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub downloads: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(rename = "hasVideo", default, skip_serializing_if = "Option::is_none")]
    pub has_video: Option<bool>,
}

impl Article {
    /// Creation timestamp, if it parses.
    pub fn created(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }

    /// Year of creation (UTC), if the timestamp parses.
    pub fn year(&self) -> Option<i32> {
        self.created().map(|t| t.year())
    }
}

/// An article plus display fields resolved at query time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedArticle {
    #[serde(flatten)]
    pub article: Article,

    /// MIME type of the first attached file, or empty
    pub file_type: String,

    /// Submitter's display name, or empty
    pub submitter: String,

    /// First image file, else the thumbnail
    pub image_url: Option<String>,

    pub item_type_name: String,
    pub collection_name: String,
    pub community_name: String,
}

/// A registered user. Articles reference their submitter by `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// A file attached to an article.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArticleFile {
    pub id: String,

    /// Owning article id
    pub item_id: String,
    pub file_path: String,
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

/// Article category (Thesis, Journal, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemType {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Collection {
    pub id: i64,
    pub name: String,
    pub community_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Community {
    pub id: i64,
    pub name: String,
}
