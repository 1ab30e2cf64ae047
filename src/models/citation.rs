//! Input data for citation formatting.

use serde::{Deserialize, Serialize};

/// A cited author.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
}

impl Author {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            middle_name: None,
        }
    }

    /// Placeholder used when an article has no resolvable submitter.
    pub fn unknown() -> Self {
        Self::new("Unknown", "Author")
    }

    /// Split a display name into first, middle and last parts.
    ///
    /// "Ada Lovelace" → first "Ada", last "Lovelace"; "Ada King Lovelace"
    /// keeps "King" as the middle name. A single word becomes the last name.
    pub fn from_full_name(full_name: &str) -> Option<Self> {
        let parts: Vec<&str> = full_name.split_whitespace().collect();
        match parts.as_slice() {
            [] => None,
            [last] => Some(Self::new("", *last)),
            [first, last] => Some(Self::new(*first, *last)),
            [first, middle @ .., last] => Some(Self {
                first_name: first.to_string(),
                last_name: last.to_string(),
                middle_name: Some(middle.join(" ")),
            }),
        }
    }
}

/// Everything a citation style may render.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CitationData {
    pub title: String,
    pub authors: Vec<Author>,

    /// Publication year; empty renders as "n.d."
    pub year: String,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub pages: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub doi: Option<String>,

    /// Access date; today when absent
    #[serde(default)]
    pub accessed: Option<String>,
    #[serde(default)]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub item_type: Option<String>,
}
