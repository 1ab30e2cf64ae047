//! The bundled record set standing in for a backend database.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{Article, ArticleFile, Collection, Community, ItemType, User};

/// Root of `db.json`: every table is loaded wholesale into memory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fixture {
    /// Articles
    #[serde(default)]
    pub items: Vec<Article>,

    #[serde(default)]
    pub users: Vec<User>,

    #[serde(default)]
    pub files: Vec<ArticleFile>,

    #[serde(default)]
    pub item_types: Vec<ItemType>,

    #[serde(default)]
    pub collections: Vec<Collection>,

    #[serde(default)]
    pub communities: Vec<Community>,
}

impl Fixture {
    /// Load the fixture from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Validate that the fixture can back a catalog.
    pub fn validate(&self) -> Result<()> {
        if self.items.is_empty() {
            return Err(AppError::validation("No articles defined in fixture"));
        }

        let mut seen = HashSet::new();
        for article in &self.items {
            if !seen.insert(article.id.as_str()) {
                return Err(AppError::validation(format!(
                    "Duplicate article id '{}' in fixture",
                    article.id
                )));
            }
        }

        Ok(())
    }
}
