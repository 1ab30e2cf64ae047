//! In-memory catalog over the fixture.
//!
//! Wraps a [`Fixture`] with keyed lookup tables. Every lookup is total: a
//! miss yields `None` or an empty string, never an error.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use crate::error::Result;
use crate::models::{Article, ArticleFile, Collection, Community, Fixture, ItemType, User};

/// Read-only article catalog with indexed joins.
#[derive(Debug, Clone)]
pub struct Catalog {
    fixture: Fixture,
    articles: HashMap<String, usize>,
    users: HashMap<String, usize>,
    files: HashMap<String, Vec<usize>>,
    item_types: HashMap<i64, usize>,
    collections: HashMap<i64, usize>,
    communities: HashMap<i64, usize>,
}

/// Map keys to the position of their first record.
fn first_index<K, T>(records: &[T], key: impl Fn(&T) -> K) -> HashMap<K, usize>
where
    K: std::hash::Hash + Eq,
{
    let mut index = HashMap::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        index.entry(key(record)).or_insert(i);
    }
    index
}

impl Catalog {
    /// Build lookup tables over a fixture.
    pub fn new(fixture: Fixture) -> Self {
        let mut files: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, file) in fixture.files.iter().enumerate() {
            files.entry(file.item_id.clone()).or_default().push(i);
        }

        Self {
            articles: first_index(&fixture.items, |a| a.id.clone()),
            users: first_index(&fixture.users, |u| u.id.clone()),
            item_types: first_index(&fixture.item_types, |t| t.id),
            collections: first_index(&fixture.collections, |c| c.id),
            communities: first_index(&fixture.communities, |c| c.id),
            files,
            fixture,
        }
    }

    /// Load and validate a fixture file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let fixture = Fixture::load(&path)?;
        fixture.validate()?;

        log::info!(
            "Loaded fixture from {}: {} articles, {} users, {} files",
            path.as_ref().display(),
            fixture.items.len(),
            fixture.users.len(),
            fixture.files.len()
        );

        Ok(Self::new(fixture))
    }

    pub fn fixture(&self) -> &Fixture {
        &self.fixture
    }

    /// All articles in fixture order.
    pub fn articles(&self) -> &[Article] {
        &self.fixture.items
    }

    pub fn article(&self, id: &str) -> Option<&Article> {
        self.articles.get(id).map(|&i| &self.fixture.items[i])
    }

    /// Files attached to an article, in fixture order.
    pub fn files(&self, article_id: &str) -> Vec<&ArticleFile> {
        self.files
            .get(article_id)
            .map(|idx| idx.iter().map(|&i| &self.fixture.files[i]).collect())
            .unwrap_or_default()
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.get(id).map(|&i| &self.fixture.users[i])
    }

    /// Submitter of an article. `None` if either the article or user is missing.
    pub fn author_of(&self, article_id: &str) -> Option<&User> {
        self.article(article_id)
            .and_then(|article| self.user(&article.submitter_id))
    }

    /// Submitter's full name, or empty.
    pub fn submitter_name(&self, article: &Article) -> &str {
        self.user(&article.submitter_id)
            .map(|u| u.full_name.as_str())
            .unwrap_or_default()
    }

    pub fn item_type(&self, id: i64) -> Option<&ItemType> {
        self.item_types.get(&id).map(|&i| &self.fixture.item_types[i])
    }

    /// Item type whose name equals `name`, ignoring case.
    pub fn item_type_named(&self, name: &str) -> Option<&ItemType> {
        let name = name.to_lowercase();
        self.fixture
            .item_types
            .iter()
            .find(|t| t.name.to_lowercase() == name)
    }

    pub fn collection(&self, id: i64) -> Option<&Collection> {
        self.collections.get(&id).map(|&i| &self.fixture.collections[i])
    }

    pub fn community(&self, id: i64) -> Option<&Community> {
        self.communities.get(&id).map(|&i| &self.fixture.communities[i])
    }

    pub fn item_type_name(&self, id: i64) -> &str {
        self.item_type(id).map(|t| t.name.as_str()).unwrap_or_default()
    }

    pub fn collection_name(&self, id: i64) -> &str {
        self.collection(id).map(|c| c.name.as_str()).unwrap_or_default()
    }

    /// Name of the community owning a collection, or empty.
    pub fn community_name(&self, collection_id: i64) -> &str {
        self.collection(collection_id)
            .and_then(|c| self.community(c.community_id))
            .map(|c| c.name.as_str())
            .unwrap_or_default()
    }

    /// Item type names in fixture order.
    pub fn categories(&self) -> Vec<&str> {
        self.fixture.item_types.iter().map(|t| t.name.as_str()).collect()
    }

    /// User full names in fixture order.
    pub fn authors(&self) -> Vec<&str> {
        self.fixture.users.iter().map(|u| u.full_name.as_str()).collect()
    }

    /// Distinct creation years, newest first.
    pub fn years(&self) -> Vec<i32> {
        let years: BTreeSet<i32> = self.articles().iter().filter_map(Article::year).collect();
        years.into_iter().rev().collect()
    }
}
