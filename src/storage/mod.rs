//! Persistence for reader state: reviews and reading history.
//!
//! The catalog itself is read-only; only data produced while reading is
//! written back.
//!
//! ## Directory Structure
//!
//! ```text
//! {root}/
//! ├── history.json   # Recently viewed articles, newest first
//! └── reviews.json   # All reviews, in submission order
//! ```

pub mod local;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{EnrichedArticle, Review};

pub use local::LocalStorage;

/// Trait for reader-state storage backends.
#[async_trait]
pub trait LibraryStorage: Send + Sync {
    /// Load the reading history, newest first. Empty when nothing is stored.
    async fn load_history(&self) -> Result<Vec<EnrichedArticle>>;

    /// Replace the stored reading history.
    async fn save_history(&self, history: &[EnrichedArticle]) -> Result<()>;

    /// Move `article` to the front of the stored history as one atomic
    /// load-modify-save, keeping at most `max_entries`. Returns the new history.
    async fn record_history(
        &self,
        article: EnrichedArticle,
        max_entries: usize,
    ) -> Result<Vec<EnrichedArticle>>;

    /// Load every stored review. Empty when nothing is stored.
    async fn load_reviews(&self) -> Result<Vec<Review>>;

    /// Append one review.
    async fn append_review(&self, review: &Review) -> Result<()>;
}

/// `article` first, then `previous` without its older copy, capped at `max_entries`.
pub fn push_front(
    previous: Vec<EnrichedArticle>,
    article: EnrichedArticle,
    max_entries: usize,
) -> Vec<EnrichedArticle> {
    let mut history = Vec::with_capacity(previous.len() + 1);
    let id = article.article.id.clone();
    history.push(article);
    history.extend(previous.into_iter().filter(|a| a.article.id != id));
    history.truncate(max_entries);
    history
}
