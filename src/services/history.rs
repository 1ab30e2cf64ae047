//! Recently viewed articles.

use std::sync::Arc;

use crate::error::Result;
use crate::models::{DEFAULT_PAGE_SIZE, EnrichedArticle};
use crate::services::query::{Paginated, paginate};
use crate::storage::LibraryStorage;

/// Most-recent-first list of viewed articles, capped at `max_entries`.
pub struct ReadingHistory {
    storage: Arc<dyn LibraryStorage>,
    max_entries: usize,
}

impl ReadingHistory {
    pub fn new(storage: Arc<dyn LibraryStorage>, max_entries: usize) -> Self {
        Self {
            storage,
            max_entries,
        }
    }

    /// Stored history, newest first.
    pub async fn entries(&self) -> Result<Vec<EnrichedArticle>> {
        self.storage.load_history().await
    }

    /// Move `article` to the front, dropping older duplicates and overflow.
    pub async fn record(&self, article: EnrichedArticle) -> Result<Vec<EnrichedArticle>> {
        self.storage.record_history(article, self.max_entries).await
    }

    /// One page of the history.
    pub async fn page(&self, page: u32, limit: u32) -> Result<Paginated<EnrichedArticle>> {
        Ok(paginate(self.entries().await?, page, limit))
    }

    /// First page at the default size.
    pub async fn first_page(&self) -> Result<Paginated<EnrichedArticle>> {
        self.page(1, DEFAULT_PAGE_SIZE).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::query::enrich;
    use crate::storage::LocalStorage;
    use crate::testing;
    use tempfile::TempDir;

    fn ids(history: &[EnrichedArticle]) -> Vec<&str> {
        history.iter().map(|a| a.article.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_record_moves_to_front_and_dedupes() {
        let tmp = TempDir::new().unwrap();
        let catalog = testing::catalog();
        let history = ReadingHistory::new(Arc::new(LocalStorage::new(tmp.path())), 20);

        for id in ["a1", "a2", "a3", "a1"] {
            history
                .record(enrich(&catalog, catalog.article(id).unwrap()))
                .await
                .unwrap();
        }

        let stored = history.entries().await.unwrap();
        assert_eq!(ids(&stored), vec!["a1", "a3", "a2"]);
    }

    #[tokio::test]
    async fn test_record_caps_entries() {
        let tmp = TempDir::new().unwrap();
        let catalog = testing::bulk_catalog(25);
        let history = ReadingHistory::new(Arc::new(LocalStorage::new(tmp.path())), 20);

        for article in catalog.articles() {
            history.record(enrich(&catalog, article)).await.unwrap();
        }

        let stored = history.entries().await.unwrap();
        assert_eq!(stored.len(), 20);
        assert_eq!(stored[0].article.id, "q24");
        assert_eq!(stored[19].article.id, "q05");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_records_are_all_kept() {
        let tmp = TempDir::new().unwrap();
        let catalog = testing::bulk_catalog(12);
        let history = Arc::new(ReadingHistory::new(
            Arc::new(LocalStorage::new(tmp.path())),
            20,
        ));

        let handles: Vec<_> = catalog
            .articles()
            .iter()
            .map(|article| {
                let history = Arc::clone(&history);
                let article = enrich(&catalog, article);
                tokio::spawn(async move { history.record(article).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let stored = history.entries().await.unwrap();
        assert_eq!(stored.len(), 12);
        let mut stored_ids = ids(&stored);
        stored_ids.sort_unstable();
        let expected: Vec<_> = catalog.articles().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(stored_ids, expected);
    }

    #[tokio::test]
    async fn test_history_pages() {
        let tmp = TempDir::new().unwrap();
        let catalog = testing::bulk_catalog(12);
        let history = ReadingHistory::new(Arc::new(LocalStorage::new(tmp.path())), 20);

        for article in catalog.articles() {
            history.record(enrich(&catalog, article)).await.unwrap();
        }

        let first = history.first_page().await.unwrap();
        assert_eq!(first.items.len(), 10);
        assert!(first.has_more);
        assert_eq!(first.total, 12);

        let second = history.page(2, 10).await.unwrap();
        assert_eq!(ids(&second.items), vec!["q01", "q00"]);
        assert!(!second.has_more);
    }

    #[tokio::test]
    async fn test_empty_history() {
        let tmp = TempDir::new().unwrap();
        let history = ReadingHistory::new(Arc::new(LocalStorage::new(tmp.path())), 20);
        assert!(history.entries().await.unwrap().is_empty());
        assert!(history.first_page().await.unwrap().items.is_empty());
    }
}
