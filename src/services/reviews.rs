//! Reader reviews over a storage backend.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::error::{AppError, Result};
use crate::models::{NewReview, Review, ReviewSummary};
use crate::services::Catalog;
use crate::storage::LibraryStorage;

/// Hex characters kept from the content hash.
const REVIEW_ID_LEN: usize = 16;

/// Review lookups and submission for one catalog.
pub struct ReviewService {
    catalog: Arc<Catalog>,
    storage: Arc<dyn LibraryStorage>,
}

impl ReviewService {
    pub fn new(catalog: Arc<Catalog>, storage: Arc<dyn LibraryStorage>) -> Self {
        Self { catalog, storage }
    }

    /// Reviews of one article and their average.
    ///
    /// A storage failure yields an empty summary.
    pub async fn summary(&self, article_id: &str) -> ReviewSummary {
        match self.storage.load_reviews().await {
            Ok(reviews) => ReviewSummary::new(
                reviews
                    .into_iter()
                    .filter(|r| r.article_id == article_id)
                    .collect(),
            ),
            Err(e) => {
                log::warn!("Failed to load reviews for {}: {}", article_id, e);
                ReviewSummary::default()
            }
        }
    }

    /// Validate and store a new review.
    pub async fn submit(&self, new: NewReview) -> Result<Review> {
        new.validate()?;
        if self.catalog.article(&new.article_id).is_none() {
            return Err(AppError::not_found("article", &new.article_id));
        }

        let created_at = Utc::now();
        let review = Review {
            id: review_id(&new, created_at),
            user_id: String::new(),
            article_id: new.article_id,
            rating: new.rating,
            comment: new.comment.trim().to_string(),
            created_at,
        };

        self.storage.append_review(&review).await?;
        Ok(review)
    }
}

/// Content-derived review id.
fn review_id(review: &NewReview, created_at: DateTime<Utc>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(review.article_id.as_bytes());
    hasher.update([review.rating]);
    hasher.update(review.comment.as_bytes());
    hasher.update(created_at.to_rfc3339().as_bytes());

    let mut id = hex::encode(hasher.finalize());
    id.truncate(REVIEW_ID_LEN);
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EnrichedArticle;
    use crate::storage::LocalStorage;
    use crate::testing;
    use async_trait::async_trait;
    use tempfile::TempDir;

    struct BrokenStorage;

    #[async_trait]
    impl LibraryStorage for BrokenStorage {
        async fn load_history(&self) -> Result<Vec<EnrichedArticle>> {
            Err(AppError::config("offline"))
        }
        async fn save_history(&self, _: &[EnrichedArticle]) -> Result<()> {
            Err(AppError::config("offline"))
        }
        async fn record_history(
            &self,
            _: EnrichedArticle,
            _: usize,
        ) -> Result<Vec<EnrichedArticle>> {
            Err(AppError::config("offline"))
        }
        async fn load_reviews(&self) -> Result<Vec<Review>> {
            Err(AppError::config("offline"))
        }
        async fn append_review(&self, _: &Review) -> Result<()> {
            Err(AppError::config("offline"))
        }
    }

    fn new_review(article_id: &str, rating: u8) -> NewReview {
        NewReview {
            article_id: article_id.to_string(),
            rating,
            comment: "  Clear and well sourced. ".to_string(),
        }
    }

    fn service(tmp: &TempDir) -> ReviewService {
        ReviewService::new(
            Arc::new(testing::catalog()),
            Arc::new(LocalStorage::new(tmp.path())),
        )
    }

    #[tokio::test]
    async fn test_submit_and_summarize() {
        let tmp = TempDir::new().unwrap();
        let reviews = service(&tmp);

        let stored = reviews.submit(new_review("a1", 5)).await.unwrap();
        assert_eq!(stored.id.len(), REVIEW_ID_LEN);
        assert_eq!(stored.comment, "Clear and well sourced.");

        reviews.submit(new_review("a1", 4)).await.unwrap();
        reviews.submit(new_review("a1", 4)).await.unwrap();
        reviews.submit(new_review("a2", 1)).await.unwrap();

        let summary = reviews.summary("a1").await;
        assert_eq!(summary.reviews.len(), 3);
        assert_eq!(summary.avg, 4.3);

        let empty = reviews.summary("a3").await;
        assert!(empty.reviews.is_empty());
        assert_eq!(empty.avg, 0.0);
    }

    #[tokio::test]
    async fn test_submit_rejects_bad_input() {
        let tmp = TempDir::new().unwrap();
        let reviews = service(&tmp);

        assert!(matches!(
            reviews.submit(new_review("a1", 0)).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            reviews.submit(new_review("a1", 6)).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            reviews.submit(new_review("missing", 3)).await,
            Err(AppError::NotFound { .. })
        ));
        assert!(reviews.summary("a1").await.reviews.is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_degrades_to_empty() {
        let reviews = ReviewService::new(Arc::new(testing::catalog()), Arc::new(BrokenStorage));

        assert_eq!(reviews.summary("a1").await, ReviewSummary::default());
        assert!(reviews.submit(new_review("a1", 3)).await.is_err());
    }

    #[test]
    fn test_review_id_depends_on_content() {
        let at = Utc::now();
        let a = review_id(&new_review("a1", 5), at);
        let b = review_id(&new_review("a1", 4), at);
        assert_ne!(a, b);
        assert_eq!(a, review_id(&new_review("a1", 5), at));
    }
}
