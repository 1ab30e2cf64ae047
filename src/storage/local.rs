//! Local filesystem storage implementation.
//!
//! Every file is written atomically (temp file, then rename) so an
//! interrupted write never leaves half a JSON document behind.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::error::{AppError, Result};
use crate::models::{EnrichedArticle, Review};
use crate::storage::{LibraryStorage, push_front};

const HISTORY_KEY: &str = "history.json";
const REVIEWS_KEY: &str = "reviews.json";

/// Suffix source for temp files, so concurrent writers never share one.
static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Local filesystem storage backend.
#[derive(Debug)]
pub struct LocalStorage {
    root_dir: PathBuf,

    /// Serializes writes to `history.json`
    history_lock: Mutex<()>,

    /// Serializes read-modify-write cycles on `reviews.json`
    reviews_lock: Mutex<()>,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            history_lock: Mutex::new(()),
            reviews_lock: Mutex::new(()),
        }
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let seq = TMP_SEQ.fetch_add(1, Ordering::Relaxed);
        let tmp = path.with_extension(format!("{}-{seq}.tmp", std::process::id()));
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(key, &bytes).await
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read_bytes(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl LibraryStorage for LocalStorage {
    async fn load_history(&self) -> Result<Vec<EnrichedArticle>> {
        match self.read_json(HISTORY_KEY).await? {
            Some(history) => Ok(history),
            None => {
                log::debug!("No {} found, starting with empty history", HISTORY_KEY);
                Ok(Vec::new())
            }
        }
    }

    async fn save_history(&self, history: &[EnrichedArticle]) -> Result<()> {
        let _guard = self.history_lock.lock().await;

        self.write_json(HISTORY_KEY, history).await?;
        log::debug!("History: {} entries written", history.len());
        Ok(())
    }

    async fn record_history(
        &self,
        article: EnrichedArticle,
        max_entries: usize,
    ) -> Result<Vec<EnrichedArticle>> {
        let _guard = self.history_lock.lock().await;

        let previous = self.load_history().await?;
        let history = push_front(previous, article, max_entries);
        self.write_json(HISTORY_KEY, &history).await?;

        log::debug!("History: {} entries written", history.len());
        Ok(history)
    }

    async fn load_reviews(&self) -> Result<Vec<Review>> {
        Ok(self.read_json(REVIEWS_KEY).await?.unwrap_or_default())
    }

    async fn append_review(&self, review: &Review) -> Result<()> {
        let _guard = self.reviews_lock.lock().await;

        let mut reviews = self.load_reviews().await?;
        reviews.push(review.clone());
        self.write_json(REVIEWS_KEY, &reviews).await?;

        log::info!(
            "Review {} stored for article {} ({} total)",
            review.id,
            review.article_id,
            reviews.len()
        );
        Ok(())
    }
}
