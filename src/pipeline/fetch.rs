// src/pipeline/fetch.rs

//! Incremental page fetching over the query engine.
//!
//! The catalog has no real backend, so each page is computed locally and
//! optionally delayed to mimic network latency. [`ArticleFeed`] walks pages
//! the way an infinite list does: start at page 1, and request `page + 1`
//! for as long as the previous response reports `has_more`.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, Stream, TryStreamExt};

use crate::error::{AppError, Result};
use crate::models::{ArticlePage, EnrichedArticle, QueryParams};
use crate::services::{Catalog, query};

/// Fetch one page after the simulated latency.
pub async fn fetch_articles(
    catalog: &Catalog,
    params: &QueryParams,
    latency: Duration,
) -> Result<ArticlePage> {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
    query::get_articles(catalog, params)
}

/// Page to request after `last`, if any.
pub fn next_page_param(last: &ArticlePage) -> Option<u32> {
    last.has_more.then_some(last.page + 1)
}

/// Cursor over every page of one query.
#[derive(Debug, Clone)]
pub struct ArticleFeed {
    catalog: Arc<Catalog>,
    params: QueryParams,
    latency: Duration,
}

impl ArticleFeed {
    /// Create a feed for `params`. The feed always starts at page 1.
    pub fn new(catalog: Arc<Catalog>, params: QueryParams) -> Self {
        Self {
            catalog,
            params,
            latency: Duration::ZERO,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Pages in order, ending after the first page without `has_more`.
    pub fn pages(&self) -> impl Stream<Item = Result<ArticlePage>> + '_ {
        stream::try_unfold(Some(1u32), move |next| async move {
            let Some(page) = next else {
                return Ok::<_, AppError>(None);
            };

            let params = self.params.clone().with_page(page);
            let result = fetch_articles(&self.catalog, &params, self.latency).await?;
            let next = next_page_param(&result);

            log::debug!(
                "Feed page {} loaded ({} articles, has_more={})",
                page,
                result.articles.len(),
                result.has_more
            );

            Ok(Some((result, next)))
        })
    }

    /// All pages concatenated into one flat list.
    pub async fn collect_all(&self) -> Result<Vec<EnrichedArticle>> {
        let pages: Vec<ArticlePage> = self.pages().try_collect().await?;
        Ok(pages.into_iter().flat_map(|p| p.articles).collect())
    }
}
