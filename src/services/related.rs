//! Articles related to the one being read.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::Article;
use crate::services::Catalog;
use crate::utils::time::relative_label;

/// Extra candidates fetched beyond `max_items` before excluding the current article.
const CANDIDATE_SLACK: usize = 5;

/// A related article with its display labels.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedArticle<'a> {
    pub article: &'a Article,
    pub date_label: String,
    pub views_label: String,
}

impl<'a> RelatedArticle<'a> {
    pub fn new(article: &'a Article, now: DateTime<Utc>) -> Self {
        Self {
            article,
            date_label: article
                .created()
                .map(|created| relative_label(created, now))
                .unwrap_or_default(),
            views_label: views_label(article.views),
        }
    }
}

/// Compact view count: `1.2K` from a thousand up.
pub fn views_label(views: u64) -> String {
    if views >= 1000 {
        format!("{:.1}K", views as f64 / 1000.0)
    } else {
        views.to_string()
    }
}

/// Up to `max_items` articles sharing `current`'s collection.
///
/// Only the first `max_items + 5` collection members (fixture order) are
/// considered. Same item type ranks first, then views descending.
pub fn related_articles<'a>(
    catalog: &'a Catalog,
    current: &Article,
    max_items: usize,
) -> Vec<&'a Article> {
    let mut candidates: Vec<&Article> = catalog
        .articles()
        .iter()
        .filter(|a| a.collection_id == current.collection_id)
        .take(max_items.saturating_add(CANDIDATE_SLACK))
        .filter(|a| a.id != current.id)
        .collect();

    candidates.sort_by(|a, b| {
        let a_other = a.item_type_id != current.item_type_id;
        let b_other = b.item_type_id != current.item_type_id;
        a_other.cmp(&b_other).then_with(|| b.views.cmp(&a.views))
    });
    candidates.truncate(max_items);
    candidates
}

impl Catalog {
    /// Related articles for `id` with labels relative to `now`.
    pub fn related(
        &self,
        id: &str,
        max_items: usize,
        now: DateTime<Utc>,
    ) -> Result<Vec<RelatedArticle<'_>>> {
        let current = self
            .article(id)
            .ok_or_else(|| AppError::not_found("article", id))?;

        Ok(related_articles(self, current, max_items)
            .into_iter()
            .map(|a| RelatedArticle::new(a, now))
            .collect())
    }
}
