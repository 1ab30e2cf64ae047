//! Article query engine.
//!
//! A listing is produced in four strictly ordered steps:
//!
//! 1. **search**: keep articles whose title or abstract contains the term
//! 2. **filter**: narrow by category, file type, author and year range
//! 3. **sort**: order by one of the seven [`SortOption`]s
//! 4. **paginate**, then **enrich** only the articles on the requested page
//!
//! Every step is a pure function over the immutable [`Catalog`], so the
//! same [`QueryParams`] always yields the same [`ArticlePage`].

use std::cmp::Ordering;

use crate::error::Result;
use crate::models::{Article, ArticleFilters, ArticlePage, EnrichedArticle, QueryParams, SortOption};
use crate::services::Catalog;
use crate::utils::text::{contains_ci, find_ci, locale_cmp};

/// A page sliced out of a larger ordered result.
#[derive(Debug, Clone, PartialEq)]
pub struct Paginated<T> {
    pub items: Vec<T>,

    /// True iff `page * limit < total`
    pub has_more: bool,
    pub total: usize,
}

/// Whether the term occurs in the title or abstract, ignoring case.
pub fn matches_term(article: &Article, term: &str) -> bool {
    contains_ci(&article.title, term) || contains_ci(&article.abstract_text, term)
}

/// Articles whose title or abstract contains `term`, in input order.
pub fn search<'a>(articles: &'a [Article], term: &str) -> Vec<&'a Article> {
    articles.iter().filter(|a| matches_term(a, term)).collect()
}

/// Narrow `articles` by every active criterion in `filter`.
///
/// A category naming no known item type leaves the set unfiltered rather
/// than emptying it. That lookup miss is logged as a warning.
pub fn apply_filters<'a>(
    catalog: &Catalog,
    articles: Vec<&'a Article>,
    filter: &ArticleFilters,
) -> Vec<&'a Article> {
    let mut filtered = articles;

    if ArticleFilters::is_active(&filter.category) {
        match catalog.item_type_named(&filter.category) {
            Some(item_type) => filtered.retain(|a| a.item_type_id == item_type.id),
            None => log::warn!(
                "No item type named '{}'; category filter not applied",
                filter.category
            ),
        }
    }

    if ArticleFilters::is_active(&filter.file_type) {
        filtered.retain(|a| {
            catalog
                .files(&a.id)
                .iter()
                .any(|f| contains_ci(&f.mime_type, &filter.file_type))
        });
    }

    if !filter.author.trim().is_empty() {
        filtered.retain(|a| {
            catalog
                .user(&a.submitter_id)
                .is_some_and(|u| contains_ci(&u.full_name, &filter.author))
        });
    }

    if let Some((min_year, max_year)) = filter.year {
        filtered.retain(|a| a.year().is_some_and(|y| (min_year..=max_year).contains(&y)));
    }

    if ArticleFilters::is_active(&filter.language) {
        log::debug!(
            "Language filter '{}' ignored: articles carry no language",
            filter.language
        );
    }

    filtered
}

/// Earlier match first; any match before no match.
fn match_position_cmp(a: Option<usize>, b: Option<usize>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable sort on a key computed once per article.
fn sorted_by<'a, K>(
    articles: Vec<&'a Article>,
    key: impl Fn(&'a Article) -> K,
    cmp: impl Fn(&K, &K) -> Ordering,
) -> Vec<&'a Article> {
    let mut keyed: Vec<(K, &'a Article)> = articles.into_iter().map(|a| (key(a), a)).collect();
    keyed.sort_by(|(ka, _), (kb, _)| cmp(ka, kb));
    keyed.into_iter().map(|(_, a)| a).collect()
}

/// Order articles. `term` only matters for [`SortOption::Relevance`];
/// without one, relevance falls back to newest first.
pub fn sort_articles<'a>(
    catalog: &Catalog,
    articles: Vec<&'a Article>,
    sort_by: SortOption,
    term: Option<&str>,
) -> Vec<&'a Article> {
    match (sort_by, term.filter(|t| !t.is_empty())) {
        (SortOption::Relevance, Some(term)) => sorted_by(
            articles,
            |a| (find_ci(&a.title, term), find_ci(&a.abstract_text, term)),
            |(ta, aa), (tb, ab)| {
                match_position_cmp(*ta, *tb).then_with(|| match_position_cmp(*aa, *ab))
            },
        ),
        (SortOption::Relevance, None) | (SortOption::DateDesc, _) => {
            sorted_by(articles, Article::created, |a, b| b.cmp(a))
        }
        (SortOption::DateAsc, _) => sorted_by(articles, Article::created, |a, b| a.cmp(b)),
        (SortOption::TitleAsc, _) => {
            sorted_by(articles, |a| a.title.as_str(), |a, b| locale_cmp(a, b))
        }
        (SortOption::TitleDesc, _) => {
            sorted_by(articles, |a| a.title.as_str(), |a, b| locale_cmp(b, a))
        }
        (SortOption::AuthorAsc, _) => sorted_by(
            articles,
            |a| catalog.submitter_name(a),
            |a, b| locale_cmp(a, b),
        ),
        (SortOption::AuthorDesc, _) => sorted_by(
            articles,
            |a| catalog.submitter_name(a),
            |a, b| locale_cmp(b, a),
        ),
    }
}

/// Slice out 1-based page `page` of size `limit`.
///
/// Pages past the end are empty with `has_more == false`.
pub fn paginate<T>(items: Vec<T>, page: u32, limit: u32) -> Paginated<T> {
    let total = items.len();
    let limit = limit as usize;
    let start = (page.saturating_sub(1) as usize).saturating_mul(limit);
    let end = start.saturating_add(limit);

    Paginated {
        items: items.into_iter().skip(start).take(limit).collect(),
        has_more: end < total,
        total,
    }
}

/// Resolve display fields for one article.
pub fn enrich(catalog: &Catalog, article: &Article) -> EnrichedArticle {
    let files = catalog.files(&article.id);

    let file_type = files
        .first()
        .map(|f| f.mime_type.clone())
        .unwrap_or_default();

    let image_url = files
        .iter()
        .find(|f| f.mime_type.starts_with("image/"))
        .map(|f| f.file_path.clone())
        .or_else(|| article.thumbnail.clone().filter(|t| !t.is_empty()));

    EnrichedArticle {
        article: article.clone(),
        file_type,
        submitter: catalog.submitter_name(article).to_string(),
        image_url,
        item_type_name: catalog.item_type_name(article.item_type_id).to_string(),
        collection_name: catalog.collection_name(article.collection_id).to_string(),
        community_name: catalog.community_name(article.collection_id).to_string(),
    }
}

/// Run the full search → filter → sort → paginate → enrich pipeline.
pub fn get_articles(catalog: &Catalog, params: &QueryParams) -> Result<ArticlePage> {
    params.validate()?;

    let term = params.search_term();
    let matched = match term {
        Some(term) => search(catalog.articles(), term),
        None => catalog.articles().iter().collect(),
    };

    let filtered = apply_filters(catalog, matched, &params.filter);
    let sorted = sort_articles(catalog, filtered, params.sort_by, term);
    let page = paginate(sorted, params.page, params.limit);

    log::debug!(
        "Query term={:?} sort={} page={} limit={}: {} of {} matches",
        term,
        params.sort_by,
        params.page,
        params.limit,
        page.items.len(),
        page.total
    );

    Ok(ArticlePage {
        page: params.page,
        limit: params.limit,
        has_more: page.has_more,
        total: page.total,
        articles: page.items.into_iter().map(|a| enrich(catalog, a)).collect(),
    })
}

impl Catalog {
    /// Articles matching `term` in title or abstract.
    pub fn search(&self, term: &str) -> Vec<&Article> {
        search(self.articles(), term)
    }

    /// One page of enriched results for `params`.
    pub fn get_articles(&self, params: &QueryParams) -> Result<ArticlePage> {
        get_articles(self, params)
    }
}
