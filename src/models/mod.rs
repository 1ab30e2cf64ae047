// src/models/mod.rs

//! Domain models for the catalog.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod article;
mod citation;
mod config;
mod fixture;
mod query;
mod review;

// Re-export all public types
pub use article::{Article, ArticleFile, Collection, Community, EnrichedArticle, ItemType, User};
pub use citation::{Author, CitationData};
pub use config::{
    CatalogConfig, CitationConfig, Config, HistoryConfig, LoggingConfig, QueryConfig,
    ReadingConfig, RelatedConfig, TranslationConfig,
};
pub use fixture::Fixture;
pub use query::{ArticleFilters, ArticlePage, DEFAULT_PAGE_SIZE, QueryParams, SortOption};
pub use review::{MAX_RATING, MIN_RATING, NewReview, Review, ReviewSummary};
