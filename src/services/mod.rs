//! Service layer for the catalog.
//!
//! This module contains the business logic for:
//! - Indexed lookups over the fixture (`Catalog`)
//! - Search, filter, sort and pagination (`query`)
//! - Article details, related articles and citations
//! - Reviews and reading history over a storage backend
//! - Best-effort translation (`Translator`)

mod catalog;
pub mod citation;
pub mod details;
pub mod history;
pub mod query;
pub mod related;
pub mod reviews;
pub mod translation;

pub use catalog::Catalog;
pub use citation::{CitationStyle, citation_data, plain_text};
pub use details::{ArticleDetails, ReadingTime, ViewerKind};
pub use history::ReadingHistory;
pub use query::{Paginated, get_articles};
pub use related::{RelatedArticle, related_articles};
pub use reviews::ReviewService;
pub use translation::Translator;
