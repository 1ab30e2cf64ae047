//! Page fetching entry points.
//!
//! - `fetch_articles`: one page of a query after the simulated latency
//! - `ArticleFeed`: every page of a query, in order, as a stream

pub mod fetch;

pub use fetch::{ArticleFeed, fetch_articles, next_page_param};
