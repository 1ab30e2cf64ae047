//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::SortOption;
use crate::services::CitationStyle;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Fixture location and simulated latency
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Listing defaults
    #[serde(default)]
    pub query: QueryConfig,

    #[serde(default)]
    pub related: RelatedConfig,

    #[serde(default)]
    pub history: HistoryConfig,

    #[serde(default)]
    pub reading: ReadingConfig,

    #[serde(default)]
    pub citation: CitationConfig,

    #[serde(default)]
    pub translation: TranslationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.catalog.fixture_path.trim().is_empty() {
            return Err(AppError::validation("catalog.fixture_path is empty"));
        }
        if self.query.page_size == 0 {
            return Err(AppError::validation("query.page_size must be > 0"));
        }
        if self.related.max_items == 0 {
            return Err(AppError::validation("related.max_items must be > 0"));
        }
        if self.history.max_entries == 0 {
            return Err(AppError::validation("history.max_entries must be > 0"));
        }
        if self.reading.words_per_minute == 0 {
            return Err(AppError::validation(
                "reading.words_per_minute must be > 0",
            ));
        }
        if self.translation.timeout_secs == 0 {
            return Err(AppError::validation(
                "translation.timeout_secs must be > 0",
            ));
        }
        if self.translation.user_agent.trim().is_empty() {
            return Err(AppError::validation("translation.user_agent is empty"));
        }
        Url::parse(&self.citation.base_url).map_err(|e| {
            AppError::validation(format!(
                "citation.base_url '{}' is not a valid URL: {e}",
                self.citation.base_url
            ))
        })?;
        Url::parse(&self.translation.endpoint).map_err(|e| {
            AppError::validation(format!(
                "translation.endpoint '{}' is not a valid URL: {e}",
                self.translation.endpoint
            ))
        })?;
        Ok(())
    }

    /// Resolve the fixture path against a base directory.
    pub fn fixture_path(&self, base_path: &Path) -> PathBuf {
        base_path.join(&self.catalog.fixture_path)
    }
}

/// Where the fixture lives and how slow the simulated backend is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to `db.json`, relative to the data directory
    #[serde(default = "defaults::fixture_path")]
    pub fixture_path: String,

    /// Artificial delay before each page is returned, in milliseconds
    #[serde(default)]
    pub latency_ms: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            fixture_path: defaults::fixture_path(),
            latency_ms: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    #[serde(default = "defaults::page_size")]
    pub page_size: u32,

    #[serde(default)]
    pub sort_by: SortOption,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            page_size: defaults::page_size(),
            sort_by: SortOption::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedConfig {
    #[serde(default = "defaults::related_max_items")]
    pub max_items: usize,
}

impl Default for RelatedConfig {
    fn default() -> Self {
        Self {
            max_items: defaults::related_max_items(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Most recently viewed articles kept
    #[serde(default = "defaults::history_max_entries")]
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: defaults::history_max_entries(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingConfig {
    #[serde(default = "defaults::words_per_minute")]
    pub words_per_minute: u32,
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            words_per_minute: defaults::words_per_minute(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitationConfig {
    /// Public site root used to build article URLs
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    #[serde(default)]
    pub default_style: CitationStyle,
}

impl Default for CitationConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            default_style: CitationStyle::default(),
        }
    }
}

/// Settings for the translation HTTP client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    #[serde(default = "defaults::translation_endpoint")]
    pub endpoint: String,

    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Language the fixture is written in
    #[serde(default = "defaults::source_lang")]
    pub source_lang: String,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::translation_endpoint(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            source_lang: defaults::source_lang(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    use crate::models::DEFAULT_PAGE_SIZE;

    pub fn fixture_path() -> String {
        "db.json".into()
    }
    pub fn page_size() -> u32 {
        DEFAULT_PAGE_SIZE
    }
    pub fn related_max_items() -> usize {
        6
    }
    pub fn history_max_entries() -> usize {
        20
    }
    pub fn words_per_minute() -> u32 {
        200
    }
    pub fn base_url() -> String {
        "http://localhost:5173".into()
    }
    pub fn translation_endpoint() -> String {
        "https://api.mymemory.translated.net/get".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; catalog/0.1)".into()
    }
    pub fn timeout() -> u64 {
        10
    }
    pub fn source_lang() -> String {
        "en".into()
    }
    pub fn log_level() -> String {
        "info".into()
    }
}
