//! Machine translation of article text through a MyMemory-compatible API.
//!
//! Translation is best effort: any failure (network, HTTP status, bad
//! payload) is logged and the original text is returned unchanged.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use futures::future::join_all;
use serde::Deserialize;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::TranslationConfig;

/// UI language codes mapped to the locale codes the API expects.
const LANGUAGE_CODES: [(&str, &str); 5] = [
    ("en", "en-US"),
    ("ar", "ar-SA"),
    ("ha", "ha"),
    ("fr", "fr-FR"),
    ("ch", "zh-CN"),
];

/// API locale for a UI language code; unknown codes pass through.
pub fn api_language_code(code: &str) -> &str {
    LANGUAGE_CODES
        .iter()
        .find(|(ui, _)| *ui == code)
        .map(|(_, api)| *api)
        .unwrap_or(code)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslationResponse {
    #[serde(default)]
    response_data: Option<ResponseData>,

    /// Number or numeric string depending on the endpoint
    #[serde(default)]
    response_status: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseData {
    #[serde(default)]
    translated_text: String,
}

impl TranslationResponse {
    fn is_ok(&self) -> bool {
        match &self.response_status {
            serde_json::Value::Number(n) => n.as_u64() == Some(200),
            serde_json::Value::String(s) => s == "200",
            _ => false,
        }
    }
}

/// Create the HTTP client used for translation requests.
pub fn create_client(config: &TranslationConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Caching translation client.
#[derive(Debug)]
pub struct Translator {
    client: reqwest::Client,
    endpoint: Url,
    source_lang: String,
    cache: Mutex<HashMap<String, String>>,
}

impl Translator {
    pub fn new(config: &TranslationConfig) -> Result<Self> {
        Ok(Self {
            client: create_client(config)?,
            endpoint: Url::parse(&config.endpoint)?,
            source_lang: config.source_lang.clone(),
            cache: Mutex::new(HashMap::new()),
        })
    }

    /// Language that untranslated text is written in.
    pub fn source_lang(&self) -> &str {
        &self.source_lang
    }

    /// Translate from the configured source language.
    pub async fn translate(&self, text: &str, target: &str) -> String {
        self.translate_from(text, target, &self.source_lang).await
    }

    /// Translate `text` from `source` to `target`, falling back to `text`.
    pub async fn translate_from(&self, text: &str, target: &str, source: &str) -> String {
        if target == source {
            return text.to_string();
        }

        let key = cache_key(source, target, text);
        if let Some(hit) = self.cached(&key) {
            return hit;
        }

        match self.request(text, target, source).await {
            Ok(translated) => {
                self.store(key, translated.clone());
                translated
            }
            Err(e) => {
                log::warn!("Translation {}→{} failed: {}", source, target, e);
                text.to_string()
            }
        }
    }

    /// Translate many texts concurrently, preserving order.
    pub async fn translate_batch(&self, texts: &[String], target: &str) -> Vec<String> {
        join_all(texts.iter().map(|text| self.translate(text, target))).await
    }

    /// Drop every cached translation.
    pub fn clear_cache(&self) {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        log::debug!("Clearing {} cached translations", cache.len());
        cache.clear();
    }

    pub fn cached_count(&self) -> usize {
        self.cache.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    fn cached(&self, key: &str) -> Option<String> {
        self.cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    fn store(&self, key: String, value: String) {
        self.cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key, value);
    }

    fn request_url(&self, text: &str, target: &str, source: &str) -> Url {
        let langpair = format!("{}|{}", api_language_code(source), api_language_code(target));
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", text)
            .append_pair("langpair", &langpair);
        url
    }

    async fn request(&self, text: &str, target: &str, source: &str) -> Result<String> {
        let url = self.request_url(text, target, source);
        log::debug!("Translating {} chars {}→{}", text.len(), source, target);

        let response: TranslationResponse = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        match response.response_data {
            Some(data) if response.is_ok() && !data.translated_text.is_empty() => {
                Ok(data.translated_text)
            }
            _ => Err(AppError::validation(format!(
                "translation service returned status {}",
                response.response_status
            ))),
        }
    }
}

fn cache_key(source: &str, target: &str, text: &str) -> String {
    format!("{source}-{target}-{text}")
}
