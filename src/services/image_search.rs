// src/services/image_search.rs
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::{ImageSearchConfig, mask_secret};
use crate::error::{ConfigError, ImageSearchError};

const LOG_BODY_LIMIT: usize = 200;

/// Outcome of one image lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageResult {
    Found(String),
    NotFound,
    /// Transport, status or parse failure. Already logged.
    Failed(String),
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    link: String,
}

#[derive(Debug, Clone)]
pub struct ImageSearchClient {
    http: Client,
    config: ImageSearchConfig,
}

impl ImageSearchClient {
    pub fn new(config: ImageSearchConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(http: Client, config: ImageSearchConfig) -> Self {
        Self { http, config }
    }

    /// Look up the first image for `query`.
    ///
    /// Only missing credentials are returned as an error. Every backend
    /// failure is logged and reported as [`ImageResult::Failed`].
    pub async fn search_image(&self, query: &str) -> Result<ImageResult, ConfigError> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            warn!("image search attempted without GOOGLE_API_KEY");
            return Err(ConfigError::MissingVar("GOOGLE_API_KEY"));
        };
        let Some(cx) = self.config.search_engine_id.as_deref() else {
            warn!("image search attempted without GOOGLE_SEARCH_ENGINE_ID");
            return Err(ConfigError::MissingVar("GOOGLE_SEARCH_ENGINE_ID"));
        };

        debug!(key = %mask_secret(api_key), cx, query, "sending image search request");

        match self.fetch_first_link(api_key, cx, query).await {
            Ok(Some(url)) => {
                info!(%url, "image found");
                Ok(ImageResult::Found(url))
            }
            Ok(None) => {
                info!(query, "no images in search response");
                Ok(ImageResult::NotFound)
            }
            Err(e) => {
                warn!(error = %e, "image search failed");
                Ok(ImageResult::Failed(e.to_string()))
            }
        }
    }

    async fn fetch_first_link(
        &self,
        api_key: &str,
        cx: &str,
        query: &str,
    ) -> Result<Option<String>, ImageSearchError> {
        let response = self
            .http
            .get(&self.config.endpoint)
            .query(&[
                ("key", api_key),
                ("cx", cx),
                ("q", query),
                ("searchType", "image"),
                ("num", "1"),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(%status, body = %truncate(&body, LOG_BODY_LIMIT), "image search response");

        if !status.is_success() {
            return Err(ImageSearchError::Status(status));
        }

        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| ImageSearchError::Parse(e.to_string()))?;
        Ok(parsed.items.into_iter().next().map(|item| item.link))
    }
}

fn truncate(s: &str, limit: usize) -> &str {
    match s.char_indices().nth(limit) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
