// src/state.rs
use std::sync::Arc;

use crate::config::Config;
use crate::services::chat_completion::ChatClient;
use crate::services::image_search::ImageSearchClient;
use crate::services::metrics_manager::MetricsManager;

pub type SharedState = Arc<AppState>;

/// Everything a connection needs, built once at startup.
///
/// The two clients only hold read-only configuration, so a single
/// instance is shared by every connection.
pub struct AppState {
    pub image_search: ImageSearchClient,
    pub chat: ChatClient,
    pub metrics: MetricsManager,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let http = reqwest::Client::new();
        Self {
            image_search: ImageSearchClient::with_client(http.clone(), config.image_search.clone()),
            chat: ChatClient::with_client(http, config.chat.clone()),
            metrics: MetricsManager::new(),
        }
    }

    pub fn shared(config: &Config) -> SharedState {
        Arc::new(Self::new(config))
    }
}
