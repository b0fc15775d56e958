// src/config.rs
use tokio::net::TcpListener;

use crate::error::ConfigError;

pub const DEFAULT_PORT: u16 = 8090;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_IMAGE_SEARCH_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Credentials and endpoints for the image-search backend.
///
/// Both credentials are optional at startup. The client reports their
/// absence when a search is actually attempted.
#[derive(Clone, Debug)]
pub struct ImageSearchConfig {
    pub api_key: Option<String>,
    pub search_engine_id: Option<String>,
    pub endpoint: String,
}

#[derive(Clone, Debug)]
pub struct ChatConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

/// Process configuration, read-only after startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub image_search: ImageSearchConfig,
    pub chat: ChatConfig,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values are treated like unset ones.
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = get("OPENAI_API_KEY").ok_or(ConfigError::MissingVar("OPENAI_API_KEY"))?;

        let port = match get("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidVar {
                name: "PORT",
                value: raw.clone(),
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            image_search: ImageSearchConfig {
                api_key: get("GOOGLE_API_KEY"),
                search_engine_id: get("GOOGLE_SEARCH_ENGINE_ID"),
                endpoint: get("IMAGE_SEARCH_URL")
                    .unwrap_or_else(|| DEFAULT_IMAGE_SEARCH_URL.to_string()),
            },
            chat: ChatConfig {
                api_key,
                base_url: get("OPENAI_BASE_URL")
                    .map(|u| u.trim_end_matches('/').to_string())
                    .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
                model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            },
        })
    }

    /// Bind the listen socket. `HOST` may be an IP literal or a hostname.
    pub async fn bind_listener(&self) -> std::io::Result<TcpListener> {
        TcpListener::bind((self.host.as_str(), self.port)).await
    }
}

/// Mask a secret for log output, keeping only a short prefix.
pub fn mask_secret(secret: &str) -> String {
    let prefix: String = secret.chars().take(4).collect();
    format!("{prefix}***")
}
