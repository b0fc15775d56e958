// src/error.rs
use thiserror::Error;

/// Startup and lookup-time configuration problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    MissingVar(&'static str),

    #[error("invalid value for {name}: {value:?}")]
    InvalidVar { name: &'static str, value: String },
}

/// Failures talking to the image-search backend. Never leaves the client.
#[derive(Debug, Error)]
pub enum ImageSearchError {
    #[error("image search request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("image search returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("failed to parse image search response: {0}")]
    Parse(String),
}

/// Failures talking to the chat-completion backend.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("chat request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("chat backend returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("chat backend returned no content")]
    EmptyReply,
}

/// Errors that reach the per-message boundary.
///
/// The `Display` text is what the client sees in the `error` payload.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("message handling failed: {0}")]
    Internal(#[from] tokio::task::JoinError),
}
