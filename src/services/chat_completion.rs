// src/services/chat_completion.rs
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::ChatConfig;
use crate::error::ChatError;

/// Sent as a plain chat reply whenever the backend call fails.
pub const CHAT_FALLBACK_REPLY: &str = "Something went wrong with the chat request.";

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ModelInfo {
    id: String,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

/// Client for an OpenAI-compatible chat-completion API.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: Client,
    config: ChatConfig,
}

impl ChatClient {
    pub fn new(config: ChatConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(http: Client, config: ChatConfig) -> Self {
        Self { http, config }
    }

    /// Ask the model about `message`. Never fails: errors are logged and
    /// replaced by [`CHAT_FALLBACK_REPLY`].
    pub async fn complete(&self, message: &str) -> String {
        match self.try_complete(message).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(error = %e, "chat completion failed");
                CHAT_FALLBACK_REPLY.to_string()
            }
        }
    }

    pub async fn try_complete(&self, message: &str) -> Result<String, ChatError> {
        let model = self.resolve_model().await?;
        debug!(%model, "requesting chat completion");

        let url = format!("{}/chat/completions", self.config.base_url);
        let request = CompletionRequest {
            model: &model,
            messages: [ChatMessage { role: "user", content: message }],
        };
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ChatError::Status(response.status()));
        }

        let completion: CompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ChatError::EmptyReply)
    }

    async fn resolve_model(&self) -> Result<String, ChatError> {
        let url = format!("{}/models/{}", self.config.base_url, self.config.model);
        let response = self.http.get(&url).bearer_auth(&self.config.api_key).send().await?;

        if !response.status().is_success() {
            return Err(ChatError::Status(response.status()));
        }

        let info: ModelInfo = response.json().await?;
        Ok(info.id)
    }
}
