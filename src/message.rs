// src/message.rs
use serde_json::{Value, json};

/// Terminator frame sent after every response.
pub const END_SENTINEL: &str = "[END]";

/// Prefix that turns an inbound frame into an image search.
pub const IMAGE_COMMAND_PREFIX: &str = "/image ";

pub const NO_IMAGES_FOUND: &str = "no images found";

pub const BINARY_NOT_UTF8: &str = "binary frame is not valid UTF-8 text";

/// Structured payloads, sent as `{"type": ..., ...}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope {
    Image { url: String, query: String },
    Error { message: String },
}

impl Envelope {
    pub fn error(message: impl Into<String>) -> Self {
        Envelope::Error { message: message.into() }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Envelope::Image { url, query } => json!({ "type": "image", "url": url, "query": query }),
            Envelope::Error { message } => json!({ "type": "error", "message": message }),
        }
    }
}

/// One outbound frame.
///
/// Chat replies go out as raw text, image and error results as JSON
/// objects, and every response ends with [`Outbound::End`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Structured(Envelope),
    Text(String),
    End,
}

impl Outbound {
    pub fn into_frame(self) -> String {
        match self {
            Outbound::Structured(envelope) => envelope.to_json().to_string(),
            Outbound::Text(text) => text,
            Outbound::End => END_SENTINEL.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Outbound::Structured(Envelope::Error { .. }))
    }
}
