use tracing::{error, info, warn};

use crate::error::AppError;
use crate::message::{Envelope, IMAGE_COMMAND_PREFIX, NO_IMAGES_FOUND, Outbound};
use crate::services::image_search::ImageResult;
use crate::state::{AppState, SharedState};

#[derive(Debug, PartialEq, Eq)]
pub enum Intent<'a> {
    /// `/image <query>`. The query may be empty.
    ImageSearch(&'a str),
    Chat(&'a str),
}

impl Intent<'_> {
    pub fn label(&self) -> &'static str {
        match self {
            Intent::ImageSearch(_) => "image",
            Intent::Chat(_) => "chat",
        }
    }
}

/// Exact, case-sensitive prefix match.
pub fn detect_intent(msg: &str) -> Intent<'_> {
    match msg.strip_prefix(IMAGE_COMMAND_PREFIX) {
        Some(query) => Intent::ImageSearch(query),
        None => Intent::Chat(msg),
    }
}

/// Produce the single payload for one inbound message.
pub async fn generate_reply(state: &AppState, msg: &str) -> Result<Outbound, AppError> {
    let intent = detect_intent(msg);
    state.metrics.increment_intent(intent.label()).await;

    match intent {
        Intent::ImageSearch(query) => {
            info!(query, "searching images");
            let reply = match state.image_search.search_image(query).await? {
                ImageResult::Found(url) => Envelope::Image { url, query: query.to_string() },
                ImageResult::NotFound | ImageResult::Failed(_) => Envelope::error(NO_IMAGES_FOUND),
            };
            Ok(Outbound::Structured(reply))
        }
        Intent::Chat(prompt) => {
            info!("forwarding message to chat backend");
            Ok(Outbound::Text(state.chat.complete(prompt).await))
        }
    }
}

/// Route one inbound message to its frames: one payload, then the sentinel.
pub async fn route_message(state: &SharedState, msg: &str) -> Vec<Outbound> {
    let task_state = state.clone();
    let owned = msg.to_string();
    respond_with(state, async move { generate_reply(&task_state, &owned).await }).await
}

/// Answer a frame that cannot be routed, e.g. binary data that is not text.
pub async fn reject_message(state: &AppState, reason: &str) -> Vec<Outbound> {
    finish(state, Outbound::Structured(Envelope::error(reason))).await
}

/// Run `reply` in its own task and turn its result into frames.
///
/// A failure of any kind, panics included, still produces an `error`
/// payload instead of tearing down the socket.
pub async fn respond_with<F>(state: &AppState, reply: F) -> Vec<Outbound>
where
    F: Future<Output = Result<Outbound, AppError>> + Send + 'static,
{
    let result = tokio::spawn(reply).await.map_err(AppError::from).and_then(|reply| reply);

    let payload = match result {
        Ok(payload) => payload,
        Err(e) => {
            error!(error = %e, "failed to handle message");
            Outbound::Structured(Envelope::error(e.to_string()))
        }
    };
    finish(state, payload).await
}

async fn finish(state: &AppState, payload: Outbound) -> Vec<Outbound> {
    if payload.is_error() {
        warn!(?payload, "sending error payload");
        state.metrics.increment_errors().await;
    }

    vec![payload, Outbound::End]
}
