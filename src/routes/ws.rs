// src/routes/ws.rs

use axum::{
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use crate::message::{BINARY_NOT_UTF8, Outbound};
use crate::services::chatbot::{reject_message, route_message};
use crate::state::SharedState;

/// Upgrade any request on an unrouted path into a chat connection.
pub async fn ws_handler(State(state): State<SharedState>, ws: WebSocketUpgrade) -> Response {
    let conn_id = Uuid::new_v4();
    ws.on_upgrade(move |socket| {
        handle_socket(socket, state).instrument(info_span!("connection", id = %conn_id))
    })
}

/// Per-connection loop: each data frame is answered completely, sentinel
/// included, before the next frame is read.
pub async fn handle_socket(mut socket: WebSocket, state: SharedState) {
    info!("client connected");
    state.metrics.connection_opened().await;

    while let Some(msg) = socket.recv().await {
        let frames = match msg {
            Ok(Message::Text(text)) => {
                info!(text = %text.as_str(), "received message");
                route_message(&state, text.as_str()).await
            }
            Ok(Message::Binary(bytes)) => match std::str::from_utf8(&bytes) {
                Ok(text) => {
                    info!(text, "received binary message");
                    route_message(&state, text).await
                }
                Err(e) => {
                    warn!(error = %e, len = bytes.len(), "binary frame is not UTF-8");
                    reject_message(&state, BINARY_NOT_UTF8).await
                }
            },
            Ok(Message::Close(_)) => break,
            // Ping/pong replies are sent by the transport.
            Ok(_) => continue,
            Err(e) => {
                warn!(error = %e, "websocket receive failed");
                break;
            }
        };

        if let Err(e) = send_all(&mut socket, frames).await {
            warn!(error = %e, "websocket send failed");
            break;
        }
    }

    state.metrics.connection_closed().await;
    info!("client disconnected");
}

async fn send_all(socket: &mut WebSocket, frames: Vec<Outbound>) -> Result<(), axum::Error> {
    for outbound in frames {
        socket.send(Message::Text(outbound.into_frame().into())).await?;
    }
    Ok(())
}
