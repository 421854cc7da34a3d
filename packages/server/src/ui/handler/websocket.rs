//! WebSocket message stream handler.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use tsudoi_shared::protocol::{MessageEvent, Operation, StreamFrame};

use crate::{
    domain::{ChatMessage, Token},
    ui::state::AppState,
    usecase::MessageStream,
};

use super::response::error_dto;

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct StreamQuery {
    #[serde(default)]
    pub token: String,
}

/// `GET /ws?token=...`
///
/// The upgrade is always accepted. An invalid token is reported as a single
/// error frame after which the server closes the socket. The token is checked
/// before the handshake; the subscription is only registered once the socket
/// is upgraded, so a failed handshake leaves the user's current stream intact.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<StreamQuery>,
) -> impl IntoResponse {
    let token = Token::new(query.token);
    let user = state.facade.authenticate(&token).await;

    ws.on_upgrade(move |socket| async move {
        match user {
            Ok(user) => {
                let stream = state.facade.subscribe(user);
                handle_socket(socket, stream).await
            }
            Err(error) => {
                tracing::warn!("Rejected message stream: {}", error);
                let frame = StreamFrame::Error(error_dto(Operation::GetMessages, &error));
                reject_socket(socket, &frame).await;
            }
        }
    })
}

async fn reject_socket(mut socket: WebSocket, frame: &StreamFrame) {
    match serde_json::to_string(frame) {
        Ok(json) => {
            if let Err(e) = socket.send(Message::Text(json.into())).await {
                tracing::debug!("Failed to send error frame: {}", e);
            }
        }
        Err(e) => tracing::error!("Failed to serialize error frame: {}", e),
    }
    let _ = socket.send(Message::Close(None)).await;
}

/// Spawns a task that drains the subscriber queue into the WebSocket sender.
///
/// The task ends when the queue closes (subscription replaced) or the socket
/// can no longer be written to.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<ChatMessage>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            let frame = StreamFrame::Message(MessageEvent::from(message));
            let json = match serde_json::to_string(&frame) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize message frame: {}", e);
                    continue;
                }
            };
            if sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
        // 購読が置き換えられた場合はこちらから閉じる
        let _ = sender.send(Message::Close(None)).await;
    })
}

async fn handle_socket(socket: WebSocket, stream: MessageStream) {
    let (subscription, rx) = stream.into_parts();
    let user = subscription.user().clone();
    tracing::info!("Message stream opened for '{}'", user);

    let (sender, mut receiver) = socket.split();

    // クライアントからのフレームは Close の検出にだけ使う
    let user_for_recv = user.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Close(_)) => {
                    tracing::info!("'{}' closed the message stream", user_for_recv);
                    break;
                }
                Ok(Message::Ping(_)) => {
                    tracing::debug!("Received ping");
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("WebSocket error: {}", e);
                    break;
                }
            }
        }
    });

    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    if subscription.cancel() {
        tracing::info!("Message stream closed for '{}'", user);
    } else {
        tracing::info!("Message stream of '{}' ended after being replaced", user);
    }
}
