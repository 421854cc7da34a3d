//! WebSocket message stream session.

use futures_util::StreamExt;
use reqwest::Url;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};
use tsudoi_shared::protocol::StreamFrame;

use crate::error::ClientError;

use super::{formatter::MessageFormatter, ui::redisplay_prompt};

/// Read the message stream until it ends, printing every frame.
///
/// Always returns an error: the stream only ends when the server closes it,
/// the connection drops, or the server rejects the token.
pub async fn run_stream_session(url: &Url, username: &str) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url.as_str())
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Message stream connected");

    let (_write, mut read) = ws_stream.split();

    while let Some(message) = read.next().await {
        match message {
            Ok(Message::Text(text)) => match serde_json::from_str::<StreamFrame>(&text) {
                Ok(StreamFrame::Message(event)) => {
                    print!("{}", MessageFormatter::format_chat_message(&event));
                    redisplay_prompt(username);
                }
                Ok(StreamFrame::Error(error)) => {
                    return Err(ClientError::Api(error));
                }
                // If parsing fails, display as raw text
                Err(_) => {
                    print!("{}", MessageFormatter::format_raw_message(&text));
                    redisplay_prompt(username);
                }
            },
            Ok(Message::Binary(data)) => {
                print!("{}", MessageFormatter::format_binary_message(data.len()));
                redisplay_prompt(username);
            }
            Ok(Message::Close(_)) => {
                tracing::info!("Server closed the message stream");
                break;
            }
            Err(e) => {
                return Err(ClientError::ConnectionError(e.to_string()));
            }
            _ => {}
        }
    }

    Err(ClientError::ConnectionError(
        "Message stream closed".to_string(),
    ))
}
