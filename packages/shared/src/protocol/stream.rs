//! Frames pushed to clients over the WebSocket message stream.

use serde::{Deserialize, Serialize};

use super::error::ErrorDto;

/// A chat message delivered to a subscriber
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEvent {
    /// Unix timestamp when the message was sent (milliseconds)
    pub timestamp: i64,
    pub room: String,
    pub from: String,
    pub text: String,
}

/// Text frame sent by the server on the message stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum StreamFrame {
    Message(MessageEvent),
    Error(ErrorDto),
}
