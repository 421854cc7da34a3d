//! Conversion logic from domain entities to protocol DTOs.

use tsudoi_shared::{
    protocol::{
        MessageEvent,
        http::{RoomDto, SentMessageDto},
    },
    time::timestamp_to_jst_rfc3339,
};

use crate::domain::{ChatMessage, Room};

impl From<Room> for RoomDto {
    fn from(room: Room) -> Self {
        Self {
            name: room.name.into_string(),
            created_by: room.created_by.into_string(),
            created_at: timestamp_to_jst_rfc3339(room.created_at.value()),
        }
    }
}

impl From<ChatMessage> for MessageEvent {
    fn from(message: ChatMessage) -> Self {
        Self {
            timestamp: message.timestamp.value(),
            room: message.room.into_string(),
            from: message.from.into_string(),
            text: message.text.into_string(),
        }
    }
}

impl From<&ChatMessage> for SentMessageDto {
    fn from(message: &ChatMessage) -> Self {
        Self {
            room: message.room.as_str().to_string(),
            timestamp: message.timestamp.value(),
        }
    }
}
