//! Message formatting utilities for client display.

use tsudoi_shared::{
    protocol::{ErrorDto, MessageEvent, http::RoomDto},
    time::timestamp_to_jst_rfc3339,
};

const RULE: &str = "------------------------------------------------------------";
const DOUBLE_RULE: &str = "============================================================";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a chat message received from the stream
    pub fn format_chat_message(event: &MessageEvent) -> String {
        let timestamp_str = timestamp_to_jst_rfc3339(event.timestamp);
        format!(
            "\n\n{rule}\n[{}] @{}: {}\nsent at {}\n{rule}\n",
            event.room,
            event.from,
            event.text,
            timestamp_str,
            rule = RULE
        )
    }

    /// Format a confirmation message after sending
    ///
    /// # Arguments
    ///
    /// * `room` - The room the message was sent to
    /// * `sent_at` - Unix timestamp when the message was sent (milliseconds)
    pub fn format_sent_confirmation(room: &str, sent_at: i64) -> String {
        let timestamp_str = timestamp_to_jst_rfc3339(sent_at);
        format!("sent to {} at {}\n", room, timestamp_str)
    }

    /// Format the room listing
    pub fn format_rooms(rooms: &[RoomDto]) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n{}\nRooms:\n", DOUBLE_RULE));

        if rooms.is_empty() {
            output.push_str("(No rooms)\n");
        } else {
            for room in rooms {
                output.push_str(&format!(
                    "{} - created by {} at {}\n",
                    room.name, room.created_by, room.created_at
                ));
            }
        }

        output.push_str(DOUBLE_RULE);
        output.push('\n');
        output
    }

    /// Format a list of names under a title, marking the current user
    pub fn format_names(title: &str, names: &[String], me: &str) -> String {
        let mut output = format!("\n{}:\n", title);
        if names.is_empty() {
            output.push_str("(None)\n");
        }
        for name in names {
            let me_suffix = if name == me { " (me)" } else { "" };
            output.push_str(&format!("  {}{}\n", name, me_suffix));
        }
        output
    }

    /// Format an error returned by the server
    pub fn format_error(error: &ErrorDto) -> String {
        format!("\n! {} (code {}): {}\n", error.kind, error.code, error.message)
    }

    pub fn format_help() -> String {
        [
            "",
            "Commands:",
            "  /create <room>       create a room and join it",
            "  /join <room>         join a room",
            "  /leave <room>        leave a room",
            "  /rooms               list all rooms",
            "  /myrooms             list the rooms you are in",
            "  /members <room>      list the members of a room",
            "  /use <room>          send plain lines to <room>",
            "  /send <room> <text>  send a message to <room>",
            "  /help                show this help",
            "  /quit                exit",
            "",
        ]
        .join("\n")
    }

    /// Format a binary message notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n← Received {} bytes of binary data\n", byte_count)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}
