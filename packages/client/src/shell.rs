//! Execution of interactive commands against the API.

use tsudoi_shared::protocol::ErrorKind;

use crate::{api::ApiClient, command::Command, error::ClientError};

use super::formatter::MessageFormatter;

/// What the caller should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print this text and read the next line
    Output(String),
    Quit,
}

/// Interactive session state: the API client and the current room
pub struct Shell {
    api: ApiClient,
    username: String,
    current_room: Option<String>,
}

impl Shell {
    /// `api` must already be logged in
    pub fn new(api: ApiClient, username: String) -> Self {
        Self {
            api,
            username,
            current_room: None,
        }
    }

    pub fn current_room(&self) -> Option<&str> {
        self.current_room.as_deref()
    }

    pub fn api_mut(&mut self) -> &mut ApiClient {
        &mut self.api
    }

    pub async fn execute(&mut self, command: Command) -> Result<Reply, ClientError> {
        let output = match command {
            Command::Create(name) => {
                let room = self.api.create_room(&name).await?;
                let output = format!("created room '{}' (now current)\n", room.name);
                self.current_room = Some(room.name);
                output
            }
            Command::Join(name) => {
                self.api.join_room(&name).await?;
                let output = format!("joined '{}' (now current)\n", name);
                self.current_room = Some(name);
                output
            }
            Command::Leave(name) => {
                self.api.leave_room(&name).await?;
                if self.current_room.as_deref() == Some(name.as_str()) {
                    self.current_room = None;
                }
                format!("left '{}'\n", name)
            }
            Command::Rooms => MessageFormatter::format_rooms(&self.api.list_rooms().await?),
            Command::MyRooms => {
                let rooms = self.api.list_user_rooms().await?;
                let current = self.current_room.clone().unwrap_or_default();
                MessageFormatter::format_names("Your rooms", &rooms, &current)
            }
            Command::Members(name) => {
                let members = self.api.list_room_members(&name).await?;
                MessageFormatter::format_names(
                    &format!("Members of {}", name),
                    &members,
                    &self.username,
                )
            }
            Command::Use(name) => {
                let output = format!("now sending to '{}'\n", name);
                self.current_room = Some(name);
                output
            }
            Command::Send { room, text } => self.send(&room, &text).await?,
            Command::Say(text) => {
                if text.is_empty() {
                    return Ok(Reply::Output(String::new()));
                }
                let room = self.current_room.clone().ok_or_else(|| {
                    ClientError::InvalidCommand(
                        "no current room; use /join <room> or /use <room>".to_string(),
                    )
                })?;
                self.send(&room, &text).await?
            }
            Command::Help => MessageFormatter::format_help(),
            Command::Quit => return Ok(Reply::Quit),
        };
        Ok(Reply::Output(output))
    }

    async fn send(&self, room: &str, text: &str) -> Result<String, ClientError> {
        let sent = self.api.send_message(room, text).await?;
        Ok(MessageFormatter::format_sent_confirmation(&sent.room, sent.timestamp))
    }
}

/// Registration failures that still allow logging in
pub fn is_already_registered(error: &ClientError) -> bool {
    error.kind() == Some(ErrorKind::UsernameAlreadyExists)
}
