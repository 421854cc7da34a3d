//! Parsing of interactive input lines.

use crate::error::ClientError;

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Create(String),
    Join(String),
    Leave(String),
    Rooms,
    MyRooms,
    Members(String),
    /// Select the room plain lines are sent to
    Use(String),
    Send { room: String, text: String },
    /// Plain line for the current room
    Say(String),
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, ClientError> {
        let line = line.trim();
        let Some(rest) = line.strip_prefix('/') else {
            return Ok(Command::Say(line.to_string()));
        };

        let (name, argument) = match rest.split_once(char::is_whitespace) {
            Some((name, argument)) => (name, argument.trim()),
            None => (rest, ""),
        };

        match name {
            "create" => Ok(Command::Create(required(name, argument)?)),
            "join" => Ok(Command::Join(required(name, argument)?)),
            "leave" => Ok(Command::Leave(required(name, argument)?)),
            "rooms" => Ok(Command::Rooms),
            "myrooms" => Ok(Command::MyRooms),
            "members" => Ok(Command::Members(required(name, argument)?)),
            "use" => Ok(Command::Use(required(name, argument)?)),
            "send" => match argument.split_once(char::is_whitespace) {
                Some((room, text)) if !text.trim().is_empty() => Ok(Command::Send {
                    room: room.to_string(),
                    text: text.trim().to_string(),
                }),
                _ => Err(ClientError::InvalidCommand(
                    "usage: /send <room> <text>".to_string(),
                )),
            },
            "help" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(ClientError::InvalidCommand(format!(
                "unknown command '/{}' (try /help)",
                other
            ))),
        }
    }
}

fn required(name: &str, argument: &str) -> Result<String, ClientError> {
    if argument.is_empty() {
        return Err(ClientError::InvalidCommand(format!("usage: /{} <room>", name)));
    }
    Ok(argument.to_string())
}
