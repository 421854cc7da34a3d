//! Error kinds and numeric result codes.
//!
//! Numeric codes are scoped per operation: `1` means "the first thing that can
//! go wrong for this call", so the same number carries different meanings
//! depending on the [`Operation`]. [`INVALID_TOKEN`] and [`INVALID_INPUT`] are
//! shared by all operations.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const SUCCESS: u16 = 0;
pub const INVALID_TOKEN: u16 = 999;
pub const INVALID_INPUT: u16 = 400;

/// Operations exposed by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    Register,
    Login,
    Logout,
    CreateRoom,
    ListRooms,
    ListUserRooms,
    JoinRoom,
    LeaveRoom,
    ListUsersInRoom,
    SendMessage,
    GetMessages,
}

/// Every failure a client can observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    InvalidToken,
    InvalidCredentials,
    UsernameAlreadyExists,
    RoomAlreadyExists,
    RoomNotFound,
    AlreadyInRoom,
    NotInRoom,
    InvalidInput,
}

impl ErrorKind {
    /// Numeric code of this error for the given operation.
    pub fn code(self, operation: Operation) -> u16 {
        match (self, operation) {
            (ErrorKind::InvalidToken, _) => INVALID_TOKEN,
            (ErrorKind::InvalidInput, _) => INVALID_INPUT,
            (ErrorKind::RoomNotFound, Operation::JoinRoom | Operation::LeaveRoom) => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidToken => "INVALID_TOKEN",
            ErrorKind::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorKind::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",
            ErrorKind::RoomAlreadyExists => "ROOM_ALREADY_EXISTS",
            ErrorKind::RoomNotFound => "ROOM_NOT_FOUND",
            ErrorKind::AlreadyInRoom => "ALREADY_IN_ROOM",
            ErrorKind::NotInRoom => "NOT_IN_ROOM",
            ErrorKind::InvalidInput => "INVALID_INPUT",
        };
        f.write_str(name)
    }
}

/// Error payload carried by a failed response or stream frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDto {
    pub kind: ErrorKind,
    pub code: u16,
    pub message: String,
}

impl ErrorDto {
    pub fn new(kind: ErrorKind, operation: Operation, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: kind.code(operation),
            message: message.into(),
        }
    }
}

impl fmt::Display for ErrorDto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.kind, self.code, self.message)
    }
}
