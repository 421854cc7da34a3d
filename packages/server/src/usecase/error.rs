//! UseCase 層のエラー型

use thiserror::Error;
use tsudoi_shared::protocol::ErrorKind;

use crate::domain::{RepositoryError, ValidationError};

/// Failure of a chat operation. Every variant is an expected, recoverable outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("invalid or expired token")]
    InvalidToken,

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("username '{0}' already exists")]
    UsernameAlreadyExists(String),

    #[error("room '{0}' already exists")]
    RoomAlreadyExists(String),

    #[error("room '{0}' not found")]
    RoomNotFound(String),

    #[error("already in room '{0}'")]
    AlreadyInRoom(String),

    #[error("not in room '{0}'")]
    NotInRoom(String),

    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationError),
}

impl ChatError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ChatError::InvalidToken => ErrorKind::InvalidToken,
            ChatError::InvalidCredentials => ErrorKind::InvalidCredentials,
            ChatError::UsernameAlreadyExists(_) => ErrorKind::UsernameAlreadyExists,
            ChatError::RoomAlreadyExists(_) => ErrorKind::RoomAlreadyExists,
            ChatError::RoomNotFound(_) => ErrorKind::RoomNotFound,
            ChatError::AlreadyInRoom(_) => ErrorKind::AlreadyInRoom,
            ChatError::NotInRoom(_) => ErrorKind::NotInRoom,
            ChatError::InvalidInput(_) => ErrorKind::InvalidInput,
        }
    }
}

impl From<RepositoryError> for ChatError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::UsernameAlreadyExists(name) => ChatError::UsernameAlreadyExists(name),
            RepositoryError::RoomAlreadyExists(name) => ChatError::RoomAlreadyExists(name),
            RepositoryError::RoomNotFound(name) => ChatError::RoomNotFound(name),
        }
    }
}
