//! Domain error types.

use thiserror::Error;

/// Value object construction failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("username must not be empty")]
    EmptyUsername,

    #[error("username must be at most {max} characters")]
    UsernameTooLong { max: usize },

    #[error("username must not contain whitespace or control characters")]
    InvalidUsernameCharacter,

    #[error("password must not be empty")]
    EmptyPassword,

    #[error("room name must not be empty")]
    EmptyRoomName,

    #[error("room name must be at most {max} characters")]
    RoomNameTooLong { max: usize },

    #[error("room name must not contain control characters")]
    InvalidRoomNameCharacter,

    #[error("message must not be empty")]
    EmptyMessage,

    #[error("message must be at most {max} characters")]
    MessageTooLong { max: usize },
}

/// Repository operation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("username '{0}' already exists")]
    UsernameAlreadyExists(String),

    #[error("room '{0}' already exists")]
    RoomAlreadyExists(String),

    #[error("room '{0}' not found")]
    RoomNotFound(String),
}

/// Failure to hand a message to a subscriber
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// The receiving side of the subscriber is gone
    #[error("subscriber channel closed")]
    Closed,

    #[error("subscriber rejected message: {0}")]
    Rejected(String),
}
