//! Error types for the chat client.

use thiserror::Error;
use tsudoi_shared::protocol::{ErrorDto, ErrorKind};

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a failed response
    #[error("{0}")]
    Api(ErrorDto),

    /// The operation needs a token but the client has not logged in
    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// The server answered with something that is not an API response
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

impl ClientError {
    /// Error kind reported by the server, if any
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ClientError::Api(dto) => Some(dto.kind),
            _ => None,
        }
    }
}
