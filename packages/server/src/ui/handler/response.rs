//! Conversion of operation results into HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tsudoi_shared::protocol::{ApiResponse, ErrorDto, ErrorKind, Operation};

use crate::usecase::{ChatError, Outcome};

/// HTTP status that mirrors an error kind
pub fn status_of(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorKind::InvalidToken | ErrorKind::InvalidCredentials => StatusCode::UNAUTHORIZED,
        ErrorKind::RoomNotFound => StatusCode::NOT_FOUND,
        ErrorKind::UsernameAlreadyExists
        | ErrorKind::RoomAlreadyExists
        | ErrorKind::AlreadyInRoom
        | ErrorKind::NotInRoom => StatusCode::CONFLICT,
    }
}

pub fn error_dto(operation: Operation, error: &ChatError) -> ErrorDto {
    ErrorDto::new(error.kind(), operation, error.to_string())
}

/// Response of one API operation
pub struct ApiReply<T> {
    operation: Operation,
    outcome: Outcome<T>,
}

impl<T> ApiReply<T> {
    pub fn new(operation: Operation, result: Result<T, ChatError>) -> Self {
        Self {
            operation,
            outcome: Outcome::from(result),
        }
    }
}

impl ApiReply<()> {
    /// For operations without a payload
    pub fn empty(operation: Operation, result: Result<(), ChatError>) -> Self {
        Self::new(operation, result)
    }
}

impl<T: Serialize> IntoResponse for ApiReply<T> {
    fn into_response(self) -> Response {
        let Outcome {
            success,
            error,
            payload,
        } = self.outcome;

        match error {
            Some(error) if !success => {
                tracing::warn!("{:?} failed: {}", self.operation, error);
                let status = status_of(error.kind());
                let body = ApiResponse::<T>::failure(error_dto(self.operation, &error));
                (status, Json(body)).into_response()
            }
            _ => (StatusCode::OK, Json(ApiResponse::ok(payload))).into_response(),
        }
    }
}
