//! HTTP API request and response DTOs.

use serde::{Deserialize, Serialize};

use super::error::ErrorDto;

/// Uniform response envelope for every API call.
///
/// `success` is always present; `error` is set on failure, `payload` on
/// success for operations that return data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(payload: Option<T>) -> Self {
        Self {
            success: true,
            error: None,
            payload,
        }
    }

    pub fn failure(error: ErrorDto) -> Self {
        Self {
            success: false,
            error: Some(error),
            payload: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRoomRequest {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}

/// Room summary returned by the room listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDto {
    pub name: String,
    pub created_by: String,
    /// Creation time in JST RFC 3339 format
    pub created_at: String,
}

/// Payload of a successful send
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentMessageDto {
    pub room: String,
    pub timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{ErrorKind, Operation};

    #[test]
    fn test_success_without_payload_omits_optional_fields() {
        // テスト項目: ペイロードなしの成功レスポンスは success のみを含む
        // given (前提条件):
        let response: ApiResponse<()> = ApiResponse::ok(None);

        // when (操作):
        let json = serde_json::to_string(&response).unwrap();

        // then (期待する結果):
        assert_eq!(json, r#"{"success":true}"#);
    }

    #[test]
    fn test_failure_response_round_trips() {
        // テスト項目: 失敗レスポンスがエラー種別とコードを保持したままデシリアライズできる
        // given (前提条件):
        let response: ApiResponse<Vec<String>> = ApiResponse::failure(ErrorDto::new(
            ErrorKind::RoomNotFound,
            Operation::JoinRoom,
            "room 'lobby' not found",
        ));

        // when (操作):
        let json = serde_json::to_string(&response).unwrap();
        let decoded: ApiResponse<Vec<String>> = serde_json::from_str(&json).unwrap();

        // then (期待する結果):
        assert!(!decoded.success);
        assert_eq!(decoded.payload, None);
        let error = decoded.error.unwrap();
        assert_eq!(error.kind, ErrorKind::RoomNotFound);
        assert_eq!(error.code, 2);
    }
}
