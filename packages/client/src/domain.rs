//! Reconnection policy for the message stream.
//!
//! Pure functions, kept apart from the I/O so they are easy to test.

use tsudoi_shared::protocol::ErrorKind;

use crate::error::ClientError;

/// Check if the stream should not be reopened after this error.
///
/// An invalid token will not become valid by retrying.
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(error.kind(), Some(ErrorKind::InvalidToken))
        || matches!(error, ClientError::NotLoggedIn)
}

/// Check if the client should attempt to reopen the stream.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    // Don't reconnect if the error requires immediate exit
    if should_exit_immediately(error) {
        return false;
    }

    // Don't reconnect if we've exhausted all attempts
    current_attempt < max_attempts
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsudoi_shared::protocol::{ErrorDto, Operation};

    fn invalid_token() -> ClientError {
        ClientError::Api(ErrorDto::new(
            ErrorKind::InvalidToken,
            Operation::GetMessages,
            "invalid or expired token",
        ))
    }

    #[test]
    fn test_should_exit_immediately_with_invalid_token() {
        // テスト項目: InvalidToken の場合、即座に終了すべきと判定される
        // given (前提条件):
        let error = invalid_token();

        // when (操作):
        let result = should_exit_immediately(&error);

        // then (期待する結果):
        assert!(result);
    }

    #[test]
    fn test_should_exit_immediately_with_connection_error() {
        // テスト項目: ConnectionError の場合、即座に終了すべきではないと判定される
        // given (前提条件):
        let error = ClientError::ConnectionError("network error".to_string());

        // when (操作):
        let result = should_exit_immediately(&error);

        // then (期待する結果):
        assert!(!result);
    }

    #[test]
    fn test_should_attempt_reconnect_with_invalid_token() {
        // テスト項目: InvalidToken の場合、再接続すべきではないと判定される
        // given (前提条件):
        let error = invalid_token();

        // when (操作):
        let result = should_attempt_reconnect(&error, 0, 5);

        // then (期待する結果):
        assert!(!result);
    }

    #[test]
    fn test_should_attempt_reconnect_within_limit() {
        // テスト項目: 再接続回数が上限未満の場合、再接続すべきと判定される
        // given (前提条件):
        let error = ClientError::ConnectionError("network error".to_string());

        // when (操作):
        let result = should_attempt_reconnect(&error, 3, 5);

        // then (期待する結果):
        assert!(result);
    }

    #[test]
    fn test_should_attempt_reconnect_at_limit() {
        // テスト項目: 再接続回数が上限に達した場合、再接続すべきではないと判定される
        // given (前提条件):
        let error = ClientError::ConnectionError("network error".to_string());

        // when (操作):
        let result = should_attempt_reconnect(&error, 5, 5);

        // then (期待する結果):
        assert!(!result);
    }
}
