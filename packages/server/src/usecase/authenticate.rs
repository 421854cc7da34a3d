//! UseCase: トークン検証
//!
//! 認証が必要な全ての操作は最初にこのユースケースを通り、
//! トークンをユーザー名に解決します。

use std::sync::Arc;

use crate::domain::{SessionRepository, Token, Username};

use super::error::ChatError;

/// トークン検証のユースケース
pub struct AuthenticateUseCase {
    sessions: Arc<dyn SessionRepository>,
}

impl AuthenticateUseCase {
    pub fn new(sessions: Arc<dyn SessionRepository>) -> Self {
        Self { sessions }
    }

    /// トークンを検証し、紐付くユーザー名を返す
    ///
    /// 有効なトークンであれば Session Store 側で最終アクセス時刻が更新される。
    pub async fn execute(&self, token: &Token) -> Result<Username, ChatError> {
        match self.sessions.validate(token).await {
            Some(user) => Ok(user),
            None => {
                tracing::warn!("Rejected token {}", token.redacted());
                Err(ChatError::InvalidToken)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MockSessionRepository;

    fn alice() -> Username {
        Username::new("alice".to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_valid_token_resolves_to_user() {
        // テスト項目: 有効なトークンはユーザー名に解決される
        // given (前提条件):
        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_validate()
            .withf(|token| token.as_str() == "token-1")
            .times(1)
            .returning(|_| Some(alice()));
        let usecase = AuthenticateUseCase::new(Arc::new(sessions));

        // when (操作):
        let result = usecase.execute(&Token::new("token-1")).await;

        // then (期待する結果):
        assert_eq!(result, Ok(alice()));
    }

    #[tokio::test]
    async fn test_unknown_token_is_rejected() {
        // テスト項目: 未知または期限切れのトークンは InvalidToken になる
        // given (前提条件):
        let mut sessions = MockSessionRepository::new();
        sessions.expect_validate().returning(|_| None);
        let usecase = AuthenticateUseCase::new(Arc::new(sessions));

        // when (操作):
        let result = usecase.execute(&Token::new("expired")).await;

        // then (期待する結果):
        assert_eq!(result, Err(ChatError::InvalidToken));
    }
}
