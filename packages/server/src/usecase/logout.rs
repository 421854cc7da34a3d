//! UseCase: ログアウト

use std::sync::Arc;

use crate::domain::{SessionRepository, Token};

use super::error::ChatError;

/// ログアウト（トークンの即時失効）のユースケース
pub struct LogoutUseCase {
    sessions: Arc<dyn SessionRepository>,
}

impl LogoutUseCase {
    pub fn new(sessions: Arc<dyn SessionRepository>) -> Self {
        Self { sessions }
    }

    /// トークンを失効させる。未知または期限切れのトークンは `InvalidToken`
    pub async fn execute(&self, token: &Token) -> Result<(), ChatError> {
        let Some(user) = self.sessions.validate(token).await else {
            return Err(ChatError::InvalidToken);
        };
        if !self.sessions.revoke(token).await {
            // validate と revoke の間に期限切れ掃除で消えた
            return Err(ChatError::InvalidToken);
        }
        tracing::info!("'{}' logged out ({})", user, token.redacted());
        Ok(())
    }
}
