//! UseCase: ログイン

use std::sync::Arc;

use crate::domain::{Password, SessionRepository, Token, UserRepository, Username};

use super::error::ChatError;

/// ログインのユースケース
pub struct LoginUseCase {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionRepository>,
}

impl LoginUseCase {
    pub fn new(users: Arc<dyn UserRepository>, sessions: Arc<dyn SessionRepository>) -> Self {
        Self { users, sessions }
    }

    /// 認証情報を確認し、新しいトークンを発行する
    ///
    /// 形式として成立しないユーザー名・パスワードも、一致しない認証情報と同じく
    /// `InvalidCredentials` として扱う。
    pub async fn execute(&self, username: String, password: String) -> Result<Token, ChatError> {
        let (Ok(username), Ok(password)) = (Username::new(username), Password::new(password)) else {
            return Err(ChatError::InvalidCredentials);
        };

        if !self.users.check_credential(&username, &password).await {
            tracing::warn!("Login rejected for '{}'", username);
            return Err(ChatError::InvalidCredentials);
        }

        let token = self.sessions.issue(username.clone()).await;
        tracing::info!("'{}' logged in ({})", username, token.redacted());
        Ok(token)
    }
}
