//! UseCase: ユーザー登録

use std::sync::Arc;

use crate::domain::{Password, User, UserRepository, Username};

use super::error::ChatError;

/// ユーザー登録のユースケース
pub struct RegisterUserUseCase {
    users: Arc<dyn UserRepository>,
}

impl RegisterUserUseCase {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// ユーザー名とパスワードを検証して登録する
    ///
    /// 形式が不正な入力は `InvalidInput`、既存のユーザー名は `UsernameAlreadyExists`。
    pub async fn execute(&self, username: String, password: String) -> Result<Username, ChatError> {
        let username = Username::new(username)?;
        let password = Password::new(password)?;

        let user = self.users.register(User::new(username, password)).await?;
        tracing::info!("User '{}' registered", user.username);
        Ok(user.username)
    }
}
