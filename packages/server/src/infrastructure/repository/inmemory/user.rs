//! InMemory User Repository 実装

use async_trait::async_trait;
use dashmap::{DashMap, mapref::entry::Entry};

use crate::domain::{Password, RepositoryError, User, UserRepository, Username};

/// インメモリ User Repository 実装
///
/// ユーザーはプロセスの生存期間中保持され、削除されません。
#[derive(Default)]
pub struct InMemoryUserRepository {
    /// Key: ユーザー名, Value: ユーザー
    users: DashMap<Username, User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登録済みユーザー数
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.users.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn register(&self, user: User) -> Result<User, RepositoryError> {
        // entry はシャードの書き込みロックを保持するため、重複チェックと挿入が不可分になる
        match self.users.entry(user.username.clone()) {
            Entry::Occupied(_) => Err(RepositoryError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            )),
            Entry::Vacant(slot) => {
                slot.insert(user.clone());
                Ok(user)
            }
        }
    }

    async fn find(&self, username: &Username) -> Option<User> {
        self.users.get(username).map(|user| user.clone())
    }

    async fn check_credential(&self, username: &Username, password: &Password) -> bool {
        self.users
            .get(username)
            .is_some_and(|user| user.password.matches(password))
    }
}
