//! InMemory Session Repository 実装
//!
//! トークンと最終アクセス時刻を保持し、検証時に期限切れを判定します（遅延削除）。
//! 定期的な一括削除は `purge_expired` で行います。

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use dashmap::{DashMap, mapref::entry::Entry};
use tsudoi_shared::time::Clock;

use crate::domain::{Session, SessionRepository, Timestamp, Token, TokenGenerator, Username};

/// Inactivity window used when none is configured (10 minutes)
pub const DEFAULT_SESSION_TIMEOUT: Duration = Duration::from_secs(10 * 60);

/// インメモリ Session Repository 実装
pub struct InMemorySessionRepository {
    /// Key: トークン, Value: セッション
    sessions: DashMap<Token, Session>,
    generator: Arc<dyn TokenGenerator>,
    clock: Arc<dyn Clock>,
    /// 非アクティブ期間（ミリ秒）
    inactivity_millis: i64,
}

impl InMemorySessionRepository {
    pub fn new(
        generator: Arc<dyn TokenGenerator>,
        clock: Arc<dyn Clock>,
        inactivity_timeout: Duration,
    ) -> Self {
        Self {
            sessions: DashMap::new(),
            generator,
            clock,
            inactivity_millis: i64::try_from(inactivity_timeout.as_millis()).unwrap_or(i64::MAX),
        }
    }

    fn now(&self) -> Timestamp {
        Timestamp::new(self.clock.now_millis())
    }

    /// Number of stored sessions, expired ones included until they are evicted
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn issue(&self, user: Username) -> Token {
        let now = self.now();
        loop {
            let token = self.generator.generate();
            if let Entry::Vacant(slot) = self.sessions.entry(token.clone()) {
                slot.insert(Session::new(user, now));
                return token;
            }
            tracing::warn!("Generated token collided with a live session, retrying");
        }
    }

    async fn validate(&self, token: &Token) -> Option<Username> {
        let now = self.now();
        {
            // get_mut はエントリ単位の排他ロックを取るため、最終アクセス時刻の更新は競合しない
            let mut session = self.sessions.get_mut(token)?;
            if !session.is_expired(now, self.inactivity_millis) {
                session.touch(now);
                return Some(session.user.clone());
            }
        }

        // 期限切れ: 別の呼び出しが更新していない場合のみ削除する
        if self
            .sessions
            .remove_if(token, |_, session| {
                session.is_expired(now, self.inactivity_millis)
            })
            .is_some()
        {
            tracing::debug!("Session {} expired and was evicted", token.redacted());
        }
        None
    }

    async fn revoke(&self, token: &Token) -> bool {
        self.sessions.remove(token).is_some()
    }

    async fn purge_expired(&self) -> usize {
        let now = self.now();
        let mut purged = 0;
        self.sessions.retain(|_, session| {
            let expired = session.is_expired(now, self.inactivity_millis);
            if expired {
                purged += 1;
            }
            !expired
        });
        purged
    }
}

#[cfg(test)]
mod tests {
    use tsudoi_shared::time::ManualClock;

    use super::*;
    use crate::infrastructure::token::RandomTokenGenerator;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - トークン発行直後の検証
    // - 非アクティブ期間経過後の失効と、アクセスによる延長
    // - ログアウト（revoke）と一括削除（purge_expired）
    //
    // 【どのようなシナリオをテストするか】
    // 1. 発行直後は発行元ユーザーとして検証される
    // 2. 期間内にアクセスがあれば延長される
    // 3. 期間経過後は失効し、以後も無効のまま
    // 4. 不明なトークンは無効
    // ========================================

    const TIMEOUT: Duration = Duration::from_secs(600);

    fn create_test_repository() -> (InMemorySessionRepository, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(1_000_000));
        let repo =
            InMemorySessionRepository::new(Arc::new(RandomTokenGenerator), clock.clone(), TIMEOUT);
        (repo, clock)
    }

    fn alice() -> Username {
        Username::new("alice".to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_issued_token_validates_to_user() {
        // テスト項目: 発行したトークンは直後に発行元ユーザーとして検証される
        // given (前提条件):
        let (repo, _clock) = create_test_repository();

        // when (操作):
        let token = repo.issue(alice()).await;

        // then (期待する結果):
        assert_eq!(repo.validate(&token).await, Some(alice()));
    }

    #[tokio::test]
    async fn test_token_expires_after_inactivity() {
        // テスト項目: 非アクティブ期間が経過したトークンは無効になり、以後も無効のまま
        // given (前提条件):
        let (repo, clock) = create_test_repository();
        let token = repo.issue(alice()).await;

        // when (操作):
        clock.advance(TIMEOUT.as_millis() as i64);

        // then (期待する結果):
        assert_eq!(repo.validate(&token).await, None);
        assert!(repo.is_empty());
        clock.set(1_000_000);
        assert_eq!(repo.validate(&token).await, None);
    }

    #[tokio::test]
    async fn test_validation_refreshes_inactivity_window() {
        // テスト項目: 期間内に検証されると非アクティブ期間が延長される
        // given (前提条件):
        let (repo, clock) = create_test_repository();
        let token = repo.issue(alice()).await;
        let almost = TIMEOUT.as_millis() as i64 - 1;

        // when (操作):
        clock.advance(almost);
        let first = repo.validate(&token).await;
        clock.advance(almost);
        let second = repo.validate(&token).await;

        // then (期待する結果):
        assert_eq!(first, Some(alice()));
        assert_eq!(second, Some(alice()));
    }

    #[tokio::test]
    async fn test_unknown_token_is_invalid() {
        // テスト項目: 発行していないトークンは無効
        // given (前提条件):
        let (repo, _clock) = create_test_repository();

        // when (操作):
        let result = repo.validate(&Token::new("not-a-token")).await;

        // then (期待する結果):
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_revoke_invalidates_token() {
        // テスト項目: revoke したトークンは即座に無効になる
        // given (前提条件):
        let (repo, _clock) = create_test_repository();
        let token = repo.issue(alice()).await;

        // when (操作):
        let revoked = repo.revoke(&token).await;

        // then (期待する結果):
        assert!(revoked);
        assert_eq!(repo.validate(&token).await, None);
        assert!(!repo.revoke(&token).await);
    }

    #[tokio::test]
    async fn test_each_login_gets_distinct_token() {
        // テスト項目: 同じユーザーでもログインごとに別のトークンが発行される
        // given (前提条件):
        let (repo, _clock) = create_test_repository();

        // when (操作):
        let first = repo.issue(alice()).await;
        let second = repo.issue(alice()).await;

        // then (期待する結果):
        assert_ne!(first, second);
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn test_purge_expired_removes_only_expired_sessions() {
        // テスト項目: purge_expired は期限切れのセッションだけを削除する
        // given (前提条件):
        let (repo, clock) = create_test_repository();
        let old = repo.issue(alice()).await;
        clock.advance(TIMEOUT.as_millis() as i64 / 2);
        let fresh = repo.issue(Username::new("bob".to_string()).unwrap()).await;
        clock.advance(TIMEOUT.as_millis() as i64 / 2);

        // when (操作):
        let purged = repo.purge_expired().await;

        // then (期待する結果):
        assert_eq!(purged, 1);
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.validate(&old).await, None);
        assert!(repo.validate(&fresh).await.is_some());
    }
}
