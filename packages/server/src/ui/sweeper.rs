//! Periodic removal of expired sessions.
//!
//! Token validation evicts expired sessions lazily; the sweeper only bounds
//! the memory held by tokens that are never presented again.

use std::{sync::Arc, time::Duration};

use tokio::task::JoinHandle;

use crate::usecase::ChatFacade;

/// Spawn the sweep loop. The first sweep runs one full interval after start.
pub fn spawn_session_sweeper(facade: Arc<ChatFacade>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let purged = facade.purge_expired_sessions().await;
            if purged > 0 {
                tracing::info!("Purged {} expired session(s)", purged);
            } else {
                tracing::debug!("No expired sessions to purge");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{SessionRepository, Username},
        infrastructure::{
            message_broadcaster::InMemoryMessageBroadcaster,
            repository::{InMemoryRoomRepository, InMemorySessionRepository, InMemoryUserRepository},
            token::RandomTokenGenerator,
        },
    };
    use tsudoi_shared::time::ManualClock;

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_purges_expired_sessions() {
        // テスト項目: 掃除タスクが期限切れのセッションを削除する
        // given (前提条件):
        let clock = Arc::new(ManualClock::new(0));
        let rooms = Arc::new(InMemoryRoomRepository::new());
        let sessions = Arc::new(InMemorySessionRepository::new(
            Arc::new(RandomTokenGenerator),
            clock.clone(),
            Duration::from_secs(600),
        ));
        let facade = Arc::new(ChatFacade::new(
            Arc::new(InMemoryUserRepository::new()),
            sessions.clone(),
            rooms.clone(),
            Arc::new(InMemoryMessageBroadcaster::new(rooms, clock.clone())),
            clock.clone(),
        ));
        sessions
            .issue(Username::new("alice".to_string()).unwrap())
            .await;
        clock.advance(600_000);

        // when (操作):
        let handle = spawn_session_sweeper(facade, Duration::from_secs(60));
        tokio::time::sleep(Duration::from_secs(61)).await;

        // then (期待する結果):
        assert!(sessions.is_empty());
        handle.abort();
    }
}
