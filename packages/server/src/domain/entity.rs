//! Domain entities.

use super::value_object::{MessageText, Password, RoomName, Timestamp, Username};

/// Registered user; immutable after creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: Username,
    pub password: Password,
}

impl User {
    pub fn new(username: Username, password: Password) -> Self {
        Self { username, password }
    }
}

/// Chat room; immutable after creation. Membership is tracked by the room registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub name: RoomName,
    pub created_by: Username,
    pub created_at: Timestamp,
}

impl Room {
    pub fn new(name: RoomName, created_by: Username, created_at: Timestamp) -> Self {
        Self {
            name,
            created_by,
            created_at,
        }
    }
}

/// A message published to a room. Never stored after fan-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub timestamp: Timestamp,
    pub room: RoomName,
    pub from: Username,
    pub text: MessageText,
}

impl ChatMessage {
    pub fn new(timestamp: Timestamp, room: RoomName, from: Username, text: MessageText) -> Self {
        Self {
            timestamp,
            room,
            from,
            text,
        }
    }
}

/// Login session bound to a token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: Username,
    pub issued_at: Timestamp,
    pub last_access: Timestamp,
}

impl Session {
    pub fn new(user: Username, issued_at: Timestamp) -> Self {
        Self {
            user,
            issued_at,
            last_access: issued_at,
        }
    }

    /// A session expires once `inactivity_millis` have passed since its last access.
    pub fn is_expired(&self, now: Timestamp, inactivity_millis: i64) -> bool {
        self.last_access.elapsed_until(now) >= inactivity_millis
    }

    pub fn touch(&mut self, now: Timestamp) {
        if now > self.last_access {
            self.last_access = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Username {
        Username::new("alice".to_string()).unwrap()
    }

    #[test]
    fn test_session_expires_after_inactivity_window() {
        // テスト項目: 最終アクセスから非アクティブ期間が経過するとセッションは期限切れになる
        // given (前提条件):
        let session = Session::new(alice(), Timestamp::new(1_000));

        // when (操作) / then (期待する結果):
        assert!(!session.is_expired(Timestamp::new(1_999), 1_000));
        assert!(session.is_expired(Timestamp::new(2_000), 1_000));
    }

    #[test]
    fn test_touch_extends_session() {
        // テスト項目: touch すると非アクティブ期間が最終アクセスから再計算される
        // given (前提条件):
        let mut session = Session::new(alice(), Timestamp::new(1_000));

        // when (操作):
        session.touch(Timestamp::new(1_800));

        // then (期待する結果):
        assert_eq!(session.issued_at, Timestamp::new(1_000));
        assert!(!session.is_expired(Timestamp::new(2_500), 1_000));
    }

    #[test]
    fn test_touch_never_moves_backwards() {
        // テスト項目: 過去の時刻で touch しても最終アクセスは巻き戻らない
        // given (前提条件):
        let mut session = Session::new(alice(), Timestamp::new(5_000));

        // when (操作):
        session.touch(Timestamp::new(4_000));

        // then (期待する結果):
        assert_eq!(session.last_access, Timestamp::new(5_000));
    }
}
