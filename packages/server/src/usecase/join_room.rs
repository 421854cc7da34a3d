//! UseCase: ルーム参加

use std::sync::Arc;

use crate::domain::{RoomName, RoomRepository, Username};

use super::error::ChatError;

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    rooms: Arc<dyn RoomRepository>,
}

impl JoinRoomUseCase {
    pub fn new(rooms: Arc<dyn RoomRepository>) -> Self {
        Self { rooms }
    }

    /// ルームに参加する
    ///
    /// 既に参加済みなら `AlreadyInRoom`、ルームが存在しなければ `RoomNotFound`。
    /// 判定はこの順で行う。
    pub async fn execute(&self, user: &Username, room: String) -> Result<(), ChatError> {
        let room = RoomName::new(room)?;

        if self.rooms.rooms_of(user).await.contains(&room) {
            return Err(ChatError::AlreadyInRoom(room.into_string()));
        }
        self.rooms.join(user, &room).await?;

        tracing::info!("'{}' joined '{}'", user, room);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MockRoomRepository, RepositoryError, Timestamp},
        infrastructure::repository::InMemoryRoomRepository,
    };

    fn username(name: &str) -> Username {
        Username::new(name.to_string()).unwrap()
    }

    fn room_name(name: &str) -> RoomName {
        RoomName::new(name.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_join_existing_room() {
        // テスト項目: 存在するルームに参加できる
        // given (前提条件):
        let rooms = Arc::new(InMemoryRoomRepository::new());
        rooms
            .create(&username("alice"), room_name("lobby"), Timestamp::new(0))
            .await
            .unwrap();
        let usecase = JoinRoomUseCase::new(rooms.clone());

        // when (操作):
        let result = usecase.execute(&username("bob"), "lobby".to_string()).await;

        // then (期待する結果):
        assert_eq!(result, Ok(()));
        assert!(rooms.is_member(&username("bob"), &room_name("lobby")).await);
    }

    #[tokio::test]
    async fn test_join_twice_fails_already_in_room() {
        // テスト項目: 参加済みのルームに再度参加すると AlreadyInRoom、メンバーは変わらない
        // given (前提条件):
        let rooms = Arc::new(InMemoryRoomRepository::new());
        rooms
            .create(&username("alice"), room_name("lobby"), Timestamp::new(0))
            .await
            .unwrap();
        let usecase = JoinRoomUseCase::new(rooms.clone());

        // when (操作):
        let result = usecase
            .execute(&username("alice"), "lobby".to_string())
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(ChatError::AlreadyInRoom("lobby".to_string())));
        assert_eq!(
            rooms.members_of(&room_name("lobby")).await,
            Ok(vec![username("alice")])
        );
    }

    #[tokio::test]
    async fn test_join_missing_room_fails_room_not_found() {
        // テスト項目: 存在しないルームへの参加は RoomNotFound
        // given (前提条件):
        let mut rooms = MockRoomRepository::new();
        rooms.expect_rooms_of().returning(|_| Vec::new());
        rooms
            .expect_join()
            .times(1)
            .returning(|_, room| Err(RepositoryError::RoomNotFound(room.to_string())));
        let usecase = JoinRoomUseCase::new(Arc::new(rooms));

        // when (操作):
        let result = usecase.execute(&username("bob"), "nowhere".to_string()).await;

        // then (期待する結果):
        assert_eq!(result, Err(ChatError::RoomNotFound("nowhere".to_string())));
    }
}
