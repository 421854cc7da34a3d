//! UseCase: ルーム作成

use std::sync::Arc;

use tsudoi_shared::time::Clock;

use crate::domain::{Room, RoomName, RoomRepository, Timestamp, Username};

use super::error::ChatError;

/// ルーム作成のユースケース
pub struct CreateRoomUseCase {
    rooms: Arc<dyn RoomRepository>,
    clock: Arc<dyn Clock>,
}

impl CreateRoomUseCase {
    pub fn new(rooms: Arc<dyn RoomRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { rooms, clock }
    }

    /// ルームを作成する。作成者は自動的に最初のメンバーになる
    pub async fn execute(&self, creator: &Username, name: String) -> Result<Room, ChatError> {
        let name = RoomName::new(name)?;
        let created_at = Timestamp::new(self.clock.now_millis());

        let room = self.rooms.create(creator, name, created_at).await?;
        tracing::info!("Room '{}' created by '{}'", room.name, creator);
        Ok(room)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::ValidationError, infrastructure::repository::InMemoryRoomRepository};
    use tsudoi_shared::time::FixedClock;

    fn username(name: &str) -> Username {
        Username::new(name.to_string()).unwrap()
    }

    fn create_usecase() -> (CreateRoomUseCase, Arc<InMemoryRoomRepository>) {
        let rooms = Arc::new(InMemoryRoomRepository::new());
        let usecase = CreateRoomUseCase::new(rooms.clone(), Arc::new(FixedClock::new(1_000)));
        (usecase, rooms)
    }

    #[tokio::test]
    async fn test_create_room_makes_creator_a_member() {
        // テスト項目: ルームを作成すると作成者がメンバーになる
        // given (前提条件):
        let (usecase, rooms) = create_usecase();
        let alice = username("alice");

        // when (操作):
        let room = usecase.execute(&alice, "lobby".to_string()).await.unwrap();

        // then (期待する結果):
        assert_eq!(room.name.as_str(), "lobby");
        assert_eq!(room.created_by, alice);
        assert_eq!(room.created_at, Timestamp::new(1_000));
        assert_eq!(rooms.members_of(&room.name).await, Ok(vec![alice]));
    }

    #[tokio::test]
    async fn test_create_existing_room_fails() {
        // テスト項目: 同名のルームは作成できず、既存のメンバーシップは変わらない
        // given (前提条件):
        let (usecase, rooms) = create_usecase();
        let alice = username("alice");
        let bob = username("bob");
        usecase.execute(&alice, "lobby".to_string()).await.unwrap();

        // when (操作):
        let result = usecase.execute(&bob, "lobby".to_string()).await;

        // then (期待する結果):
        assert_eq!(result, Err(ChatError::RoomAlreadyExists("lobby".to_string())));
        assert!(rooms.rooms_of(&bob).await.is_empty());
    }

    #[tokio::test]
    async fn test_create_room_with_blank_name_fails() {
        // テスト項目: 空白だけのルーム名は InvalidInput
        // given (前提条件):
        let (usecase, rooms) = create_usecase();

        // when (操作):
        let result = usecase.execute(&username("alice"), "   ".to_string()).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ChatError::InvalidInput(ValidationError::EmptyRoomName))
        );
        assert!(rooms.list_all().await.is_empty());
    }
}
