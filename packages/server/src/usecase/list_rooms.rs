//! UseCase: ルーム一覧の取得

use std::sync::Arc;

use crate::domain::{Room, RoomName, RoomRepository, Username};

/// 全ルーム一覧のユースケース
pub struct ListRoomsUseCase {
    rooms: Arc<dyn RoomRepository>,
}

impl ListRoomsUseCase {
    pub fn new(rooms: Arc<dyn RoomRepository>) -> Self {
        Self { rooms }
    }

    /// 全ルームを名前順で返す
    pub async fn execute(&self) -> Vec<Room> {
        self.rooms.list_all().await
    }
}

/// 参加中ルーム一覧のユースケース
pub struct ListUserRoomsUseCase {
    rooms: Arc<dyn RoomRepository>,
}

impl ListUserRoomsUseCase {
    pub fn new(rooms: Arc<dyn RoomRepository>) -> Self {
        Self { rooms }
    }

    pub async fn execute(&self, user: &Username) -> Vec<RoomName> {
        self.rooms.rooms_of(user).await
    }
}
