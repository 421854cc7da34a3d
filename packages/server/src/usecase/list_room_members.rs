//! UseCase: ルームメンバー一覧の取得

use std::sync::Arc;

use crate::domain::{RoomName, RoomRepository, Username};

use super::error::ChatError;

/// ルームメンバー一覧のユースケース
pub struct ListRoomMembersUseCase {
    rooms: Arc<dyn RoomRepository>,
}

impl ListRoomMembersUseCase {
    pub fn new(rooms: Arc<dyn RoomRepository>) -> Self {
        Self { rooms }
    }

    /// ルームのメンバーを名前順で返す。ルームが存在しなければ `RoomNotFound`
    pub async fn execute(&self, room: String) -> Result<Vec<Username>, ChatError> {
        let room = RoomName::new(room)?;
        Ok(self.rooms.members_of(&room).await?)
    }
}
