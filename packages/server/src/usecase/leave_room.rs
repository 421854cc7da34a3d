//! UseCase: ルーム退出

use std::sync::Arc;

use crate::domain::{RoomName, RoomRepository, Username};

use super::error::ChatError;

/// ルーム退出のユースケース
pub struct LeaveRoomUseCase {
    rooms: Arc<dyn RoomRepository>,
}

impl LeaveRoomUseCase {
    pub fn new(rooms: Arc<dyn RoomRepository>) -> Self {
        Self { rooms }
    }

    /// ルームから退出する
    ///
    /// ルームが存在しなければ `RoomNotFound`、参加していなければ `NotInRoom`。
    pub async fn execute(&self, user: &Username, room: String) -> Result<(), ChatError> {
        let room = RoomName::new(room)?;

        if self.rooms.find(&room).await.is_none() {
            return Err(ChatError::RoomNotFound(room.into_string()));
        }
        if !self.rooms.rooms_of(user).await.contains(&room) {
            return Err(ChatError::NotInRoom(room.into_string()));
        }
        self.rooms.leave(user, &room).await?;

        tracing::info!("'{}' left '{}'", user, room);
        Ok(())
    }
}
