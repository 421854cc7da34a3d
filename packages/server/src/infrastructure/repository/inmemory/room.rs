//! InMemory Room Repository 実装
//!
//! ルーム本体とメンバー集合を保持します。メンバー集合はルームごとに独立した
//! `DashSet` のため、異なるユーザーの join/leave はグローバルなロックなしに進みます。
//! 一覧系の読み取りは呼び出し時点のスナップショットを返しますが、並行する書き込みとは
//! 直列化されません（結果整合）。

use async_trait::async_trait;
use dashmap::{DashMap, DashSet, mapref::entry::Entry};

use crate::domain::{RepositoryError, Room, RoomName, RoomRepository, Timestamp, Username};

struct RoomEntry {
    room: Room,
    members: DashSet<Username>,
}

/// インメモリ Room Repository 実装
///
/// ルームは削除されません。
#[derive(Default)]
pub struct InMemoryRoomRepository {
    /// Key: ルーム名, Value: ルームとメンバー集合
    rooms: DashMap<RoomName, RoomEntry>,
}

impl InMemoryRoomRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn create(
        &self,
        creator: &Username,
        name: RoomName,
        created_at: Timestamp,
    ) -> Result<Room, RepositoryError> {
        // ルームの登録と作成者の参加は同じ entry ロックの中で行う
        match self.rooms.entry(name.clone()) {
            Entry::Occupied(_) => Err(RepositoryError::RoomAlreadyExists(name.into_string())),
            Entry::Vacant(slot) => {
                let room = Room::new(name, creator.clone(), created_at);
                let members = DashSet::new();
                members.insert(creator.clone());
                slot.insert(RoomEntry {
                    room: room.clone(),
                    members,
                });
                Ok(room)
            }
        }
    }

    async fn find(&self, name: &RoomName) -> Option<Room> {
        self.rooms.get(name).map(|entry| entry.room.clone())
    }

    async fn list_all(&self) -> Vec<Room> {
        let mut rooms: Vec<Room> = self
            .rooms
            .iter()
            .map(|entry| entry.room.clone())
            .collect();
        rooms.sort_by(|a, b| a.name.cmp(&b.name));
        rooms
    }

    async fn join(&self, user: &Username, room: &RoomName) -> Result<(), RepositoryError> {
        let entry = self
            .rooms
            .get(room)
            .ok_or_else(|| RepositoryError::RoomNotFound(room.as_str().to_string()))?;
        entry.members.insert(user.clone());
        Ok(())
    }

    async fn leave(&self, user: &Username, room: &RoomName) -> Result<(), RepositoryError> {
        let entry = self
            .rooms
            .get(room)
            .ok_or_else(|| RepositoryError::RoomNotFound(room.as_str().to_string()))?;
        entry.members.remove(user);
        Ok(())
    }

    async fn members_of(&self, room: &RoomName) -> Result<Vec<Username>, RepositoryError> {
        let entry = self
            .rooms
            .get(room)
            .ok_or_else(|| RepositoryError::RoomNotFound(room.as_str().to_string()))?;
        let mut members: Vec<Username> = entry.members.iter().map(|m| m.key().clone()).collect();
        members.sort();
        Ok(members)
    }

    async fn rooms_of(&self, user: &Username) -> Vec<RoomName> {
        let mut rooms: Vec<RoomName> = self
            .rooms
            .iter()
            .filter(|entry| entry.members.contains(user))
            .map(|entry| entry.key().clone())
            .collect();
        rooms.sort();
        rooms
    }

    async fn is_member(&self, user: &Username, room: &RoomName) -> bool {
        self.rooms
            .get(room)
            .is_some_and(|entry| entry.members.contains(user))
    }
}
