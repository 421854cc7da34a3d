//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 送信者のメンバーシップ確認と、Broadcaster へのファンアウト依頼
//!
//! ### なぜこのテストが必要か
//! - 送信者以外の購読中メンバーだけにメッセージが届くことを保証
//! - 非メンバーからの送信は NotInRoom で拒否され、誰にも届かないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：メンバー同士のメッセージ送信
//! - 異常系：ルームに参加していないユーザーからの送信、空メッセージ
//! - エッジケース：送信者しか購読していない場合（配信先なし）

use std::sync::Arc;

use crate::domain::{
    MessageBroadcaster, MessageText, PublishReport, RoomName, RoomRepository, Username,
};

use super::error::ChatError;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    rooms: Arc<dyn RoomRepository>,
    broadcaster: Arc<dyn MessageBroadcaster>,
}

impl SendMessageUseCase {
    pub fn new(rooms: Arc<dyn RoomRepository>, broadcaster: Arc<dyn MessageBroadcaster>) -> Self {
        Self { rooms, broadcaster }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `sender` - 認証済みの送信者
    /// * `room` - 送信先ルーム名
    /// * `text` - 本文
    ///
    /// # Returns
    ///
    /// * `Ok(PublishReport)` - 配信結果（個々の購読者の失敗はここに吸収される）
    /// * `Err(ChatError)` - 入力不正、または送信者がルームのメンバーではない
    pub async fn execute(
        &self,
        sender: &Username,
        room: String,
        text: String,
    ) -> Result<PublishReport, ChatError> {
        let room = RoomName::new(room)?;
        let text = MessageText::new(text)?;

        if !self.rooms.is_member(sender, &room).await {
            tracing::warn!("'{}' tried to send to '{}' without membership", sender, room);
            return Err(ChatError::NotInRoom(room.into_string()));
        }

        let report = self.broadcaster.publish(room, sender.clone(), text).await;
        tracing::info!(
            "'{}' sent a message to '{}' (delivered: {}, removed: {})",
            sender,
            report.message.room,
            report.delivered.len(),
            report.removed.len()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MessageSink, Timestamp, ValidationError},
        infrastructure::{
            message_broadcaster::{ChannelSink, InMemoryMessageBroadcaster},
            repository::InMemoryRoomRepository,
        },
    };
    use tsudoi_shared::time::FixedClock;

    const NOW: i64 = 1_672_498_800_000;

    fn username(name: &str) -> Username {
        Username::new(name.to_string()).unwrap()
    }

    struct Fixture {
        rooms: Arc<InMemoryRoomRepository>,
        broadcaster: Arc<InMemoryMessageBroadcaster>,
        usecase: SendMessageUseCase,
    }

    async fn create_fixture() -> Fixture {
        let rooms = Arc::new(InMemoryRoomRepository::new());
        rooms
            .create(
                &username("alice"),
                RoomName::new("lobby".to_string()).unwrap(),
                Timestamp::new(0),
            )
            .await
            .unwrap();
        let broadcaster = Arc::new(InMemoryMessageBroadcaster::new(
            rooms.clone(),
            Arc::new(FixedClock::new(NOW)),
        ));
        let usecase = SendMessageUseCase::new(rooms.clone(), broadcaster.clone());
        Fixture {
            rooms,
            broadcaster,
            usecase,
        }
    }

    #[tokio::test]
    async fn test_message_reaches_other_member_only() {
        // テスト項目: 他のメンバーには 1 通だけ届き、送信者には届かない
        // given (前提条件):
        let fixture = create_fixture().await;
        let lobby = RoomName::new("lobby".to_string()).unwrap();
        fixture.rooms.join(&username("bob"), &lobby).await.unwrap();
        let (alice_sink, mut alice_rx) = ChannelSink::new();
        let (bob_sink, mut bob_rx) = ChannelSink::new();
        let alice_sink: Arc<dyn MessageSink> = Arc::new(alice_sink);
        let bob_sink: Arc<dyn MessageSink> = Arc::new(bob_sink);
        let _alice_sub = fixture.broadcaster.subscribe(username("alice"), alice_sink);
        let _bob_sub = fixture.broadcaster.subscribe(username("bob"), bob_sink);

        // when (操作):
        let report = fixture
            .usecase
            .execute(&username("alice"), "lobby".to_string(), "Hello!".to_string())
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(report.delivered, vec![username("bob")]);
        let received = bob_rx.try_recv().unwrap();
        assert_eq!(received.room, lobby);
        assert_eq!(received.from, username("alice"));
        assert_eq!(received.text.as_str(), "Hello!");
        assert_eq!(received.timestamp, Timestamp::new(NOW));
        assert!(bob_rx.try_recv().is_err());
        assert!(alice_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_non_member_cannot_send() {
        // テスト項目: メンバーでないユーザーの送信は NotInRoom になり、誰にも届かない
        // given (前提条件):
        let fixture = create_fixture().await;
        let (alice_sink, mut alice_rx) = ChannelSink::new();
        let _alice_sub = fixture
            .broadcaster
            .subscribe(username("alice"), Arc::new(alice_sink));

        // when (操作):
        let result = fixture
            .usecase
            .execute(&username("mallory"), "lobby".to_string(), "psst".to_string())
            .await;

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), ChatError::NotInRoom("lobby".to_string()));
        assert!(alice_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_sender_alone_delivers_to_nobody() {
        // テスト項目: 送信者しか購読していない場合は配信先なしで成功する
        // given (前提条件):
        let fixture = create_fixture().await;
        let (alice_sink, _alice_rx) = ChannelSink::new();
        let _alice_sub = fixture
            .broadcaster
            .subscribe(username("alice"), Arc::new(alice_sink));

        // when (操作):
        let report = fixture
            .usecase
            .execute(&username("alice"), "lobby".to_string(), "anyone?".to_string())
            .await
            .unwrap();

        // then (期待する結果):
        assert!(report.delivered.is_empty());
        assert!(report.removed.is_empty());
    }

    #[tokio::test]
    async fn test_empty_message_is_rejected() {
        // テスト項目: 空のメッセージは InvalidInput
        // given (前提条件):
        let fixture = create_fixture().await;

        // when (操作):
        let result = fixture
            .usecase
            .execute(&username("alice"), "lobby".to_string(), String::new())
            .await;

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            ChatError::InvalidInput(ValidationError::EmptyMessage)
        );
    }
}
