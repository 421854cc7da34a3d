//! UseCase: メッセージストリームの購読
//!
//! 購読ごとに専用のキューを用意し、Broadcaster からの配信はそのキューに積まれる。
//! 購読は `MessageStream` を破棄した時点で解除される。

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{
    domain::{ChatMessage, MessageBroadcaster, Subscription, Username},
    infrastructure::message_broadcaster::ChannelSink,
};

/// 購読中のメッセージストリーム
///
/// 同じユーザーが新しいストリームを開くと古いストリームのキューは閉じられ、
/// `next()` が `None` を返すようになる。
#[derive(Debug)]
pub struct MessageStream {
    subscription: Subscription,
    receiver: mpsc::UnboundedReceiver<ChatMessage>,
}

impl MessageStream {
    pub fn user(&self) -> &Username {
        self.subscription.user()
    }

    /// 次のメッセージを待つ。購読が置き換えられた・解除された場合は `None`
    pub async fn next(&mut self) -> Option<ChatMessage> {
        self.receiver.recv().await
    }

    /// 購読ハンドルと受信キューに分解する
    pub fn into_parts(self) -> (Subscription, mpsc::UnboundedReceiver<ChatMessage>) {
        (self.subscription, self.receiver)
    }
}

/// メッセージ購読のユースケース
pub struct SubscribeMessagesUseCase {
    broadcaster: Arc<dyn MessageBroadcaster>,
}

impl SubscribeMessagesUseCase {
    pub fn new(broadcaster: Arc<dyn MessageBroadcaster>) -> Self {
        Self { broadcaster }
    }

    /// ユーザーのストリームを開く。既存の購読は置き換えられる
    pub fn execute(&self, user: Username) -> MessageStream {
        let (sink, receiver) = ChannelSink::new();
        let subscription = self.broadcaster.subscribe(user, Arc::new(sink));
        MessageStream {
            subscription,
            receiver,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MessageText, RoomName, RoomRepository, Timestamp},
        infrastructure::{
            message_broadcaster::InMemoryMessageBroadcaster, repository::InMemoryRoomRepository,
        },
    };
    use tsudoi_shared::time::FixedClock;

    fn username(name: &str) -> Username {
        Username::new(name.to_string()).unwrap()
    }

    async fn create_broadcaster() -> Arc<InMemoryMessageBroadcaster> {
        let rooms = Arc::new(InMemoryRoomRepository::new());
        let lobby = RoomName::new("lobby".to_string()).unwrap();
        rooms
            .create(&username("alice"), lobby.clone(), Timestamp::new(0))
            .await
            .unwrap();
        rooms.join(&username("bob"), &lobby).await.unwrap();
        Arc::new(InMemoryMessageBroadcaster::new(
            rooms,
            Arc::new(FixedClock::new(42)),
        ))
    }

    async fn publish_from_alice(broadcaster: &InMemoryMessageBroadcaster, text: &str) {
        broadcaster
            .publish(
                RoomName::new("lobby".to_string()).unwrap(),
                username("alice"),
                MessageText::new(text.to_string()).unwrap(),
            )
            .await;
    }

    #[tokio::test]
    async fn test_stream_receives_published_messages() {
        // テスト項目: 開いたストリームに配信されたメッセージが届く
        // given (前提条件):
        let broadcaster = create_broadcaster().await;
        let usecase = SubscribeMessagesUseCase::new(broadcaster.clone());
        let mut stream = usecase.execute(username("bob"));

        // when (操作):
        publish_from_alice(&broadcaster, "hi bob").await;

        // then (期待する結果):
        let message = stream.next().await.unwrap();
        assert_eq!(message.text.as_str(), "hi bob");
        assert_eq!(stream.user(), &username("bob"));
    }

    #[tokio::test]
    async fn test_second_stream_replaces_first() {
        // テスト項目: 2 つ目のストリームを開くと 1 つ目は終了し、以降は 2 つ目だけに届く
        // given (前提条件):
        let broadcaster = create_broadcaster().await;
        let usecase = SubscribeMessagesUseCase::new(broadcaster.clone());
        let mut first = usecase.execute(username("bob"));

        // when (操作):
        let mut second = usecase.execute(username("bob"));
        publish_from_alice(&broadcaster, "after replace").await;

        // then (期待する結果):
        assert!(first.next().await.is_none());
        assert_eq!(second.next().await.unwrap().text.as_str(), "after replace");
        assert_eq!(broadcaster.subscriber_count(), 1);
    }

    #[tokio::test]
    async fn test_dropping_stream_unsubscribes() {
        // テスト項目: ストリームを破棄すると購読が解除される
        // given (前提条件):
        let broadcaster = create_broadcaster().await;
        let usecase = SubscribeMessagesUseCase::new(broadcaster.clone());
        let stream = usecase.execute(username("bob"));
        assert!(broadcaster.is_subscribed(&username("bob")));

        // when (操作):
        drop(stream);

        // then (期待する結果):
        assert!(!broadcaster.is_subscribed(&username("bob")));
    }

    #[tokio::test]
    async fn test_dropping_replaced_stream_keeps_new_subscription() {
        // テスト項目: 置き換えられた古いストリームを破棄しても新しい購読は残る
        // given (前提条件):
        let broadcaster = create_broadcaster().await;
        let usecase = SubscribeMessagesUseCase::new(broadcaster.clone());
        let first = usecase.execute(username("bob"));
        let mut second = usecase.execute(username("bob"));

        // when (操作):
        drop(first);
        publish_from_alice(&broadcaster, "still here").await;

        // then (期待する結果):
        assert!(broadcaster.is_subscribed(&username("bob")));
        assert_eq!(second.next().await.unwrap().text.as_str(), "still here");
    }
}
