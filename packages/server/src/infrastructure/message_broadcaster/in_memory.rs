//! In-process MessageBroadcaster 実装
//!
//! ## 責務
//!
//! - ユーザーごとに 1 つの `MessageSink` を登録・置換・解除する
//! - 発言をルームの現在のメンバー（送信者を除く）に配信する
//! - 配信に失敗した購読者を登録から外し、残りの購読者への配信を続ける
//!
//! ## 並行性
//!
//! 購読者テーブルは `DashMap` で、ルームのメンバー判定はテーブルのロックを持たずに
//! `RoomRepository` に問い合わせる。配信はエントリの読み取りロックを保持したまま行うため、
//! `Subscription::cancel` が戻った後にそのシンクが呼ばれることはない。

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tsudoi_shared::time::Clock;

use crate::domain::{
    ChatMessage, DeliveryError, MessageBroadcaster, MessageSink, MessageText, PublishReport,
    RoomName, RoomRepository, Subscription, SubscriptionId, SubscriptionRegistry, Timestamp,
    Username,
};

struct Registration {
    id: SubscriptionId,
    sink: Arc<dyn MessageSink>,
}

/// 購読者テーブル。`Subscription` ハンドルからも共有される
#[derive(Default)]
struct SubscriberTable {
    /// Key: ユーザー名, Value: 現在の登録
    entries: DashMap<Username, Registration>,
}

impl SubscriberTable {
    fn snapshot(&self) -> Vec<(Username, SubscriptionId)> {
        self.entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.id))
            .collect()
    }

    /// 登録が `id` のままであれば配信する。置換・解除済みなら `None`
    fn deliver_if_current(
        &self,
        user: &Username,
        id: SubscriptionId,
        message: &ChatMessage,
    ) -> Option<Result<(), DeliveryError>> {
        let registration = self.entries.get(user)?;
        if registration.id != id {
            return None;
        }
        Some(registration.sink.deliver(message))
    }
}

impl SubscriptionRegistry for SubscriberTable {
    fn cancel(&self, user: &Username, id: SubscriptionId) -> bool {
        self.entries
            .remove_if(user, |_, registration| registration.id == id)
            .is_some()
    }
}

/// プロセス内で完結する MessageBroadcaster 実装
pub struct InMemoryMessageBroadcaster {
    subscribers: Arc<SubscriberTable>,
    rooms: Arc<dyn RoomRepository>,
    clock: Arc<dyn Clock>,
}

impl InMemoryMessageBroadcaster {
    pub fn new(rooms: Arc<dyn RoomRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            subscribers: Arc::new(SubscriberTable::default()),
            rooms,
            clock,
        }
    }

    /// ユーザーが現在購読中か
    #[cfg(test)]
    pub fn is_subscribed(&self, user: &Username) -> bool {
        self.subscribers.entries.contains_key(user)
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.entries.len()
    }
}

#[async_trait]
impl MessageBroadcaster for InMemoryMessageBroadcaster {
    fn subscribe(&self, user: Username, sink: Arc<dyn MessageSink>) -> Subscription {
        let id = SubscriptionId::generate();
        let previous = self
            .subscribers
            .entries
            .insert(user.clone(), Registration { id, sink });
        if previous.is_some() {
            tracing::info!("Subscription of '{}' replaced by {}", user, id);
        } else {
            tracing::info!("'{}' subscribed ({})", user, id);
        }

        Subscription::new(user, id, self.subscribers.clone())
    }

    fn unsubscribe(&self, user: &Username) -> bool {
        let removed = self.subscribers.entries.remove(user).is_some();
        if removed {
            tracing::info!("'{}' unsubscribed", user);
        }
        removed
    }

    async fn publish(&self, room: RoomName, sender: Username, text: MessageText) -> PublishReport {
        let message = ChatMessage::new(Timestamp::new(self.clock.now_millis()), room, sender, text);
        let mut report = PublishReport::new(message);
        let message = &report.message;

        let mut delivered = Vec::new();
        let mut removed = Vec::new();
        for (user, id) in self.subscribers.snapshot() {
            // 送信者自身には配信しない
            if user == message.from {
                continue;
            }
            // メンバーシップはメッセージごとに再評価する
            if !self.rooms.is_member(&user, &message.room).await {
                continue;
            }

            match self.subscribers.deliver_if_current(&user, id, message) {
                None => {}
                Some(Ok(())) => {
                    tracing::debug!("Delivered message in '{}' to '{}'", message.room, user);
                    delivered.push(user);
                }
                Some(Err(e)) => {
                    tracing::warn!("Removing subscriber '{}' after failed delivery: {}", user, e);
                    if self.subscribers.cancel(&user, id) {
                        removed.push(user);
                    }
                }
            }
        }

        report.delivered = delivered;
        report.removed = removed;
        report
    }
}
