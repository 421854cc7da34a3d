//! Message fan-out seams.
//!
//! A [`MessageBroadcaster`] keeps at most one live [`MessageSink`] per user and
//! delivers every published message to the sinks of the other members of the
//! target room. Delivery failures are reported by the sink as an explicit
//! [`DeliveryError`]; the broadcaster then drops that registration and carries
//! on with the remaining subscribers.

use std::sync::Arc;

use async_trait::async_trait;

use super::{
    entity::ChatMessage,
    error::DeliveryError,
    value_object::{MessageText, RoomName, SubscriptionId, Username},
};

/// Receiving end of a subscription.
///
/// `deliver` is called from the publisher's context and must not block or
/// call back into the broadcaster.
pub trait MessageSink: Send + Sync {
    fn deliver(&self, message: &ChatMessage) -> Result<(), DeliveryError>;
}

/// Removes registrations on behalf of a [`Subscription`] handle.
pub trait SubscriptionRegistry: Send + Sync {
    /// Remove `user`'s registration only if it is still the one identified by `id`.
    fn cancel(&self, user: &Username, id: SubscriptionId) -> bool;
}

/// Handle of a live subscription. Cancelled explicitly or when dropped.
///
/// Once `cancel` has returned, the sink of this subscription is never invoked
/// again. Cancelling a subscription that has already been replaced by a newer
/// one for the same user leaves the newer one untouched.
pub struct Subscription {
    user: Username,
    id: SubscriptionId,
    registry: Arc<dyn SubscriptionRegistry>,
    active: bool,
}

impl Subscription {
    pub fn new(
        user: Username,
        id: SubscriptionId,
        registry: Arc<dyn SubscriptionRegistry>,
    ) -> Self {
        Self {
            user,
            id,
            registry,
            active: true,
        }
    }

    pub fn user(&self) -> &Username {
        &self.user
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Remove the registration. Returns `false` if it was already gone
    /// (replaced, removed as dead, or unsubscribed).
    pub fn cancel(mut self) -> bool {
        self.release()
    }

    fn release(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        self.registry.cancel(&self.user, self.id)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("user", &self.user)
            .field("id", &self.id)
            .field("active", &self.active)
            .finish()
    }
}

/// What happened during one publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    pub message: ChatMessage,
    /// Subscribers the message was handed to
    pub delivered: Vec<Username>,
    /// Subscribers removed because their sink failed
    pub removed: Vec<Username>,
}

impl PublishReport {
    pub fn new(message: ChatMessage) -> Self {
        Self {
            message,
            delivered: Vec::new(),
            removed: Vec::new(),
        }
    }
}

/// Message Broadcaster
#[async_trait]
pub trait MessageBroadcaster: Send + Sync {
    /// Register `sink` as the live sink for `user`, replacing any previous one.
    fn subscribe(&self, user: Username, sink: Arc<dyn MessageSink>) -> Subscription;

    /// Remove `user`'s registration if present.
    fn unsubscribe(&self, user: &Username) -> bool;

    /// Build a message stamped with the current time and deliver it to every
    /// subscriber that is currently a member of `room`, except the sender.
    /// Never fails; subscriber failures are absorbed.
    async fn publish(&self, room: RoomName, sender: Username, text: MessageText) -> PublishReport;
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct RecordingRegistry {
        cancelled: Mutex<Vec<(Username, SubscriptionId)>>,
    }

    impl SubscriptionRegistry for RecordingRegistry {
        fn cancel(&self, user: &Username, id: SubscriptionId) -> bool {
            self.cancelled.lock().unwrap().push((user.clone(), id));
            true
        }
    }

    fn alice() -> Username {
        Username::new("alice".to_string()).unwrap()
    }

    #[test]
    fn test_cancel_releases_registration_once() {
        // テスト項目: cancel するとレジストリに一度だけ解除が通知され、drop で二重解除されない
        // given (前提条件):
        let registry = Arc::new(RecordingRegistry::default());
        let id = SubscriptionId::generate();
        let subscription = Subscription::new(alice(), id, registry.clone());

        // when (操作):
        let result = subscription.cancel();

        // then (期待する結果):
        assert!(result);
        let cancelled = registry.cancelled.lock().unwrap();
        assert_eq!(cancelled.len(), 1);
        assert_eq!(cancelled[0], (alice(), id));
    }

    #[test]
    fn test_drop_releases_registration() {
        // テスト項目: Subscription を drop するとレジストリから解除される
        // given (前提条件):
        let registry = Arc::new(RecordingRegistry::default());
        let subscription = Subscription::new(alice(), SubscriptionId::generate(), registry.clone());

        // when (操作):
        drop(subscription);

        // then (期待する結果):
        assert_eq!(registry.cancelled.lock().unwrap().len(), 1);
    }
}
