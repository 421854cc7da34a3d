//! Channel-backed message sink.
//!
//! Delivery only enqueues, so a slow consumer never blocks the publisher. The
//! consumer (e.g. a WebSocket writer task) drains the receiver at its own pace.

use tokio::sync::mpsc;

use crate::domain::{ChatMessage, DeliveryError, MessageSink};

pub struct ChannelSink {
    sender: mpsc::UnboundedSender<ChatMessage>,
}

impl ChannelSink {
    /// Create a sink and the receiver that drains it.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ChatMessage>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl MessageSink for ChannelSink {
    fn deliver(&self, message: &ChatMessage) -> Result<(), DeliveryError> {
        self.sender
            .send(message.clone())
            .map_err(|_| DeliveryError::Closed)
    }
}
