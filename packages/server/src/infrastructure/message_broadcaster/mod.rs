//! メッセージ配信（ファンアウト）の実装
//!
//! ## 実装
//!
//! - `in_memory`: プロセス内で購読者を管理する `MessageBroadcaster` 実装
//! - `channel`: 購読者ごとのキュー（tokio の unbounded channel）を `MessageSink` として扱うアダプタ

pub mod channel;
pub mod in_memory;

pub use channel::ChannelSink;
pub use in_memory::InMemoryMessageBroadcaster;
