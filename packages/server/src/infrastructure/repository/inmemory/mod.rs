//! InMemory Repository 実装
//!
//! `DashMap` をインメモリ DB として使用します。シャード単位のロックのため、
//! 異なるキーへの操作はグローバルなロックなしに並行して進みます。

mod room;
mod session;
mod user;

pub use room::InMemoryRoomRepository;
pub use session::InMemorySessionRepository;
pub use user::InMemoryUserRepository;
