//! Domain layer: value objects, entities and the seams implemented by the
//! infrastructure layer.

pub mod broadcaster;
pub mod entity;
pub mod error;
pub mod repository;
pub mod value_object;

pub use broadcaster::{
    MessageBroadcaster, MessageSink, PublishReport, Subscription, SubscriptionRegistry,
};
pub use entity::{ChatMessage, Room, Session, User};
pub use error::{DeliveryError, RepositoryError, ValidationError};
pub use repository::{RoomRepository, SessionRepository, TokenGenerator, UserRepository};
#[cfg(test)]
pub use repository::{MockRoomRepository, MockSessionRepository, MockUserRepository};
pub use value_object::{
    MessageText, Password, RoomName, SubscriptionId, Timestamp, Token, Username,
};
