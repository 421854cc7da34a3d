//! UseCase 層
//!
//! 1 操作につき 1 つのユースケースを定義し、`ChatFacade` がそれらを束ねて
//! 外部（ディスパッチ層）に公開します。

mod authenticate;
mod create_room;
mod error;
mod facade;
mod join_room;
mod leave_room;
mod list_room_members;
mod list_rooms;
mod login;
mod logout;
mod outcome;
mod register_user;
mod send_message;
mod subscribe_messages;

pub use authenticate::AuthenticateUseCase;
pub use create_room::CreateRoomUseCase;
pub use error::ChatError;
pub use facade::ChatFacade;
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use list_room_members::ListRoomMembersUseCase;
pub use list_rooms::{ListRoomsUseCase, ListUserRoomsUseCase};
pub use login::LoginUseCase;
pub use logout::LogoutUseCase;
pub use outcome::Outcome;
pub use register_user::RegisterUserUseCase;
pub use send_message::SendMessageUseCase;
pub use subscribe_messages::{MessageStream, SubscribeMessagesUseCase};
