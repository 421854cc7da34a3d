//! Request handlers.

mod auth;
mod http;
mod response;
mod websocket;

pub use http::{
    create_room, health_check, join_room, leave_room, list_room_members, list_rooms,
    list_user_rooms, login, logout, register, send_message,
};
pub use websocket::websocket_handler;
