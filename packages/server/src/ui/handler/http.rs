//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use tsudoi_shared::protocol::{
    Operation,
    http::{
        CreateRoomRequest, CredentialsRequest, LoginResponse, RoomDto, SendMessageRequest,
        SentMessageDto,
    },
};

use crate::{domain::Username, ui::state::AppState};

use super::{auth::BearerToken, response::ApiReply};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CredentialsRequest>,
) -> ApiReply<()> {
    let result = state
        .facade
        .register(request.username, request.password)
        .await
        .map(|_| ());
    ApiReply::empty(Operation::Register, result)
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CredentialsRequest>,
) -> ApiReply<LoginResponse> {
    let result = state
        .facade
        .login(request.username, request.password)
        .await
        .map(|token| LoginResponse {
            token: token.as_str().to_string(),
        });
    ApiReply::new(Operation::Login, result)
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    BearerToken(token): BearerToken,
) -> ApiReply<()> {
    ApiReply::empty(Operation::Logout, state.facade.logout(&token).await)
}

pub async fn create_room(
    State(state): State<Arc<AppState>>,
    BearerToken(token): BearerToken,
    Json(request): Json<CreateRoomRequest>,
) -> ApiReply<RoomDto> {
    let result = state
        .facade
        .create_room(&token, request.name)
        .await
        .map(RoomDto::from);
    ApiReply::new(Operation::CreateRoom, result)
}

pub async fn list_rooms(
    State(state): State<Arc<AppState>>,
    BearerToken(token): BearerToken,
) -> ApiReply<Vec<RoomDto>> {
    // Domain Model から DTO への変換
    let result = state
        .facade
        .list_rooms(&token)
        .await
        .map(|rooms| rooms.into_iter().map(RoomDto::from).collect());
    ApiReply::new(Operation::ListRooms, result)
}

pub async fn list_user_rooms(
    State(state): State<Arc<AppState>>,
    BearerToken(token): BearerToken,
) -> ApiReply<Vec<String>> {
    let result = state
        .facade
        .list_user_rooms(&token)
        .await
        .map(|rooms| rooms.into_iter().map(|room| room.into_string()).collect());
    ApiReply::new(Operation::ListUserRooms, result)
}

pub async fn join_room(
    State(state): State<Arc<AppState>>,
    BearerToken(token): BearerToken,
    Path(name): Path<String>,
) -> ApiReply<()> {
    ApiReply::empty(Operation::JoinRoom, state.facade.join_room(&token, name).await)
}

pub async fn leave_room(
    State(state): State<Arc<AppState>>,
    BearerToken(token): BearerToken,
    Path(name): Path<String>,
) -> ApiReply<()> {
    ApiReply::empty(Operation::LeaveRoom, state.facade.leave_room(&token, name).await)
}

pub async fn list_room_members(
    State(state): State<Arc<AppState>>,
    BearerToken(token): BearerToken,
    Path(name): Path<String>,
) -> ApiReply<Vec<String>> {
    let result = state
        .facade
        .list_room_members(&token, name)
        .await
        .map(|members| members.into_iter().map(Username::into_string).collect());
    ApiReply::new(Operation::ListUsersInRoom, result)
}

pub async fn send_message(
    State(state): State<Arc<AppState>>,
    BearerToken(token): BearerToken,
    Path(name): Path<String>,
    Json(request): Json<SendMessageRequest>,
) -> ApiReply<SentMessageDto> {
    let result = state
        .facade
        .send_message(&token, name, request.text)
        .await
        .map(|message| SentMessageDto::from(&message));
    ApiReply::new(Operation::SendMessage, result)
}
