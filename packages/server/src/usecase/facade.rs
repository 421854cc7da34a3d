//! Session Facade
//!
//! 外部（ディスパッチ層）から呼ばれる唯一の入口。トークン検証を行ってから
//! 各ユースケースに処理を委譲する。

use std::sync::Arc;

use tsudoi_shared::time::Clock;

use crate::domain::{
    ChatMessage, MessageBroadcaster, Room, RoomName, RoomRepository, SessionRepository, Token,
    UserRepository, Username,
};

use super::{
    AuthenticateUseCase, CreateRoomUseCase, JoinRoomUseCase, LeaveRoomUseCase,
    ListRoomMembersUseCase, ListRoomsUseCase, ListUserRoomsUseCase, LoginUseCase, LogoutUseCase,
    MessageStream, RegisterUserUseCase, SendMessageUseCase, SubscribeMessagesUseCase,
    error::ChatError,
};

pub struct ChatFacade {
    sessions: Arc<dyn SessionRepository>,
    authenticate: AuthenticateUseCase,
    register_user: RegisterUserUseCase,
    login: LoginUseCase,
    logout: LogoutUseCase,
    create_room: CreateRoomUseCase,
    join_room: JoinRoomUseCase,
    leave_room: LeaveRoomUseCase,
    list_rooms: ListRoomsUseCase,
    list_user_rooms: ListUserRoomsUseCase,
    list_room_members: ListRoomMembersUseCase,
    send_message: SendMessageUseCase,
    subscribe_messages: SubscribeMessagesUseCase,
}

impl ChatFacade {
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionRepository>,
        rooms: Arc<dyn RoomRepository>,
        broadcaster: Arc<dyn MessageBroadcaster>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            authenticate: AuthenticateUseCase::new(sessions.clone()),
            register_user: RegisterUserUseCase::new(users.clone()),
            login: LoginUseCase::new(users, sessions.clone()),
            logout: LogoutUseCase::new(sessions.clone()),
            create_room: CreateRoomUseCase::new(rooms.clone(), clock),
            join_room: JoinRoomUseCase::new(rooms.clone()),
            leave_room: LeaveRoomUseCase::new(rooms.clone()),
            list_rooms: ListRoomsUseCase::new(rooms.clone()),
            list_user_rooms: ListUserRoomsUseCase::new(rooms.clone()),
            list_room_members: ListRoomMembersUseCase::new(rooms.clone()),
            send_message: SendMessageUseCase::new(rooms, broadcaster.clone()),
            subscribe_messages: SubscribeMessagesUseCase::new(broadcaster),
            sessions,
        }
    }

    pub async fn register(
        &self,
        username: String,
        password: String,
    ) -> Result<Username, ChatError> {
        self.register_user.execute(username, password).await
    }

    pub async fn login(&self, username: String, password: String) -> Result<Token, ChatError> {
        self.login.execute(username, password).await
    }

    pub async fn logout(&self, token: &Token) -> Result<(), ChatError> {
        self.logout.execute(token).await
    }

    pub async fn create_room(&self, token: &Token, name: String) -> Result<Room, ChatError> {
        let user = self.authenticate.execute(token).await?;
        self.create_room.execute(&user, name).await
    }

    pub async fn list_rooms(&self, token: &Token) -> Result<Vec<Room>, ChatError> {
        self.authenticate.execute(token).await?;
        Ok(self.list_rooms.execute().await)
    }

    pub async fn list_user_rooms(&self, token: &Token) -> Result<Vec<RoomName>, ChatError> {
        let user = self.authenticate.execute(token).await?;
        Ok(self.list_user_rooms.execute(&user).await)
    }

    pub async fn join_room(&self, token: &Token, room: String) -> Result<(), ChatError> {
        let user = self.authenticate.execute(token).await?;
        self.join_room.execute(&user, room).await
    }

    pub async fn leave_room(&self, token: &Token, room: String) -> Result<(), ChatError> {
        let user = self.authenticate.execute(token).await?;
        self.leave_room.execute(&user, room).await
    }

    pub async fn list_room_members(
        &self,
        token: &Token,
        room: String,
    ) -> Result<Vec<Username>, ChatError> {
        self.authenticate.execute(token).await?;
        self.list_room_members.execute(room).await
    }

    /// 送信されたメッセージを返す。個々の受信者への配信失敗は呼び出し元に伝わらない
    pub async fn send_message(
        &self,
        token: &Token,
        room: String,
        text: String,
    ) -> Result<ChatMessage, ChatError> {
        let user = self.authenticate.execute(token).await?;
        let report = self.send_message.execute(&user, room, text).await?;
        Ok(report.message)
    }

    /// メッセージストリームを開く。同じユーザーの既存ストリームは置き換えられる
    pub async fn open_message_stream(&self, token: &Token) -> Result<MessageStream, ChatError> {
        let user = self.authenticate(token).await?;
        Ok(self.subscribe(user))
    }

    /// トークンを検証してユーザーを返す。購読には触れない
    ///
    /// WebSocket のハンドシェイク前に呼び、購読はアップグレード後に `subscribe` で行う。
    pub async fn authenticate(&self, token: &Token) -> Result<Username, ChatError> {
        self.authenticate.execute(token).await
    }

    /// 検証済みユーザーのストリームを開く。同じユーザーの既存ストリームは置き換えられる
    pub fn subscribe(&self, user: Username) -> MessageStream {
        self.subscribe_messages.execute(user)
    }

    /// 期限切れセッションの一括削除（バックグラウンド掃除用）
    pub async fn purge_expired_sessions(&self) -> usize {
        self.sessions.purge_expired().await
    }
}
