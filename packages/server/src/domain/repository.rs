//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! - `UserRepository`: ユーザーディレクトリ
//! - `SessionRepository`: トークンとセッションの管理
//! - `RoomRepository`: ルームとメンバーシップの管理

use async_trait::async_trait;

use super::{
    entity::{Room, User},
    error::RepositoryError,
    value_object::{Password, RoomName, Timestamp, Token, Username},
};

/// User Directory
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// ユーザーを登録する。ユーザー名の重複チェックと登録は不可分に行われる
    async fn register(&self, user: User) -> Result<User, RepositoryError>;

    /// ユーザー名でユーザーを検索
    async fn find(&self, username: &Username) -> Option<User>;

    /// 認証情報が一致するか確認
    async fn check_credential(&self, username: &Username, password: &Password) -> bool;
}

/// Session Store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// 新しいトークンを発行してユーザーに紐付ける
    async fn issue(&self, user: Username) -> Token;

    /// トークンを検証し、有効であれば最終アクセス時刻を更新してユーザーを返す。
    /// 期限切れのトークンはこの時点で破棄される
    async fn validate(&self, token: &Token) -> Option<Username>;

    /// トークンを即時に無効化する。存在した場合は true
    async fn revoke(&self, token: &Token) -> bool;

    /// 期限切れのセッションをまとめて削除し、削除件数を返す
    async fn purge_expired(&self) -> usize;
}

/// Room Registry
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// ルームを作成し、作成者を最初のメンバーとして登録する（不可分）
    async fn create(
        &self,
        creator: &Username,
        name: RoomName,
        created_at: Timestamp,
    ) -> Result<Room, RepositoryError>;

    /// ルーム名でルームを検索
    async fn find(&self, name: &RoomName) -> Option<Room>;

    /// 全ルームを名前順で取得
    async fn list_all(&self) -> Vec<Room>;

    /// メンバーに追加（冪等）
    async fn join(&self, user: &Username, room: &RoomName) -> Result<(), RepositoryError>;

    /// メンバーから削除（冪等）
    async fn leave(&self, user: &Username, room: &RoomName) -> Result<(), RepositoryError>;

    /// ルームのメンバーを名前順で取得
    async fn members_of(&self, room: &RoomName) -> Result<Vec<Username>, RepositoryError>;

    /// ユーザーが参加しているルーム名を名前順で取得
    async fn rooms_of(&self, user: &Username) -> Vec<RoomName>;

    /// ユーザーがルームのメンバーか判定
    async fn is_member(&self, user: &Username, room: &RoomName) -> bool;
}

/// Source of fresh session tokens
pub trait TokenGenerator: Send + Sync {
    fn generate(&self) -> Token;
}
