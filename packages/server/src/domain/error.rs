//! Domain layer errors.

use thiserror::Error;

/// 値オブジェクト生成時のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValueObjectError {
    /// ニックネームが空（トリム後）
    #[error("nickname must not be empty")]
    EmptyNickname,
}

/// Channel エンティティの不変条件違反
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChannelError {
    /// 同じニックネームが既にチャンネルに参加している
    #[error("nickname '{0}' is already in this channel")]
    DuplicateNickname(String),
}

/// Session の状態遷移エラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    /// ログイン済みのセッションで再ログインしようとした
    #[error("session is already logged in as '{0}'")]
    AlreadyLoggedIn(String),

    /// 切断済みのセッションを操作しようとした
    #[error("session is already disconnected")]
    Disconnected,
}

/// Repository 操作のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("channel '{0}' not found")]
    ChannelNotFound(String),

    #[error("connection '{0}' not found")]
    ConnectionNotFound(String),

    #[error(transparent)]
    Channel(#[from] ChannelError),
}

/// MessagePusher のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MessagePushError {
    /// 送信先の接続が登録されていない
    #[error("client '{0}' not found")]
    ClientNotFound(String),

    /// 送信チャンネルがクローズ済み
    #[error("failed to push message: {0}")]
    PushFailed(String),

    /// イベントのシリアライズに失敗
    #[error("failed to serialize event: {0}")]
    Serialization(String),
}
