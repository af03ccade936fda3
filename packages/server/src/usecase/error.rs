//! UseCase layer errors.
//!
//! `force-login` で要求元に通知されるエラーは、Display がそのままクライアントに
//! 送られる理由文字列になります。

use thiserror::Error;

use crate::domain::{MessagePushError, RepositoryError, SessionError};

/// ログイン処理のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoginError {
    #[error("Nick can't be empty.")]
    EmptyNickname,

    #[error("This nick is already in this channel.")]
    DuplicateNickname,

    #[error("connection is already logged in as '{0}'")]
    AlreadyLoggedIn(String),

    #[error("connection '{0}' is not registered")]
    UnknownConnection(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Push(#[from] MessagePushError),
}

impl From<SessionError> for LoginError {
    fn from(error: SessionError) -> Self {
        match error {
            SessionError::AlreadyLoggedIn(nickname) => Self::AlreadyLoggedIn(nickname),
            SessionError::Disconnected => Self::UnknownConnection("disconnected".to_string()),
        }
    }
}

impl LoginError {
    /// 要求元に `force-login` として通知すべきエラーかどうか
    pub fn is_client_facing(&self) -> bool {
        matches!(self, Self::EmptyNickname | Self::DuplicateNickname)
    }
}

/// メッセージ送信のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SendMessageError {
    #[error("You need to be logged in to send message.")]
    Unauthenticated,

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Push(#[from] MessagePushError),
}

/// 入力中ステータス送信のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SendTypingError {
    /// 未ログインの接続からの typing（クライアントには通知しない）
    #[error("typing ignored for a connection that is not logged in")]
    NotLoggedIn,

    #[error(transparent)]
    Push(#[from] MessagePushError),
}

/// チャンネル詳細取得のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GetChannelDetailError {
    #[error("channel '{0}' not found")]
    ChannelNotFound(String),
}

/// Dispatcher への投入エラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// Dispatcher タスクが終了している
    #[error("dispatcher is closed")]
    Closed,
}
