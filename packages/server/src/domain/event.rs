//! Outbound chat events.
//!
//! UseCase 層が生成し、MessagePusher がワイヤ形式に変換して送信します。

use super::{
    entity::ChatMessage,
    value_object::{ChannelId, Nickname},
};

/// サーバーからクライアントへ通知するイベント
#[derive(Debug, Clone, PartialEq)]
pub enum ChatEvent {
    /// ログイン拒否・未ログイン操作の通知（要求元のみ）
    LoginRejected { reason: String },
    /// 参加通知（チャンネル全体）
    UserJoined { nickname: Nickname },
    /// セッション開始（要求元のみ）
    SessionStarted {
        users: Vec<Nickname>,
        channel_id: ChannelId,
    },
    /// バックログの再送（要求元のみ）
    History { messages: Vec<ChatMessage> },
    /// 新着メッセージ（送信者を含むチャンネル全体）
    NewMessage(ChatMessage),
    /// 入力中ステータス（送信者以外）
    Typing { nickname: Nickname, is_typing: bool },
    /// 退出通知（残りの参加者）
    UserLeft { nickname: Nickname },
}

impl ChatEvent {
    /// ログ出力用のイベント名
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoginRejected { .. } => "force-login",
            Self::UserJoined { .. } => "ue",
            Self::SessionStarted { .. } => "start",
            Self::History { .. } => "previous-msg",
            Self::NewMessage(_) => "new-msg",
            Self::Typing { .. } => "typing",
            Self::UserLeft { .. } => "ul",
        }
    }
}
