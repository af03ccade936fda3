//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    Channel, ChannelId, ChatMessage, ConnectionId, MessageContent, Nickname, RepositoryError,
    Session, Timestamp,
};

/// Channel Repository trait（Channel Store）
///
/// 全ての Channel の所有者。UseCase 層はこの trait 経由でのみ Channel を変更します。
/// チャンネルは参照時に遅延生成され、削除されることはありません。
#[async_trait]
pub trait ChannelRepository: Send + Sync {
    /// チャンネルを取得（存在しない場合は生成しない）
    async fn find_channel(&self, channel_id: &ChannelId) -> Option<Channel>;

    /// 全チャンネルを ID 順に取得
    async fn list_channels(&self) -> Vec<Channel>;

    /// 参加者を追加（チャンネルが無ければ生成）し、追加後のチャンネルを返す
    async fn add_member(
        &self,
        channel_id: &ChannelId,
        nickname: Nickname,
    ) -> Result<Channel, RepositoryError>;

    /// 参加者を削除
    async fn remove_member(
        &self,
        channel_id: &ChannelId,
        nickname: &Nickname,
    ) -> Result<(), RepositoryError>;

    /// メッセージを採番してバックログに追加（チャンネルが無ければ生成）
    async fn post_message(
        &self,
        channel_id: &ChannelId,
        from: Nickname,
        content: MessageContent,
        timestamp: Timestamp,
    ) -> Result<ChatMessage, RepositoryError>;
}

/// Session Repository trait（Connection Registry）
///
/// 接続ごとの Session の所有者。1 接続につき 1 エントリ。
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// 新しい接続を登録
    async fn register(&self, session: Session);

    /// Session を取得
    async fn find(&self, connection_id: &ConnectionId) -> Option<Session>;

    /// Session の状態を更新
    async fn save(&self, session: Session) -> Result<(), RepositoryError>;

    /// Session を削除し、削除前の Session を返す
    async fn remove(&self, connection_id: &ConnectionId) -> Option<Session>;

    /// 指定チャンネルにログインしている接続 ID を取得（ブロードキャストグループ）
    async fn connections_in_channel(&self, channel_id: &ChannelId) -> Vec<ConnectionId>;

    /// 登録中の接続数
    async fn count(&self) -> usize;
}
