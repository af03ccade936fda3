//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectUseCase::execute() メソッド
//! - 参加者リストからの削除と ul の通知
//!
//! ### なぜこのテストが必要か
//! - ログイン済みの切断で ul がちょうど 1 回届くことを保証する
//! - 未ログインの切断では何も通知されないことを確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：ログイン済み接続の切断
//! - エッジケース：未ログイン接続の切断、同じ接続の 2 回目の切断

use std::sync::Arc;

use crate::domain::{
    ChannelId, ChannelRepository, ChatEvent, ConnectionId, MessagePusher, Nickname,
    RepositoryError, SessionRepository,
};

/// 切断処理の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisconnectOutcome {
    /// 未ログインのまま切断された
    Anonymous,
    /// チャンネルから退出した
    LeftChannel {
        nickname: Nickname,
        channel_id: ChannelId,
        /// ul を通知した接続数
        notified: usize,
    },
    /// 既に切断処理済み
    AlreadyGone,
}

/// 切断処理のユースケース
pub struct DisconnectUseCase {
    channel_repository: Arc<dyn ChannelRepository>,
    session_repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectUseCase {
    pub fn new(
        channel_repository: Arc<dyn ChannelRepository>,
        session_repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            channel_repository,
            session_repository,
            message_pusher,
        }
    }

    /// 切断を実行
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
    ) -> Result<DisconnectOutcome, RepositoryError> {
        // 1. Connection Registry と送信先から外す
        let Some(mut session) = self.session_repository.remove(&connection_id).await else {
            return Ok(DisconnectOutcome::AlreadyGone);
        };
        self.message_pusher.unregister_client(&connection_id).await;

        // 2. Disconnected に遷移
        let Some((nickname, channel_id)) = session.disconnect() else {
            tracing::info!("Anonymous connection '{}' closed", connection_id);
            return Ok(DisconnectOutcome::Anonymous);
        };

        // 3. 参加者リストから削除し、残りの参加者に通知
        self.channel_repository
            .remove_member(&channel_id, &nickname)
            .await?;
        let targets = self
            .session_repository
            .connections_in_channel(&channel_id)
            .await;
        let notified = targets.len();
        if let Err(e) = self
            .message_pusher
            .broadcast(
                targets,
                &ChatEvent::UserLeft {
                    nickname: nickname.clone(),
                },
            )
            .await
        {
            tracing::warn!("Failed to broadcast user-left for '{}': {}", nickname, e);
        }
        tracing::info!("'{}' left channel '{}'", nickname, channel_id);

        Ok(DisconnectOutcome::LeftChannel {
            nickname,
            channel_id,
            notified,
        })
    }
}
