//! UseCase: 接続受付処理
//!
//! 新しい WebSocket 接続を Anonymous 状態の Session として登録し、
//! 送信キューを MessagePusher に登録します。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, PusherChannel, Session, SessionRepository};

/// 接続受付のユースケース
pub struct ConnectUseCase {
    session_repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectUseCase {
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            session_repository,
            message_pusher,
        }
    }

    /// 接続を登録する
    ///
    /// 登録後の接続数を返します。
    pub async fn execute(&self, connection_id: ConnectionId, sender: PusherChannel) -> usize {
        self.session_repository
            .register(Session::new(connection_id))
            .await;
        self.message_pusher
            .register_client(connection_id, sender)
            .await;

        let count = self.session_repository.count().await;
        tracing::info!(
            "Connection '{}' accepted ({} connected)",
            connection_id,
            count
        );
        count
    }
}
