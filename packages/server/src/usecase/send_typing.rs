//! UseCase: 入力中ステータスの通知

use std::sync::Arc;

use crate::domain::{ChatEvent, ConnectionId, MessagePusher, SessionRepository};

use super::error::SendTypingError;

/// 入力中ステータス通知のユースケース
///
/// 保存もレート制限も行わず、送信者以外のチャンネル参加者に中継するだけです。
pub struct SendTypingUseCase {
    session_repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl SendTypingUseCase {
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            session_repository,
            message_pusher,
        }
    }

    /// 通知先の接続 ID を返します。未ログインの接続からの要求は何も送信しません。
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        is_typing: bool,
    ) -> Result<Vec<ConnectionId>, SendTypingError> {
        let session = self
            .session_repository
            .find(&connection_id)
            .await
            .ok_or(SendTypingError::NotLoggedIn)?;
        let (nickname, channel_id) = session.identity().ok_or(SendTypingError::NotLoggedIn)?;

        let targets: Vec<ConnectionId> = self
            .session_repository
            .connections_in_channel(channel_id)
            .await
            .into_iter()
            .filter(|id| *id != connection_id)
            .collect();

        self.message_pusher
            .broadcast(
                targets.clone(),
                &ChatEvent::Typing {
                    nickname: nickname.clone(),
                    is_typing,
                },
            )
            .await?;

        Ok(targets)
    }
}
