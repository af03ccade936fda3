//! UseCase: ログイン処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LoginUseCase::execute() メソッド
//! - ニックネームの検証、チャンネルへの参加、参加時の通知順序
//!
//! ### なぜこのテストが必要か
//! - 同一チャンネル内でニックネームが一意であることを保証する
//! - 参加者が ue → start → previous-msg の順で通知を受け取ることを確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：既定チャンネル・指定チャンネルへのログイン
//! - 異常系：空のニックネーム、重複ニックネーム、ログイン済みでの再ログイン
//! - エッジケース：別チャンネルでの同名ログイン

use std::sync::Arc;

use crate::domain::{
    Channel, ChannelError, ChannelId, ChannelRepository, ChatEvent, ConnectionId, MessagePusher,
    Nickname, RepositoryError, SessionRepository, SessionState,
};

use super::error::LoginError;

/// ログインのユースケース
pub struct LoginUseCase {
    channel_repository: Arc<dyn ChannelRepository>,
    session_repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl LoginUseCase {
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

    /// ログインを実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 要求元の接続
    /// * `nick` - 要求されたニックネーム（トリム前）
    /// * `channel` - 要求されたチャンネル（未指定・空文字列は `main`）
    ///
    /// # Returns
    ///
    /// * `Ok(Channel)` - 参加後のチャンネル
    /// * `Err(LoginError)` - ログイン失敗。検証エラーは要求元に `force-login` で通知済み
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        nick: String,
        channel: Option<String>,
    ) -> Result<Channel, LoginError> {
        let mut session = self
            .session_repository
            .find(&connection_id)
            .await
            .ok_or_else(|| LoginError::UnknownConnection(connection_id.to_string()))?;

        // 1. 再ログインは状態を変えずに無視する
        if let SessionState::LoggedIn { nickname, .. } = &session.state {
            tracing::warn!(
                "Connection '{}' is already logged in as '{}', ignoring login",
                connection_id,
                nickname
            );
            return Err(LoginError::AlreadyLoggedIn(nickname.as_str().to_string()));
        }

        // 2. ニックネームの検証
        let Ok(nickname) = Nickname::new(&nick) else {
            return self.reject(&connection_id, LoginError::EmptyNickname).await;
        };

        // 3. チャンネルへの参加（重複チェックを含む）
        let channel_id = ChannelId::resolve(channel);
        let channel = match self
            .channel_repository
            .add_member(&channel_id, nickname.clone())
            .await
        {
            Ok(channel) => channel,
            Err(RepositoryError::Channel(ChannelError::DuplicateNickname(_))) => {
                return self
                    .reject(&connection_id, LoginError::DuplicateNickname)
                    .await;
            }
            Err(e) => return Err(e.into()),
        };

        // 4. Session を LoggedIn に遷移（ブロードキャストグループへの参加）
        session.login(nickname.clone(), channel_id.clone())?;
        self.session_repository.save(session).await?;
        tracing::info!("'{}' joined channel '{}'", nickname, channel_id);

        // 5. 通知: ue（チャンネル全体）→ start → previous-msg（要求元のみ）
        let targets = self
            .session_repository
            .connections_in_channel(&channel_id)
            .await;
        self.message_pusher
            .broadcast(targets, &ChatEvent::UserJoined { nickname })
            .await?;
        self.message_pusher
            .push_to(
                &connection_id,
                &ChatEvent::SessionStarted {
                    users: channel.members.clone(),
                    channel_id,
                },
            )
            .await?;
        self.message_pusher
            .push_to(
                &connection_id,
                &ChatEvent::History {
                    messages: channel.history(),
                },
            )
            .await?;

        Ok(channel)
    }

    /// 検証エラーを要求元に通知し、エラーを返す
    async fn reject(
        &self,
        connection_id: &ConnectionId,
        error: LoginError,
    ) -> Result<Channel, LoginError> {
        tracing::info!("Login rejected for '{}': {}", connection_id, error);
        let event = ChatEvent::LoginRejected {
            reason: error.to_string(),
        };
        if let Err(e) = self.message_pusher.push_to(connection_id, &event).await {
            tracing::warn!("Failed to notify login rejection: {}", e);
        }
        Err(error)
    }
}
