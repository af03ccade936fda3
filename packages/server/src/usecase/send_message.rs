//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - メッセージの採番、バックログへの追加、チャンネル全体へのブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 送信者を含むチャンネル全員に new-msg が 1 回ずつ届くことを保証する
//! - バックログ容量を超えたときに最も古いメッセージが押し出されることを確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：テキスト・添付ファイルの送信
//! - 異常系：未ログインでの送信
//! - エッジケース：容量 2 のチャンネルに 3 件送信

use std::sync::Arc;

use chanrelay_shared::time::Clock;

use crate::domain::{
    ChannelRepository, ChatEvent, ChatMessage, ConnectionId, MessageContent, MessagePusher,
    SessionRepository, Timestamp,
};

use super::error::SendMessageError;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    channel_repository: Arc<dyn ChannelRepository>,
    session_repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    pub fn new(
        channel_repository: Arc<dyn ChannelRepository>,
        session_repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            channel_repository,
            session_repository,
            message_pusher,
            clock,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - 採番済みのメッセージ
    /// * `Err(SendMessageError::Unauthenticated)` - 未ログイン。要求元に `force-login` で通知済み
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        content: MessageContent,
    ) -> Result<ChatMessage, SendMessageError> {
        let session = self.session_repository.find(&connection_id).await;
        let Some((nickname, channel_id)) = session
            .as_ref()
            .and_then(|session| session.identity())
            .map(|(nickname, channel_id)| (nickname.clone(), channel_id.clone()))
        else {
            let error = SendMessageError::Unauthenticated;
            let event = ChatEvent::LoginRejected {
                reason: error.to_string(),
            };
            if let Err(e) = self.message_pusher.push_to(&connection_id, &event).await {
                tracing::warn!("Failed to notify unauthenticated sender: {}", e);
            }
            return Err(error);
        };

        // 1. 採番してバックログに追加
        let timestamp = Timestamp::new(self.clock.now_millis());
        let message = self
            .channel_repository
            .post_message(&channel_id, nickname, content, timestamp)
            .await?;
        tracing::debug!(
            "Message '{}' from '{}' stored in channel '{}'",
            message.id,
            message.from,
            channel_id
        );

        // 2. 送信者を含むチャンネル全体にブロードキャスト
        let targets = self
            .session_repository
            .connections_in_channel(&channel_id)
            .await;
        self.message_pusher
            .broadcast(targets, &ChatEvent::NewMessage(message.clone()))
            .await?;

        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ChannelId;
    use crate::usecase::test_support::{FIXED_NOW, Fixture, drain};
    use serde_json::json;

    fn create_usecase(fixture: &Fixture) -> SendMessageUseCase {
        SendMessageUseCase::new(
            fixture.channels.clone(),
            fixture.sessions.clone(),
            fixture.pusher.clone(),
            fixture.clock.clone(),
        )
    }

    #[tokio::test]
    async fn test_send_message_reaches_whole_channel_once() {
        // テスト項目: new-msg が送信者を含むチャンネル全員に 1 回ずつ届く
        // given (前提条件):
        let fixture = Fixture::new(10);
        let (alice, mut alice_rx) = fixture.join("alice", None).await;
        let (_bob, mut bob_rx) = fixture.join("bob", None).await;
        let (_carol, mut carol_rx) = fixture.join("carol", Some("rust")).await;
        drain(&mut alice_rx);
        let usecase = create_usecase(&fixture);

        // when (操作):
        let message = usecase
            .execute(alice, MessageContent::text("hello"))
            .await
            .unwrap();

        // then (期待する結果):
        let expected = json!({
            "type": "new-msg",
            "data": {"f": "alice", "m": "hello", "t": FIXED_NOW, "id": "msg_1"}
        });
        assert_eq!(message.id.to_string(), "msg_1");
        assert_eq!(drain(&mut alice_rx), vec![expected.clone()]);
        assert_eq!(drain(&mut bob_rx), vec![expected]);
        assert!(drain(&mut carol_rx).is_empty());
    }

    #[tokio::test]
    async fn test_send_message_relays_attachment_verbatim() {
        // テスト項目: 添付ファイル形式の本文が加工されずに中継される
        // given (前提条件):
        let fixture = Fixture::new(0);
        let (alice, mut alice_rx) = fixture.join("alice", None).await;
        let attachment = json!({"type": "image/png", "url": "data:image/png;base64,AAAA", "name": "a.png"});
        let usecase = create_usecase(&fixture);

        // when (操作):
        usecase
            .execute(alice, MessageContent::new(attachment.clone()))
            .await
            .unwrap();

        // then (期待する結果):
        let frames = drain(&mut alice_rx);
        assert_eq!(frames[0]["data"]["m"], attachment);
    }

    #[tokio::test]
    async fn test_send_message_unauthenticated() {
        // テスト項目: 未ログインの接続からの送信は force-login で拒否され、保存されない
        // given (前提条件):
        let fixture = Fixture::new(10);
        let (_alice, mut alice_rx) = fixture.join("alice", None).await;
        let (anonymous, mut rx) = fixture.connect().await;
        let usecase = create_usecase(&fixture);

        // when (操作):
        let result = usecase
            .execute(anonymous, MessageContent::text("hello"))
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(SendMessageError::Unauthenticated));
        assert_eq!(
            drain(&mut rx),
            vec![json!({"type": "force-login", "data": "You need to be logged in to send message."})]
        );
        assert!(drain(&mut alice_rx).is_empty());
        let main = fixture
            .channels
            .find_channel(&ChannelId::default())
            .await
            .unwrap();
        assert!(main.backlog.is_empty());
        assert_eq!(main.next_message_id().to_string(), "msg_1");
    }

    #[tokio::test]
    async fn test_backlog_eviction_and_late_joiner_history() {
        // テスト項目: 容量 2 で 3 件送信すると [b, c] が残り、後から参加した bob は [b, c] を受け取る
        // given (前提条件):
        let fixture = Fixture::new(2);
        let (alice, _alice_rx) = fixture.join("alice", None).await;
        let usecase = create_usecase(&fixture);
        for text in ["a", "b", "c"] {
            usecase
                .execute(alice, MessageContent::text(text))
                .await
                .unwrap();
        }

        // when (操作):
        let (bob, mut bob_rx) = fixture.connect().await;
        fixture
            .login_usecase()
            .execute(bob, "bob".to_string(), None)
            .await
            .unwrap();

        // then (期待する結果):
        let frames = drain(&mut bob_rx);
        assert_eq!(
            frames[2],
            json!({
                "type": "previous-msg",
                "data": {"msgs": [
                    {"f": "alice", "m": "b", "t": FIXED_NOW, "id": "msg_2"},
                    {"f": "alice", "m": "c", "t": FIXED_NOW, "id": "msg_3"}
                ]}
            })
        );
    }
}
