//! UseCase テスト用の共通フィクスチャ

use std::sync::Arc;

use chanrelay_shared::time::FixedClock;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::{
    domain::{BacklogCapacity, ConnectionId, ConnectionIdFactory},
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryChannelRepository, InMemorySessionRepository},
    },
};

use super::{ConnectUseCase, LoginUseCase};

pub const FIXED_NOW: i64 = 1_672_531_200_000;

/// 実装の Repository と MessagePusher を組み合わせたテスト環境
pub struct Fixture {
    pub channels: Arc<InMemoryChannelRepository>,
    pub sessions: Arc<InMemorySessionRepository>,
    pub pusher: Arc<WebSocketMessagePusher>,
    pub clock: Arc<FixedClock>,
}

impl Fixture {
    pub fn new(capacity: usize) -> Self {
        let clock = Arc::new(FixedClock::new(FIXED_NOW));
        Self {
            channels: Arc::new(InMemoryChannelRepository::new(
                BacklogCapacity::new(capacity),
                clock.clone(),
            )),
            sessions: Arc::new(InMemorySessionRepository::new()),
            pusher: Arc::new(WebSocketMessagePusher::default()),
            clock,
        }
    }

    pub fn login_usecase(&self) -> LoginUseCase {
        LoginUseCase::new(
            self.channels.clone(),
            self.sessions.clone(),
            self.pusher.clone(),
        )
    }

    /// 新しい接続を登録し、送信キューの受信側を返す
    pub async fn connect(&self) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let connection_id = ConnectionIdFactory::generate();
        let (tx, rx) = mpsc::unbounded_channel();
        ConnectUseCase::new(self.sessions.clone(), self.pusher.clone())
            .execute(connection_id, tx)
            .await;
        (connection_id, rx)
    }

    /// 接続してログインまで済ませ、ログイン時のフレームは読み捨てる
    pub async fn join(
        &self,
        nick: &str,
        channel: Option<&str>,
    ) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let (connection_id, mut rx) = self.connect().await;
        self.login_usecase()
            .execute(
                connection_id,
                nick.to_string(),
                channel.map(str::to_string),
            )
            .await
            .expect("login should succeed");
        drain(&mut rx);
        (connection_id, rx)
    }
}

/// 受信済みのフレームを全て取り出して JSON として返す
pub fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<Value> {
    let mut frames = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        frames.push(serde_json::from_str(&frame).expect("frame should be valid JSON"));
    }
    frames
}

/// フレームの type 一覧
pub fn types(frames: &[Value]) -> Vec<&str> {
    frames
        .iter()
        .map(|frame| frame["type"].as_str().unwrap_or_default())
        .collect()
}
