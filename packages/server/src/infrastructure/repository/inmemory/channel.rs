//! InMemory Channel Repository 実装
//!
//! ドメイン層が定義する ChannelRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chanrelay_shared::time::Clock;
use tokio::sync::Mutex;

use crate::domain::{
    BacklogCapacity, Channel, ChannelId, ChannelRepository, ChatMessage, MessageContent, Nickname,
    RepositoryError, Timestamp,
};

/// インメモリ Channel Repository 実装
///
/// 全チャンネルを保持し、ドメイン層の ChannelRepository trait を実装します（依存性の逆転）。
/// 既定チャンネル `main` は生成時に作成されます。
pub struct InMemoryChannelRepository {
    /// チャンネル ID → Channel
    channels: Mutex<HashMap<ChannelId, Channel>>,
    /// 新しく作成するチャンネルのバックログ容量
    capacity: BacklogCapacity,
    /// チャンネル作成時刻の取得元
    clock: Arc<dyn Clock>,
}

impl InMemoryChannelRepository {
    /// 新しい InMemoryChannelRepository を作成
    pub fn new(capacity: BacklogCapacity, clock: Arc<dyn Clock>) -> Self {
        let main = Channel::new(
            ChannelId::default(),
            capacity,
            Timestamp::new(clock.now_millis()),
        );
        let mut channels = HashMap::new();
        channels.insert(main.id.clone(), main);

        Self {
            channels: Mutex::new(channels),
            capacity,
            clock,
        }
    }

    fn get_or_create<'a>(
        &self,
        channels: &'a mut HashMap<ChannelId, Channel>,
        channel_id: &ChannelId,
    ) -> &'a mut Channel {
        channels.entry(channel_id.clone()).or_insert_with(|| {
            tracing::info!("Channel '{}' created", channel_id);
            Channel::new(
                channel_id.clone(),
                self.capacity,
                Timestamp::new(self.clock.now_millis()),
            )
        })
    }
}

#[async_trait]
impl ChannelRepository for InMemoryChannelRepository {
    async fn find_channel(&self, channel_id: &ChannelId) -> Option<Channel> {
        let channels = self.channels.lock().await;
        channels.get(channel_id).cloned()
    }

    async fn list_channels(&self) -> Vec<Channel> {
        let channels = self.channels.lock().await;
        let mut list: Vec<Channel> = channels.values().cloned().collect();
        list.sort_by(|a, b| a.id.cmp(&b.id));
        list
    }

    async fn add_member(
        &self,
        channel_id: &ChannelId,
        nickname: Nickname,
    ) -> Result<Channel, RepositoryError> {
        let mut channels = self.channels.lock().await;
        let channel = self.get_or_create(&mut channels, channel_id);
        channel.add_member(nickname)?;
        Ok(channel.clone())
    }

    async fn remove_member(
        &self,
        channel_id: &ChannelId,
        nickname: &Nickname,
    ) -> Result<(), RepositoryError> {
        let mut channels = self.channels.lock().await;
        let channel = channels
            .get_mut(channel_id)
            .ok_or_else(|| RepositoryError::ChannelNotFound(channel_id.as_str().to_string()))?;

        if !channel.remove_member(nickname) {
            tracing::warn!(
                "Nickname '{}' was not a member of channel '{}'",
                nickname,
                channel_id
            );
        }
        Ok(())
    }

    async fn post_message(
        &self,
        channel_id: &ChannelId,
        from: Nickname,
        content: MessageContent,
        timestamp: Timestamp,
    ) -> Result<ChatMessage, RepositoryError> {
        let mut channels = self.channels.lock().await;
        let channel = self.get_or_create(&mut channels, channel_id);
        Ok(channel.post_message(from, content, timestamp))
    }
}
