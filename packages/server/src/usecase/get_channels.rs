//! UseCase: チャンネル一覧の取得

use std::sync::Arc;

use crate::domain::{Channel, ChannelRepository};

/// チャンネル一覧取得のユースケース
pub struct GetChannelsUseCase {
    channel_repository: Arc<dyn ChannelRepository>,
}

impl GetChannelsUseCase {
    pub fn new(channel_repository: Arc<dyn ChannelRepository>) -> Self {
        Self { channel_repository }
    }

    /// 全チャンネルを ID 順に返す
    pub async fn execute(&self) -> Vec<Channel> {
        self.channel_repository.list_channels().await
    }
}
