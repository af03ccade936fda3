//! UseCase: チャンネル詳細の取得

use std::sync::Arc;

use crate::domain::{Channel, ChannelId, ChannelRepository};

use super::error::GetChannelDetailError;

/// チャンネル詳細取得のユースケース
///
/// 参照のみで、存在しないチャンネルを生成することはありません。
pub struct GetChannelDetailUseCase {
    channel_repository: Arc<dyn ChannelRepository>,
}

impl GetChannelDetailUseCase {
    pub fn new(channel_repository: Arc<dyn ChannelRepository>) -> Self {
        Self { channel_repository }
    }

    pub async fn execute(&self, channel_id: String) -> Result<Channel, GetChannelDetailError> {
        let id = ChannelId::new(channel_id.clone());
        self.channel_repository
            .find_channel(&id)
            .await
            .ok_or(GetChannelDetailError::ChannelNotFound(channel_id))
    }
}
