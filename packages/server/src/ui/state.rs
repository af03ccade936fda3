//! Shared application state.

use std::{sync::Arc, time::Duration};

use crate::usecase::{DispatcherHandle, GetChannelDetailUseCase, GetChannelsUseCase};

/// Shared application state
pub struct AppState {
    /// 状態を変更する要求の投入口（single-writer dispatcher）
    pub dispatcher: DispatcherHandle,
    /// GetChannelsUseCase（チャンネル一覧取得のユースケース）
    pub get_channels_usecase: Arc<GetChannelsUseCase>,
    /// GetChannelDetailUseCase（チャンネル詳細取得のユースケース）
    pub get_channel_detail_usecase: Arc<GetChannelDetailUseCase>,
    /// WebSocket 接続ごとの設定
    pub connection: ConnectionSettings,
}

/// Per-connection transport settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionSettings {
    /// 受信フレームの最大サイズ（バイト）
    pub max_message_size: usize,
    /// サーバーから Ping を送る間隔
    pub ping_interval: Duration,
    /// この時間フレームを受信しなければ接続を切断する
    pub idle_timeout: Duration,
}
