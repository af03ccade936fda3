//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use super::websocket::MessageDto;

/// Channel summary for `GET /api/channels`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChannelSummaryDto {
    pub id: String,
    pub users: Vec<String>,
    pub message_count: usize,
    pub created_at: String,
}

/// Channel detail for `GET /api/channels/{channel_id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChannelDetailDto {
    pub id: String,
    pub users: Vec<String>,
    pub messages: Vec<MessageDto>,
    pub next_message_id: String,
    pub created_at: String,
}
