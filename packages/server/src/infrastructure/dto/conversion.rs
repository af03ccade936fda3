//! Conversion logic between domain entities and DTOs.

use chanrelay_shared::time::timestamp_to_rfc3339;

use crate::domain::{Channel, ChatEvent, ChatMessage, Nickname};
use crate::infrastructure::dto::{
    http::{ChannelDetailDto, ChannelSummaryDto},
    websocket::{
        MessageDto, NickPayload, PreviousMsgPayload, ServerMessage, StartPayload, TypingPayload,
    },
};

fn nicknames_to_strings(nicknames: &[Nickname]) -> Vec<String> {
    nicknames.iter().map(|n| n.as_str().to_string()).collect()
}

// ========================================
// Domain Entity → WebSocket DTO
// ========================================

impl From<ChatMessage> for MessageDto {
    fn from(model: ChatMessage) -> Self {
        Self {
            f: model.from.into_string(),
            m: model.content.into_value(),
            t: model.timestamp.value(),
            id: model.id.to_string(),
        }
    }
}

impl From<ChatEvent> for ServerMessage {
    fn from(event: ChatEvent) -> Self {
        match event {
            ChatEvent::LoginRejected { reason } => Self::ForceLogin(reason),
            ChatEvent::UserJoined { nickname } => Self::UserJoined(NickPayload {
                nick: nickname.into_string(),
            }),
            ChatEvent::SessionStarted { users, channel_id } => Self::Start(StartPayload {
                users: nicknames_to_strings(&users),
                channel: channel_id.into_string(),
            }),
            ChatEvent::History { messages } => Self::PreviousMsg(PreviousMsgPayload {
                msgs: messages.into_iter().map(MessageDto::from).collect(),
            }),
            ChatEvent::NewMessage(message) => Self::NewMsg(message.into()),
            ChatEvent::Typing {
                nickname,
                is_typing,
            } => Self::Typing(TypingPayload {
                status: is_typing,
                nick: nickname.into_string(),
            }),
            ChatEvent::UserLeft { nickname } => Self::UserLeft(NickPayload {
                nick: nickname.into_string(),
            }),
        }
    }
}

// ========================================
// Domain Entity → HTTP DTO
// ========================================

impl From<&Channel> for ChannelSummaryDto {
    fn from(channel: &Channel) -> Self {
        Self {
            id: channel.id.as_str().to_string(),
            users: nicknames_to_strings(&channel.members),
            message_count: channel.backlog.len(),
            created_at: timestamp_to_rfc3339(channel.created_at.value()),
        }
    }
}

impl From<Channel> for ChannelDetailDto {
    fn from(channel: Channel) -> Self {
        Self {
            id: channel.id.as_str().to_string(),
            users: nicknames_to_strings(&channel.members),
            next_message_id: channel.next_message_id().to_string(),
            created_at: timestamp_to_rfc3339(channel.created_at.value()),
            messages: channel.backlog.into_iter().map(MessageDto::from).collect(),
        }
    }
}
