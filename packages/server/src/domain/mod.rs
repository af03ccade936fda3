//! Domain layer for the chat relay.
//!
//! This module contains business rules that are independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod event;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{Channel, ChatMessage, Session, SessionState};
pub use error::{ChannelError, MessagePushError, RepositoryError, SessionError, ValueObjectError};
pub use event::ChatEvent;
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::{ChannelRepository, SessionRepository};
pub use value_object::{
    BacklogCapacity, ChannelId, ConnectionId, ConnectionIdFactory, MessageContent, MessageId,
    Nickname, Timestamp,
};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
