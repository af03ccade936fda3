//! Infrastructure layer: DTOs, repositories and message pushers.

pub mod dto;
pub mod message_pusher;
pub mod repository;
