//! InMemory Repository 実装
//!
//! 永続化は行いません。プロセスの終了とともに全ての状態は失われます。

mod channel;
mod session;

pub use channel::InMemoryChannelRepository;
pub use session::InMemorySessionRepository;
