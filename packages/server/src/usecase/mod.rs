//! UseCase layer.
//!
//! Each use case is a thin orchestration over the repositories and the
//! message pusher. State-changing use cases are driven by the dispatcher.

pub mod connect;
pub mod disconnect;
pub mod dispatcher;
pub mod error;
pub mod get_channel_detail;
pub mod get_channels;
pub mod login;
pub mod send_message;
pub mod send_typing;

#[cfg(test)]
mod test_support;

pub use connect::ConnectUseCase;
pub use disconnect::{DisconnectOutcome, DisconnectUseCase};
pub use dispatcher::{Command, Dispatcher, DispatcherHandle, InboundEvent};
pub use error::{
    DispatchError, GetChannelDetailError, LoginError, SendMessageError, SendTypingError,
};
pub use get_channel_detail::GetChannelDetailUseCase;
pub use get_channels::GetChannelsUseCase;
pub use login::LoginUseCase;
pub use send_message::SendMessageUseCase;
pub use send_typing::SendTypingUseCase;
