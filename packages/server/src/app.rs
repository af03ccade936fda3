//! Dependency wiring.
//!
//! Dependencies are created in order:
//! 1. Repositories
//! 2. MessagePusher
//! 3. UseCases and the dispatcher task
//! 4. Server

use std::sync::Arc;

use chanrelay_shared::time::{Clock, SystemClock};
use tokio::task::JoinHandle;

use crate::{
    config::ServerConfig,
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryChannelRepository, InMemorySessionRepository},
    },
    ui::Server,
    usecase::{
        ConnectUseCase, DisconnectUseCase, Dispatcher, GetChannelDetailUseCase,
        GetChannelsUseCase, LoginUseCase, SendMessageUseCase, SendTypingUseCase,
    },
};

/// Build the server and spawn its dispatcher task.
///
/// Must be called from within a Tokio runtime.
pub fn build(config: &ServerConfig) -> (Server, JoinHandle<()>) {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // 1. Repositories (in-memory)
    let channel_repository = Arc::new(InMemoryChannelRepository::new(
        config.backlog_capacity(),
        clock.clone(),
    ));
    let session_repository = Arc::new(InMemorySessionRepository::new());

    // 2. MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::default());

    // 3. UseCases
    let dispatcher = Dispatcher::new(
        Arc::new(ConnectUseCase::new(
            session_repository.clone(),
            message_pusher.clone(),
        )),
        Arc::new(LoginUseCase::new(
            channel_repository.clone(),
            session_repository.clone(),
            message_pusher.clone(),
        )),
        Arc::new(SendMessageUseCase::new(
            channel_repository.clone(),
            session_repository.clone(),
            message_pusher.clone(),
            clock,
        )),
        Arc::new(SendTypingUseCase::new(
            session_repository.clone(),
            message_pusher.clone(),
        )),
        Arc::new(DisconnectUseCase::new(
            channel_repository.clone(),
            session_repository,
            message_pusher,
        )),
    );
    let (handle, dispatcher_task) = dispatcher.spawn();

    let get_channels_usecase = Arc::new(GetChannelsUseCase::new(channel_repository.clone()));
    let get_channel_detail_usecase = Arc::new(GetChannelDetailUseCase::new(channel_repository));

    // 4. Server
    let server = Server::new(
        handle,
        get_channels_usecase,
        get_channel_detail_usecase,
        config.connection_settings(),
    );
    (server, dispatcher_task)
}
