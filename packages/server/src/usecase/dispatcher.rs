//! Central dispatch loop.
//!
//! This task owns every state mutation of the relay. Connection tasks decode
//! inbound frames into [`Command`]s and submit them through a
//! [`DispatcherHandle`]; the loop runs each one to completion, including all
//! outbound enqueues, before taking the next.

use std::sync::Arc;

use tokio::{sync::mpsc, task::JoinHandle};

use crate::domain::{ConnectionId, MessageContent, PusherChannel};

use super::{
    ConnectUseCase, DisconnectUseCase, LoginUseCase, SendMessageUseCase, SendTypingUseCase,
    error::{DispatchError, SendTypingError},
};

/// Inbound action of one connection.
#[derive(Debug)]
pub enum Command {
    /// A socket was accepted; register its outbound queue.
    Connect(PusherChannel),
    Login {
        nick: String,
        channel: Option<String>,
    },
    SendMessage(MessageContent),
    Typing(bool),
    /// The socket closed.
    Disconnect,
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::Connect(_) => "connect",
            Self::Login { .. } => "login",
            Self::SendMessage(_) => "send-msg",
            Self::Typing(_) => "typing",
            Self::Disconnect => "disconnect",
        }
    }
}

#[derive(Debug)]
pub struct InboundEvent {
    pub connection_id: ConnectionId,
    pub command: Command,
}

/// Cloneable sender side of the dispatch queue.
#[derive(Clone)]
pub struct DispatcherHandle {
    tx: mpsc::UnboundedSender<InboundEvent>,
}

impl DispatcherHandle {
    pub fn submit(&self, connection_id: ConnectionId, command: Command) -> Result<(), DispatchError> {
        self.tx
            .send(InboundEvent {
                connection_id,
                command,
            })
            .map_err(|_| DispatchError::Closed)
    }
}

/// Use cases driven by the dispatch loop.
pub struct Dispatcher {
    connect: Arc<ConnectUseCase>,
    login: Arc<LoginUseCase>,
    send_message: Arc<SendMessageUseCase>,
    send_typing: Arc<SendTypingUseCase>,
    disconnect: Arc<DisconnectUseCase>,
}

impl Dispatcher {
    pub fn new(
        connect: Arc<ConnectUseCase>,
        login: Arc<LoginUseCase>,
        send_message: Arc<SendMessageUseCase>,
        send_typing: Arc<SendTypingUseCase>,
        disconnect: Arc<DisconnectUseCase>,
    ) -> Self {
        Self {
            connect,
            login,
            send_message,
            send_typing,
            disconnect,
        }
    }

    /// Spawn the dispatch loop and return the handle used to feed it.
    pub fn spawn(self) -> (DispatcherHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(self.run(rx));
        (DispatcherHandle { tx }, task)
    }

    /// Process events until every handle has been dropped.
    pub async fn run(self, mut rx: mpsc::UnboundedReceiver<InboundEvent>) {
        while let Some(event) = rx.recv().await {
            self.handle(event).await;
        }
        tracing::info!("Dispatcher shutting down (all handles dropped)");
    }

    /// Run a single event to completion.
    pub async fn handle(&self, event: InboundEvent) {
        let InboundEvent {
            connection_id,
            command,
        } = event;
        let name = command.name();
        tracing::trace!("Dispatching '{}' from '{}'", name, connection_id);

        match command {
            Command::Connect(sender) => {
                self.connect.execute(connection_id, sender).await;
            }
            Command::Login { nick, channel } => {
                if let Err(e) = self.login.execute(connection_id, nick, channel).await
                    && !e.is_client_facing()
                {
                    tracing::warn!("Login from '{}' failed: {}", connection_id, e);
                }
            }
            Command::SendMessage(content) => {
                if let Err(e) = self.send_message.execute(connection_id, content).await {
                    tracing::debug!("send-msg from '{}' failed: {}", connection_id, e);
                }
            }
            Command::Typing(is_typing) => {
                match self.send_typing.execute(connection_id, is_typing).await {
                    Ok(_) => {}
                    Err(SendTypingError::NotLoggedIn) => {
                        tracing::debug!("Ignoring typing from anonymous '{}'", connection_id);
                    }
                    Err(e) => tracing::warn!("typing from '{}' failed: {}", connection_id, e),
                }
            }
            Command::Disconnect => {
                if let Err(e) = self.disconnect.execute(connection_id).await {
                    tracing::warn!("Disconnect of '{}' failed: {}", connection_id, e);
                }
            }
        }
    }
}
