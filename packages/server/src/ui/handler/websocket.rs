//! WebSocket connection handlers.

use std::{sync::Arc, time::Duration};

use axum::{
    body::Bytes,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::{
    sync::mpsc,
    time::{Instant, interval_at, timeout},
};

use crate::{
    domain::{ConnectionId, ConnectionIdFactory, MessageContent},
    infrastructure::dto::websocket::ClientMessage,
    ui::state::AppState,
    usecase::{Command, DispatcherHandle},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.max_message_size(state.connection.max_message_size)
        .on_upgrade(move |socket| handle_socket(socket, state))
}

/// Decode an inbound text frame into a dispatcher command.
fn decode_command(text: &str) -> Result<Command, serde_json::Error> {
    let command = match serde_json::from_str::<ClientMessage>(text)? {
        ClientMessage::Login(payload) => Command::Login {
            nick: payload.nick,
            channel: payload.channel,
        },
        ClientMessage::SendMsg(payload) => Command::SendMessage(MessageContent::new(payload.m)),
        ClientMessage::Typing(is_typing) => Command::Typing(is_typing),
    };
    Ok(command)
}

/// Spawns a task that receives frames from the rx channel and pushes them to the WebSocket sender.
///
/// This is the per-connection writer: the dispatcher only enqueues, so a slow
/// socket never blocks fan-out to the other connections. It also sends a
/// Ping every `ping_interval` so that live peers keep answering with Pongs.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
    ping_interval: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut heartbeat = interval_at(Instant::now() + ping_interval, ping_interval);
        loop {
            let message = tokio::select! {
                frame = rx.recv() => match frame {
                    Some(frame) => Message::Text(frame.into()),
                    None => break,
                },
                _ = heartbeat.tick() => Message::Ping(Bytes::new()),
            };
            if sender.send(message).await.is_err() {
                break;
            }
        }
    })
}

/// Spawns a task that decodes frames from the socket and submits them to the dispatcher.
///
/// Ends when the peer sends nothing, Pongs included, for `idle_timeout`.
fn receiver_loop(
    mut receiver: futures_util::stream::SplitStream<WebSocket>,
    dispatcher: DispatcherHandle,
    connection_id: ConnectionId,
    idle_timeout: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let msg = match timeout(idle_timeout, receiver.next()).await {
                Ok(Some(Ok(msg))) => msg,
                Ok(Some(Err(e))) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
                Ok(None) => break,
                Err(_) => {
                    tracing::info!(
                        "Connection '{}' silent for {:?}, closing",
                        connection_id,
                        idle_timeout
                    );
                    break;
                }
            };

            match msg {
                Message::Text(text) => match decode_command(&text) {
                    Ok(command) => {
                        if dispatcher.submit(connection_id, command).is_err() {
                            tracing::error!("Dispatcher is closed, dropping '{}'", connection_id);
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Dropping malformed frame from '{}': {}", connection_id, e);
                    }
                },
                Message::Binary(_) => {
                    tracing::warn!("Dropping binary frame from '{}'", connection_id);
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id);
                    break;
                }
                Message::Ping(_) | Message::Pong(_) => {}
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionIdFactory::generate();
    let (tx, rx) = mpsc::unbounded_channel();

    if let Err(e) = state.dispatcher.submit(connection_id, Command::Connect(tx)) {
        tracing::error!("Failed to register connection '{}': {}", connection_id, e);
        return;
    }

    let (sender, receiver) = socket.split();
    let mut send_task = pusher_loop(rx, sender, state.connection.ping_interval);
    let mut recv_task = receiver_loop(
        receiver,
        state.dispatcher.clone(),
        connection_id,
        state.connection.idle_timeout,
    );

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    if let Err(e) = state.dispatcher.submit(connection_id, Command::Disconnect) {
        tracing::warn!("Failed to submit disconnect for '{}': {}", connection_id, e);
    }
}
