//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use chanrelay_server::infrastructure::dto::websocket::{
    ClientMessage, LoginPayload, SendMsgPayload, ServerMessage,
};

use crate::{error::ClientError, formatter::MessageFormatter, ui::redisplay_prompt};

/// Build the `login` frame
fn login_frame(nick: &str, channel: Option<&str>) -> Result<String, serde_json::Error> {
    serde_json::to_string(&ClientMessage::Login(LoginPayload {
        nick: nick.to_string(),
        channel: channel.map(str::to_string),
    }))
}

/// Build the `send-msg` frame for a line of text
fn send_msg_frame(line: String) -> Result<String, serde_json::Error> {
    serde_json::to_string(&ClientMessage::SendMsg(SendMsgPayload {
        m: serde_json::Value::String(line),
    }))
}

/// Render an outbound server event for the terminal.
///
/// A `force-login` ends the session with `ClientError::LoginRejected`.
fn render(message: ServerMessage, me: &str) -> Result<String, ClientError> {
    let rendered = match message {
        ServerMessage::ForceLogin(reason) => return Err(ClientError::LoginRejected(reason)),
        ServerMessage::UserJoined(payload) => MessageFormatter::format_user_joined(&payload.nick),
        ServerMessage::Start(payload) => {
            MessageFormatter::format_session_started(&payload.users, &payload.channel, me)
        }
        ServerMessage::PreviousMsg(payload) => MessageFormatter::format_history(&payload.msgs, me),
        ServerMessage::NewMsg(message) => MessageFormatter::format_chat_message(&message, me),
        ServerMessage::Typing(payload) => {
            MessageFormatter::format_typing(&payload.nick, payload.status)
        }
        ServerMessage::UserLeft(payload) => MessageFormatter::format_user_left(&payload.nick),
    };
    Ok(rendered)
}

/// Run one WebSocket client session
///
/// Returns `Ok(())` when the user closes the input, or an error when the
/// connection is lost or the login is rejected.
pub async fn run_client_session(
    url: &str,
    nick: &str,
    channel: Option<&str>,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to chat server!");

    let (mut write, mut read) = ws_stream.split();

    let login = login_frame(nick, channel).map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    write
        .send(Message::Text(login.into()))
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    // Spawn a task to handle incoming frames
    let me = nick.to_string();
    let mut read_task = tokio::spawn(async move {
        while let Some(frame) = read.next().await {
            match frame {
                Ok(Message::Text(text)) => {
                    let output = match serde_json::from_str::<ServerMessage>(&text) {
                        Ok(message) => render(message, &me),
                        Err(_) => Ok(MessageFormatter::format_raw_message(&text)),
                    };
                    match output {
                        Ok(output) => {
                            print!("{}", output);
                            redisplay_prompt(&me);
                        }
                        Err(ClientError::LoginRejected(reason)) => {
                            print!("{}", MessageFormatter::format_login_rejected(&reason));
                            return Err(ClientError::LoginRejected(reason));
                        }
                        Err(e) => return Err(e),
                    }
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
            }
        }

        Err::<(), _>(ClientError::ConnectionError("Connection lost".to_string()))
    });

    loop {
        tokio::select! {
            read_result = &mut read_task => {
                return read_result
                    .unwrap_or_else(|e| Err(ClientError::ConnectionError(e.to_string())));
            }
            line = input_rx.recv() => {
                let Some(line) = line else {
                    read_task.abort();
                    let _ = write.close().await;
                    return Ok(());
                };

                let frame = match send_msg_frame(line) {
                    Ok(frame) => frame,
                    Err(e) => {
                        tracing::error!("Failed to serialize message: {}", e);
                        continue;
                    }
                };
                if let Err(e) = write.send(Message::Text(frame.into())).await {
                    tracing::warn!("Failed to send message: {}", e);
                    read_task.abort();
                    return Err(ClientError::ConnectionError("Connection lost".to_string()));
                }
            }
        }
    }
}
