//! WebSocket frame DTOs.
//!
//! Every frame is a JSON text frame of the form `{"type": <event>, "data": <payload>}`.

use serde::{Deserialize, Serialize};

/// Inbound frame (client → server)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum ClientMessage {
    /// Join a channel under a nickname
    #[serde(rename = "login")]
    Login(LoginPayload),
    /// Post a message to the joined channel
    #[serde(rename = "send-msg")]
    SendMsg(SendMsgPayload),
    /// Typing status of the sender
    #[serde(rename = "typing")]
    Typing(bool),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginPayload {
    pub nick: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SendMsgPayload {
    /// Plain text or attachment object, relayed verbatim
    pub m: serde_json::Value,
}

/// Outbound frame (server → client)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum ServerMessage {
    /// Login rejected or operation requires login (requester only)
    #[serde(rename = "force-login")]
    ForceLogin(String),
    /// User joined (whole channel)
    #[serde(rename = "ue")]
    UserJoined(NickPayload),
    /// Session started (requester only)
    #[serde(rename = "start")]
    Start(StartPayload),
    /// Channel backlog (requester only)
    #[serde(rename = "previous-msg")]
    PreviousMsg(PreviousMsgPayload),
    /// New message (whole channel, sender included)
    #[serde(rename = "new-msg")]
    NewMsg(MessageDto),
    /// Typing status (whole channel except sender)
    #[serde(rename = "typing")]
    Typing(TypingPayload),
    /// User left (remaining members)
    #[serde(rename = "ul")]
    UserLeft(NickPayload),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NickPayload {
    pub nick: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StartPayload {
    pub users: Vec<String>,
    pub channel: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PreviousMsgPayload {
    pub msgs: Vec<MessageDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TypingPayload {
    pub status: bool,
    pub nick: String,
}

/// Message wire shape
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageDto {
    /// Sender nickname
    pub f: String,
    /// Content, opaque to the server
    pub m: serde_json::Value,
    /// Server receipt time (Unix epoch milliseconds)
    pub t: i64,
    /// `msg_<n>`, unique within the channel
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_login_with_channel() {
        // テスト項目: チャンネル指定付きの login フレームをデコードできる
        // given (前提条件):
        let frame = r#"{"type":"login","data":{"nick":"alice","channel":"rust"}}"#;

        // when (操作):
        let message: ClientMessage = serde_json::from_str(frame).unwrap();

        // then (期待する結果):
        assert_eq!(
            message,
            ClientMessage::Login(LoginPayload {
                nick: "alice".to_string(),
                channel: Some("rust".to_string()),
            })
        );
    }

    #[test]
    fn test_deserialize_login_without_channel() {
        // テスト項目: チャンネル省略時は None になる
        // given (前提条件):
        let frame = r#"{"type":"login","data":{"nick":"bob"}}"#;

        // when (操作):
        let message: ClientMessage = serde_json::from_str(frame).unwrap();

        // then (期待する結果):
        assert_eq!(
            message,
            ClientMessage::Login(LoginPayload {
                nick: "bob".to_string(),
                channel: None,
            })
        );
    }

    #[test]
    fn test_deserialize_send_msg_with_attachment() {
        // テスト項目: 添付ファイルオブジェクトの send-msg を解釈せずにデコードできる
        // given (前提条件):
        let frame = r#"{"type":"send-msg","data":{"m":{"type":"image/png","url":"data:image/png;base64,AA","name":"a.png","size":2}}}"#;

        // when (操作):
        let message: ClientMessage = serde_json::from_str(frame).unwrap();

        // then (期待する結果):
        let ClientMessage::SendMsg(payload) = message else {
            panic!("expected send-msg");
        };
        assert_eq!(payload.m["name"], json!("a.png"));
        assert_eq!(payload.m["size"], json!(2));
    }

    #[test]
    fn test_deserialize_typing() {
        // テスト項目: typing フレームの真偽値をデコードできる
        // given (前提条件):
        let frame = r#"{"type":"typing","data":true}"#;

        // when (操作):
        let message: ClientMessage = serde_json::from_str(frame).unwrap();

        // then (期待する結果):
        assert_eq!(message, ClientMessage::Typing(true));
    }

    #[test]
    fn test_deserialize_rejects_malformed_frames() {
        // テスト項目: 不正なフレームはデコードエラーになる
        // given (前提条件):
        let frames = [
            "hello",
            r#"{"type":"unknown","data":{}}"#,
            r#"{"type":"login","data":{}}"#,
            r#"{"type":"send-msg","data":{}}"#,
            r#"{"type":"typing","data":"yes"}"#,
        ];

        // when (操作) / then (期待する結果):
        for frame in frames {
            assert!(
                serde_json::from_str::<ClientMessage>(frame).is_err(),
                "{frame} should be rejected"
            );
        }
    }

    #[test]
    fn test_serialize_new_msg_wire_shape() {
        // テスト項目: new-msg が {f, m, t, id} 形式でエンコードされる
        // given (前提条件):
        let message = ServerMessage::NewMsg(MessageDto {
            f: "alice".to_string(),
            m: json!("hello"),
            t: 1700000000000,
            id: "msg_1".to_string(),
        });

        // when (操作):
        let value = serde_json::to_value(&message).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            json!({
                "type": "new-msg",
                "data": {"f": "alice", "m": "hello", "t": 1700000000000_i64, "id": "msg_1"}
            })
        );
    }

    #[test]
    fn test_serialize_force_login() {
        // テスト項目: force-login はエラー文字列をそのまま data に持つ
        // given (前提条件):
        let message = ServerMessage::ForceLogin("Nick can't be empty.".to_string());

        // when (操作):
        let json = serde_json::to_string(&message).unwrap();

        // then (期待する結果):
        assert_eq!(json, r#"{"type":"force-login","data":"Nick can't be empty."}"#);
    }
}
