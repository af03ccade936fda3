//! Message formatting utilities for client display.

use chanrelay_server::infrastructure::dto::websocket::MessageDto;
use chanrelay_shared::time::timestamp_to_clock_time;
use serde_json::Value;

const RULE: &str = "------------------------------------------------------------";
const DOUBLE_RULE: &str = "============================================================";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the session start showing the channel and its members
    pub fn format_session_started(users: &[String], channel: &str, me: &str) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n\n{}\n", DOUBLE_RULE));
        output.push_str(&format!("Channel: #{}\n", channel));
        output.push_str("Users:\n");
        for user in users {
            let me_suffix = if user == me { " (me)" } else { "" };
            output.push_str(&format!("  {}{}\n", user, me_suffix));
        }
        output.push_str(&format!("{}\n", DOUBLE_RULE));
        output
    }

    /// Format the backlog replayed on join, oldest first
    pub fn format_history(messages: &[MessageDto], me: &str) -> String {
        if messages.is_empty() {
            return "(No previous messages)\n".to_string();
        }

        let mut output = format!("{} previous message(s):\n", messages.len());
        for message in messages {
            output.push_str(&Self::format_chat_message(message, me));
        }
        output
    }

    /// Format a user-joined notification
    pub fn format_user_joined(nick: &str) -> String {
        format!("\n+ {} joined\n", nick)
    }

    /// Format a user-left notification
    pub fn format_user_left(nick: &str) -> String {
        format!("\n- {} left\n", nick)
    }

    /// Format a typing status change
    pub fn format_typing(nick: &str, is_typing: bool) -> String {
        if is_typing {
            format!("\n… {} is typing\n", nick)
        } else {
            format!("\n… {} stopped typing\n", nick)
        }
    }

    /// Format a chat message
    pub fn format_chat_message(message: &MessageDto, me: &str) -> String {
        let from = if message.f == me {
            format!("{} (me)", message.f)
        } else {
            message.f.clone()
        };
        format!(
            "\n{}\n[{}] {} @{}: {}\n{}\n",
            RULE,
            timestamp_to_clock_time(message.t),
            message.id,
            from,
            Self::format_content(&message.m),
            RULE
        )
    }

    /// Render message content: plain text as is, attachments as a short label
    pub fn format_content(content: &Value) -> String {
        match content {
            Value::String(text) => text.clone(),
            Value::Object(fields) => {
                let kind = fields
                    .get("type")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown");
                let name = fields
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or("unnamed");
                format!("[attachment: {} ({})]", name, kind)
            }
            other => other.to_string(),
        }
    }

    /// Format a login rejection
    pub fn format_login_rejected(reason: &str) -> String {
        format!("\n! {}\n", reason)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message(from: &str, m: Value) -> MessageDto {
        MessageDto {
            f: from.to_string(),
            m,
            t: 1672576496000,
            id: "msg_3".to_string(),
        }
    }

    #[test]
    fn test_format_session_started_marks_me() {
        // テスト項目: セッション開始時にチャンネル名と参加者が表示され、自分にはマークが付く
        // given (前提条件):
        let users = vec!["alice".to_string(), "bob".to_string()];

        // when (操作):
        let result = MessageFormatter::format_session_started(&users, "rust", "alice");

        // then (期待する結果):
        assert!(result.contains("Channel: #rust"));
        assert!(result.contains("alice (me)"));
        assert!(result.contains("  bob\n"));
        assert!(!result.contains("bob (me)"));
    }

    #[test]
    fn test_format_history_empty() {
        // テスト項目: 履歴が空の場合、その旨が表示される
        // given (前提条件):
        let messages: Vec<MessageDto> = vec![];

        // when (操作):
        let result = MessageFormatter::format_history(&messages, "alice");

        // then (期待する結果):
        assert_eq!(result, "(No previous messages)\n");
    }

    #[test]
    fn test_format_chat_message() {
        // テスト項目: チャットメッセージに時刻・ID・送信者・本文が含まれる
        // given (前提条件):
        let dto = message("bob", json!("Hello, world!"));

        // when (操作):
        let result = MessageFormatter::format_chat_message(&dto, "alice");

        // then (期待する結果):
        assert!(result.contains("[12:34:56] msg_3 @bob: Hello, world!"));
        assert!(result.contains(RULE));
    }

    #[test]
    fn test_format_attachment_content() {
        // テスト項目: 添付ファイルは名前と種類のラベルで表示される
        // given (前提条件):
        let content = json!({"type": "image/png", "url": "data:...", "name": "cat.png"});

        // when (操作):
        let result = MessageFormatter::format_content(&content);

        // then (期待する結果):
        assert_eq!(result, "[attachment: cat.png (image/png)]");
    }

    #[test]
    fn test_format_typing() {
        // テスト項目: 入力中ステータスの開始と終了が区別して表示される
        // given (前提条件):
        let nick = "bob";

        // when (操作):
        let started = MessageFormatter::format_typing(nick, true);
        let stopped = MessageFormatter::format_typing(nick, false);

        // then (期待する結果):
        assert!(started.contains("bob is typing"));
        assert!(stopped.contains("bob stopped typing"));
    }

    #[test]
    fn test_format_user_joined_and_left() {
        // テスト項目: 参加・退出通知が正しくフォーマットされる
        // given (前提条件):
        let nick = "charlie";

        // when (操作):
        let joined = MessageFormatter::format_user_joined(nick);
        let left = MessageFormatter::format_user_left(nick);

        // then (期待する結果):
        assert!(joined.contains("+ charlie joined"));
        assert!(left.contains("- charlie left"));
    }
}
