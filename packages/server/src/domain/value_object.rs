//! Value Objects
//!
//! 不変条件を型で保証する値オブジェクトを定義します。

use std::fmt;

use uuid::Uuid;

use super::error::ValueObjectError;

/// 接続 ID
///
/// WebSocket 接続ごとにサーバー側で採番される識別子。
/// クライアントが指定することはありません。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(Uuid);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ConnectionId の生成器
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// UUID v4 で新しい ConnectionId を生成
    pub fn generate() -> ConnectionId {
        ConnectionId(Uuid::new_v4())
    }
}

/// ニックネーム
///
/// 前後の空白は取り除かれ、空文字列は許容されません。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Nickname(String);

impl Nickname {
    /// 入力をトリムして Nickname を作成
    ///
    /// # Errors
    ///
    /// トリム後に空になる場合は `ValueObjectError::EmptyNickname`
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValueObjectError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::EmptyNickname);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Nickname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// チャンネル ID
///
/// 任意の文字列。未指定または空文字列の場合は `main` チャンネルになります。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelId(String);

impl ChannelId {
    /// 既定のチャンネル名
    pub const DEFAULT: &'static str = "main";

    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            return Self::default();
        }
        Self(value)
    }

    /// ログイン要求のチャンネル指定から ChannelId を解決する
    pub fn resolve(requested: Option<String>) -> Self {
        requested.map(Self::new).unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Default for ChannelId {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// メッセージ ID
///
/// チャンネル内の連番から `msg_<n>` 形式で表現されます。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(u64);

impl MessageId {
    const PREFIX: &'static str = "msg_";

    pub fn new(seq: u64) -> Self {
        Self(seq)
    }

    pub fn seq(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

/// メッセージ本文
///
/// テキストまたは添付ファイルの構造化ペイロード。サーバーは中身を解釈せず、
/// 受け取った JSON をそのまま保存・中継します。
#[derive(Debug, Clone, PartialEq)]
pub struct MessageContent(serde_json::Value);

impl MessageContent {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self(serde_json::Value::String(value.into()))
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }

    /// プレーンテキストの場合のみ本文を返す
    pub fn as_text(&self) -> Option<&str> {
        self.0.as_str()
    }
}

/// タイムスタンプ（Unix epoch からのミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// チャンネルごとのバックログ容量
///
/// 0 の場合は履歴を保持しません。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BacklogCapacity(usize);

impl BacklogCapacity {
    pub fn new(value: usize) -> Self {
        Self(value)
    }

    pub fn value(&self) -> usize {
        self.0
    }
}
