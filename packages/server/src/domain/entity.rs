//! Domain entities: Channel, ChatMessage, Session.

use std::collections::VecDeque;

use super::{
    error::{ChannelError, SessionError},
    value_object::{
        BacklogCapacity, ChannelId, ConnectionId, MessageContent, MessageId, Nickname, Timestamp,
    },
};

/// チャンネルに投稿されたメッセージ
///
/// 作成後は不変。バックログから押し出されるまでチャンネルに保持されます。
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub from: Nickname,
    pub timestamp: Timestamp,
    pub content: MessageContent,
}

impl ChatMessage {
    pub fn new(
        id: MessageId,
        from: Nickname,
        content: MessageContent,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id,
            from,
            timestamp,
            content,
        }
    }
}

/// チャット用のチャンネル
///
/// 参加者リスト（参加順）、バックログ（古い順）、メッセージ連番を持ちます。
/// 初回参照時に生成され、プロセスが終了するまで削除されません。
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    pub id: ChannelId,
    pub members: Vec<Nickname>,
    pub backlog: VecDeque<ChatMessage>,
    pub next_message_seq: u64,
    pub capacity: BacklogCapacity,
    pub created_at: Timestamp,
}

impl Channel {
    pub fn new(id: ChannelId, capacity: BacklogCapacity, created_at: Timestamp) -> Self {
        Self {
            id,
            members: Vec::new(),
            backlog: VecDeque::new(),
            next_message_seq: 1,
            capacity,
            created_at,
        }
    }

    pub fn has_member(&self, nickname: &Nickname) -> bool {
        self.members.iter().any(|member| member == nickname)
    }

    /// 参加者を末尾に追加する
    ///
    /// # Errors
    ///
    /// 同じニックネームが既に参加している場合は `ChannelError::DuplicateNickname`
    pub fn add_member(&mut self, nickname: Nickname) -> Result<(), ChannelError> {
        if self.has_member(&nickname) {
            return Err(ChannelError::DuplicateNickname(nickname.into_string()));
        }
        self.members.push(nickname);
        Ok(())
    }

    /// 最初に一致した参加者を取り除く。取り除いた場合は `true`
    pub fn remove_member(&mut self, nickname: &Nickname) -> bool {
        match self.members.iter().position(|member| member == nickname) {
            Some(index) => {
                self.members.remove(index);
                true
            }
            None => false,
        }
    }

    /// 新しいメッセージを採番してバックログに追加する
    ///
    /// 追加後に容量を超えた場合は最も古いメッセージを 1 件だけ押し出します。
    /// 容量 0 の場合でもメッセージは返されますが、バックログには残りません。
    pub fn post_message(
        &mut self,
        from: Nickname,
        content: MessageContent,
        timestamp: Timestamp,
    ) -> ChatMessage {
        let id = MessageId::new(self.next_message_seq);
        self.next_message_seq += 1;

        let message = ChatMessage::new(id, from, content, timestamp);
        self.backlog.push_back(message.clone());
        if self.backlog.len() > self.capacity.value() {
            self.backlog.pop_front();
        }

        message
    }

    /// バックログを古い順に取得
    pub fn history(&self) -> Vec<ChatMessage> {
        self.backlog.iter().cloned().collect()
    }

    /// 次に採番されるメッセージ ID
    pub fn next_message_id(&self) -> MessageId {
        MessageId::new(self.next_message_seq)
    }
}

/// セッションの状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// 接続直後。ログインのみ受け付ける
    Anonymous,
    /// ログイン済み。ニックネームとチャンネルが確定している
    LoggedIn {
        nickname: Nickname,
        channel_id: ChannelId,
    },
    /// 切断済み（終端状態）
    Disconnected,
}

/// 接続ごとのセッション
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub connection_id: ConnectionId,
    pub state: SessionState,
}

impl Session {
    /// Anonymous 状態のセッションを作成
    pub fn new(connection_id: ConnectionId) -> Self {
        Self {
            connection_id,
            state: SessionState::Anonymous,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self.state, SessionState::LoggedIn { .. })
    }

    /// ログイン済みの場合はニックネームとチャンネルを返す
    pub fn identity(&self) -> Option<(&Nickname, &ChannelId)> {
        match &self.state {
            SessionState::LoggedIn {
                nickname,
                channel_id,
            } => Some((nickname, channel_id)),
            _ => None,
        }
    }

    /// Anonymous → LoggedIn
    ///
    /// # Errors
    ///
    /// Anonymous 以外の状態からは遷移できません。
    pub fn login(&mut self, nickname: Nickname, channel_id: ChannelId) -> Result<(), SessionError> {
        match &self.state {
            SessionState::Anonymous => {}
            SessionState::LoggedIn { nickname, .. } => {
                return Err(SessionError::AlreadyLoggedIn(nickname.as_str().to_string()));
            }
            SessionState::Disconnected => return Err(SessionError::Disconnected),
        }

        self.state = SessionState::LoggedIn {
            nickname,
            channel_id,
        };
        Ok(())
    }

    /// 任意の状態 → Disconnected
    ///
    /// 直前にログインしていた場合はそのニックネームとチャンネルを返します。
    /// 既に切断済みの場合は何もせず `None` を返します。
    pub fn disconnect(&mut self) -> Option<(Nickname, ChannelId)> {
        let previous = std::mem::replace(&mut self.state, SessionState::Disconnected);
        match previous {
            SessionState::LoggedIn {
                nickname,
                channel_id,
            } => Some((nickname, channel_id)),
            SessionState::Anonymous | SessionState::Disconnected => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConnectionIdFactory;

    fn nick(value: &str) -> Nickname {
        Nickname::new(value).unwrap()
    }

    fn create_test_channel(capacity: usize) -> Channel {
        Channel::new(
            ChannelId::default(),
            BacklogCapacity::new(capacity),
            Timestamp::new(1000),
        )
    }

    #[test]
    fn test_add_member_keeps_join_order() {
        // テスト項目: 参加者は参加順に保持される
        // given (前提条件):
        let mut channel = create_test_channel(0);

        // when (操作):
        channel.add_member(nick("charlie")).unwrap();
        channel.add_member(nick("alice")).unwrap();
        channel.add_member(nick("bob")).unwrap();

        // then (期待する結果):
        let names: Vec<&str> = channel.members.iter().map(|m| m.as_str()).collect();
        assert_eq!(names, vec!["charlie", "alice", "bob"]);
    }

    #[test]
    fn test_add_member_rejects_duplicate() {
        // テスト項目: 同じニックネームでの参加はエラーになり、参加者リストは変化しない
        // given (前提条件):
        let mut channel = create_test_channel(0);
        channel.add_member(nick("alice")).unwrap();

        // when (操作):
        let result = channel.add_member(nick("alice"));

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ChannelError::DuplicateNickname("alice".to_string()))
        );
        assert_eq!(channel.members.len(), 1);
    }

    #[test]
    fn test_remove_member() {
        // テスト項目: 参加者を削除でき、存在しない参加者の削除は false を返す
        // given (前提条件):
        let mut channel = create_test_channel(0);
        channel.add_member(nick("alice")).unwrap();
        channel.add_member(nick("bob")).unwrap();

        // when (操作):
        let removed = channel.remove_member(&nick("alice"));
        let removed_again = channel.remove_member(&nick("alice"));

        // then (期待する結果):
        assert!(removed);
        assert!(!removed_again);
        assert_eq!(channel.members, vec![nick("bob")]);
    }

    #[test]
    fn test_post_message_assigns_sequential_ids() {
        // テスト項目: メッセージ ID が 1 から連番で採番される
        // given (前提条件):
        let mut channel = create_test_channel(10);

        // when (操作):
        let first = channel.post_message(nick("alice"), MessageContent::text("a"), Timestamp::new(1));
        let second = channel.post_message(nick("bob"), MessageContent::text("b"), Timestamp::new(2));

        // then (期待する結果):
        assert_eq!(first.id.to_string(), "msg_1");
        assert_eq!(second.id.to_string(), "msg_2");
        assert_eq!(channel.next_message_id().to_string(), "msg_3");
    }

    #[test]
    fn test_post_message_evicts_oldest_beyond_capacity() {
        // テスト項目: 容量を超えると最も古いメッセージが押し出される
        // given (前提条件):
        let mut channel = create_test_channel(2);

        // when (操作):
        for text in ["a", "b", "c"] {
            channel.post_message(nick("alice"), MessageContent::text(text), Timestamp::new(1));
        }

        // then (期待する結果):
        let history = channel.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id.to_string(), "msg_2");
        assert_eq!(history[0].content.as_text(), Some("b"));
        assert_eq!(history[1].id.to_string(), "msg_3");
        assert_eq!(history[1].content.as_text(), Some("c"));
    }

    #[test]
    fn test_post_message_with_zero_capacity_keeps_no_history() {
        // テスト項目: 容量 0 の場合、メッセージは採番されるがバックログには残らない
        // given (前提条件):
        let mut channel = create_test_channel(0);

        // when (操作):
        let message =
            channel.post_message(nick("alice"), MessageContent::text("hello"), Timestamp::new(1));

        // then (期待する結果):
        assert_eq!(message.id.to_string(), "msg_1");
        assert!(channel.backlog.is_empty());
        assert_eq!(channel.next_message_id().to_string(), "msg_2");
    }

    #[test]
    fn test_session_lifecycle() {
        // テスト項目: Anonymous → LoggedIn → Disconnected の遷移
        // given (前提条件):
        let mut session = Session::new(ConnectionIdFactory::generate());
        assert_eq!(session.state, SessionState::Anonymous);
        assert_eq!(session.identity(), None);

        // when (操作):
        session
            .login(nick("alice"), ChannelId::new("rust"))
            .unwrap();

        // then (期待する結果):
        assert!(session.is_logged_in());
        assert_eq!(
            session.identity(),
            Some((&nick("alice"), &ChannelId::new("rust")))
        );

        let previous = session.disconnect();
        assert_eq!(previous, Some((nick("alice"), ChannelId::new("rust"))));
        assert_eq!(session.state, SessionState::Disconnected);
    }

    #[test]
    fn test_session_rejects_relogin() {
        // テスト項目: ログイン済みセッションの再ログインはエラーになり、状態は変化しない
        // given (前提条件):
        let mut session = Session::new(ConnectionIdFactory::generate());
        session.login(nick("alice"), ChannelId::default()).unwrap();

        // when (操作):
        let result = session.login(nick("bob"), ChannelId::new("other"));

        // then (期待する結果):
        assert_eq!(
            result,
            Err(SessionError::AlreadyLoggedIn("alice".to_string()))
        );
        assert_eq!(
            session.identity(),
            Some((&nick("alice"), &ChannelId::default()))
        );
    }

    #[test]
    fn test_session_disconnect_is_idempotent() {
        // テスト項目: 切断済み・未ログインのセッションの切断は None を返す
        // given (前提条件):
        let mut session = Session::new(ConnectionIdFactory::generate());

        // when (操作):
        let first = session.disconnect();
        let second = session.disconnect();

        // then (期待する結果):
        assert_eq!(first, None);
        assert_eq!(second, None);
        assert_eq!(
            session.login(nick("alice"), ChannelId::default()),
            Err(SessionError::Disconnected)
        );
    }
}
