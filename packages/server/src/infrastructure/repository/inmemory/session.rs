//! InMemory Session Repository 実装
//!
//! 接続ごとの Session を保持する Connection Registry。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChannelId, ConnectionId, RepositoryError, Session, SessionRepository};

/// インメモリ Session Repository 実装
#[derive(Default)]
pub struct InMemorySessionRepository {
    /// 接続 ID → Session
    sessions: Mutex<HashMap<ConnectionId, Session>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn register(&self, session: Session) {
        let mut sessions = self.sessions.lock().await;
        tracing::debug!("Connection '{}' registered", session.connection_id);
        sessions.insert(session.connection_id, session);
    }

    async fn find(&self, connection_id: &ConnectionId) -> Option<Session> {
        let sessions = self.sessions.lock().await;
        sessions.get(connection_id).cloned()
    }

    async fn save(&self, session: Session) -> Result<(), RepositoryError> {
        let mut sessions = self.sessions.lock().await;
        match sessions.get_mut(&session.connection_id) {
            Some(entry) => {
                *entry = session;
                Ok(())
            }
            None => Err(RepositoryError::ConnectionNotFound(
                session.connection_id.to_string(),
            )),
        }
    }

    async fn remove(&self, connection_id: &ConnectionId) -> Option<Session> {
        let mut sessions = self.sessions.lock().await;
        let removed = sessions.remove(connection_id);
        if removed.is_some() {
            tracing::debug!("Connection '{}' removed", connection_id);
        }
        removed
    }

    async fn connections_in_channel(&self, channel_id: &ChannelId) -> Vec<ConnectionId> {
        let sessions = self.sessions.lock().await;
        sessions
            .values()
            .filter(|session| {
                session
                    .identity()
                    .is_some_and(|(_, joined)| joined == channel_id)
            })
            .map(|session| session.connection_id)
            .collect()
    }

    async fn count(&self) -> usize {
        let sessions = self.sessions.lock().await;
        sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConnectionIdFactory, Nickname};

    fn logged_in(channel: &str, nick: &str) -> Session {
        let mut session = Session::new(ConnectionIdFactory::generate());
        session
            .login(Nickname::new(nick).unwrap(), ChannelId::new(channel))
            .unwrap();
        session
    }

    #[tokio::test]
    async fn test_register_and_find() {
        // テスト項目: 登録した Session を取得できる
        // given (前提条件):
        let repo = InMemorySessionRepository::new();
        let session = Session::new(ConnectionIdFactory::generate());
        let connection_id = session.connection_id;

        // when (操作):
        repo.register(session.clone()).await;

        // then (期待する結果):
        assert_eq!(repo.find(&connection_id).await, Some(session));
        assert_eq!(repo.count().await, 1);
    }

    #[tokio::test]
    async fn test_save_unknown_connection_fails() {
        // テスト項目: 登録されていない接続の保存はエラーになる
        // given (前提条件):
        let repo = InMemorySessionRepository::new();
        let session = Session::new(ConnectionIdFactory::generate());

        // when (操作):
        let result = repo.save(session.clone()).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RepositoryError::ConnectionNotFound(
                session.connection_id.to_string()
            ))
        );
        assert_eq!(repo.count().await, 0);
    }

    #[tokio::test]
    async fn test_connections_in_channel_excludes_anonymous_and_other_channels() {
        // テスト項目: ブロードキャストグループには同じチャンネルのログイン済み接続のみが含まれる
        // given (前提条件):
        let repo = InMemorySessionRepository::new();
        let alice = logged_in("main", "alice");
        let bob = logged_in("main", "bob");
        let carol = logged_in("rust", "carol");
        let anonymous = Session::new(ConnectionIdFactory::generate());
        for session in [&alice, &bob, &carol, &anonymous] {
            repo.register(session.clone()).await;
        }

        // when (操作):
        let mut main = repo.connections_in_channel(&ChannelId::default()).await;

        // then (期待する結果):
        let mut expected = vec![alice.connection_id, bob.connection_id];
        main.sort();
        expected.sort();
        assert_eq!(main, expected);
        assert_eq!(
            repo.connections_in_channel(&ChannelId::new("rust")).await,
            vec![carol.connection_id]
        );
    }

    #[tokio::test]
    async fn test_remove_returns_previous_session() {
        // テスト項目: 削除時に削除前の Session が返り、2 回目は None
        // given (前提条件):
        let repo = InMemorySessionRepository::new();
        let alice = logged_in("main", "alice");
        repo.register(alice.clone()).await;

        // when (操作):
        let first = repo.remove(&alice.connection_id).await;
        let second = repo.remove(&alice.connection_id).await;

        // then (期待する結果):
        assert_eq!(first, Some(alice));
        assert_eq!(second, None);
        assert_eq!(repo.count().await, 0);
    }
}
