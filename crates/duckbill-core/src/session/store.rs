//! In-memory session store with TTL eviction.

use crate::clock::Clock;
use crate::session::model::Session;
use chrono::Duration;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockWriteGuard};
use tracing::debug;

/// The only mutable shared state in the engine: a map from session id to
/// session, guarded by one `RwLock`.
///
/// The engine holds a single write guard across a whole turn (sweep, read,
/// decide, write), so read-decide-write is atomic per turn even if the host
/// allows concurrent requests for the same session id.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl SessionStore {
    /// Creates a store that evicts sessions older than `ttl`.
    pub fn new(ttl: std::time::Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl: Duration::seconds(ttl.as_secs().min(i64::MAX as u64) as i64),
            clock,
        }
    }

    /// Acquires the write guard for a full turn.
    pub(crate) async fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Session>> {
        self.sessions.write().await
    }

    /// Evicts every session whose age exceeds the TTL.
    ///
    /// Age is measured from `started_at`; activity never refreshes it. The
    /// sweep is global, so an expired session is removed on the next turn of
    /// any session id.
    pub(crate) fn sweep_expired(&self, sessions: &mut HashMap<String, Session>) {
        let now = self.clock.now();
        let ttl = self.ttl;
        sessions.retain(|id, session| {
            let keep = now - session.started_at <= ttl;
            if !keep {
                debug!(session_id = %id, scenario = %session.scenario.as_str(), "evicting expired session");
            }
            keep
        });
    }

    /// Returns a snapshot of a session, for debugging and tests.
    ///
    /// Read-only: does not refresh activity, stage, or TTL.
    pub async fn get(&self, session_id: &str) -> Option<Session> {
        self.sessions.read().await.get(session_id).cloned()
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// True when no sessions are live.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Drops every session, for tests.
    pub async fn clear_all(&self) {
        self.sessions.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::scenario::{INITIAL_STAGE, ScenarioKey};
    use crate::session::model::SessionContext;
    use chrono::Utc;

    fn store_with_clock() -> (SessionStore, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::new(Utc::now()));
        let store = SessionStore::new(std::time::Duration::from_secs(1800), clock.clone());
        (store, clock)
    }

    async fn insert(store: &SessionStore, id: &str) {
        let session = Session::new(
            ScenarioKey::TaskCreation,
            INITIAL_STAGE,
            store.clock.now(),
            SessionContext::new("remind me"),
        );
        store.write().await.insert(id.to_string(), session);
    }

    #[tokio::test]
    async fn test_sweep_evicts_only_expired_sessions() {
        let (store, clock) = store_with_clock();

        insert(&store, "old").await;
        clock.advance(chrono::Duration::minutes(31));
        insert(&store, "fresh").await;

        let mut sessions = store.write().await;
        store.sweep_expired(&mut sessions);
        drop(sessions);

        assert!(store.get("old").await.is_none());
        assert!(store.get("fresh").await.is_some());
    }

    #[tokio::test]
    async fn test_sweep_keeps_sessions_at_exact_ttl() {
        let (store, clock) = store_with_clock();
        insert(&store, "edge").await;
        clock.advance(chrono::Duration::minutes(30));

        let mut sessions = store.write().await;
        store.sweep_expired(&mut sessions);
        drop(sessions);

        // Eviction is strictly `age > ttl`.
        assert!(store.get("edge").await.is_some());
    }

    #[tokio::test]
    async fn test_get_is_read_only() {
        let (store, _clock) = store_with_clock();
        insert(&store, "s1").await;

        let before = store.get("s1").await.unwrap();
        let after = store.get("s1").await.unwrap();
        assert_eq!(before, after);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_clear_all() {
        let (store, _clock) = store_with_clock();
        insert(&store, "a").await;
        insert(&store, "b").await;

        store.clear_all().await;
        assert!(store.is_empty().await);
    }
}
