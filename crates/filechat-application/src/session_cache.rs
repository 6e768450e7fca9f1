use filechat_core::Session;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// In-memory registry of live sessions, keyed by session id.
///
/// Each session sits behind its own mutex, so one session's submission
/// never blocks or observes another's state. Nothing is persisted.
pub struct SessionCache {
    sessions: Arc<RwLock<HashMap<String, Arc<Mutex<Session>>>>>,
}

impl SessionCache {
    /// Creates a new empty SessionCache.
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Creates and registers a fresh session, returning its id and handle.
    pub async fn create(&self) -> (String, Arc<Mutex<Session>>) {
        let session = Session::new();
        let id = session.id.clone();
        let handle = Arc::new(Mutex::new(session));
        self.sessions
            .write()
            .await
            .insert(id.clone(), Arc::clone(&handle));
        (id, handle)
    }

    /// Gets a session by ID.
    ///
    /// # Returns
    ///
    /// `Some(session)` if the session is registered, `None` otherwise.
    pub async fn get(&self, session_id: &str) -> Option<Arc<Mutex<Session>>> {
        let sessions = self.sessions.read().await;
        sessions.get(session_id).cloned()
    }

    /// Removes a session, dropping its log and context.
    pub async fn remove(&self, session_id: &str) -> bool {
        let mut sessions = self.sessions.write().await;
        sessions.remove(session_id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filechat_core::MessageRole;

    #[tokio::test]
    async fn test_create_and_get() {
        let cache = SessionCache::new();
        let (id, _handle) = cache.create().await;

        let fetched = cache.get(&id).await.unwrap();
        assert_eq!(fetched.lock().await.id, id);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let cache = SessionCache::new();
        let (first_id, first) = cache.create().await;
        let (second_id, second) = cache.create().await;
        assert_ne!(first_id, second_id);

        {
            let mut session = first.lock().await;
            session.log.append(MessageRole::User, "only in first");
            session
                .context
                .replace("=== File: a.txt ===\nA\n".to_string(), vec!["a.txt".to_string()]);
        }

        let second = second.lock().await;
        assert!(second.log.is_empty());
        assert!(second.context.is_empty());
    }

    #[tokio::test]
    async fn test_remove() {
        let cache = SessionCache::new();
        let (id, _) = cache.create().await;

        assert!(cache.remove(&id).await);
        assert!(!cache.remove(&id).await);
        assert!(cache.get(&id).await.is_none());
        assert!(cache.is_empty().await);
    }
}
