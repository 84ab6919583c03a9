//! Session registry
//!
//! Maps user identities to identified sessions. All operations take the
//! registry's own lock for the duration of the map access only; callers never
//! hold it across an await or a room service call.

use super::Session;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Identified sessions by user ID
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Arc<Session>>>,
}

impl SessionRegistry {
    /// Create a new registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new registry wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register a session under a user ID, replacing any previous mapping.
    ///
    /// A session that is already closed is not registered, so a close racing
    /// with identification cannot leave a stale entry behind. Returns whether
    /// the session was registered.
    pub fn register(&self, user_id: &str, session: Arc<Session>) -> bool {
        let mut sessions = self.sessions.write();

        if session.is_closed() {
            return false;
        }

        if let Some(previous) = sessions.insert(user_id.to_string(), session) {
            tracing::debug!(
                user_id = %user_id,
                previous_session = %previous.id(),
                "Replaced session registered for user"
            );
        }

        true
    }

    /// Remove the session's mapping.
    ///
    /// A no-op when the session never identified, was already removed, or its
    /// user ID has since been taken over by another session. Returns whether
    /// an entry was removed.
    pub fn unregister(&self, session: &Session) -> bool {
        let Some(user_id) = session.user_id() else {
            return false;
        };

        let mut sessions = self.sessions.write();
        let owned = sessions
            .get(user_id)
            .is_some_and(|registered| registered.id() == session.id());

        if owned {
            sessions.remove(user_id);
            tracing::debug!(session_id = %session.id(), user_id = %user_id, "Session unregistered");
        }

        owned
    }

    /// Get the session registered for a user
    pub fn get(&self, user_id: &str) -> Option<Arc<Session>> {
        self.sessions.read().get(user_id).cloned()
    }

    /// Snapshot of every registered session
    pub fn all(&self) -> Vec<Arc<Session>> {
        self.sessions.read().values().cloned().collect()
    }

    /// Check if a user has a registered session
    pub fn contains(&self, user_id: &str) -> bool {
        self.sessions.read().contains_key(user_id)
    }

    /// Number of registered sessions
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

impl std::fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("sessions", &self.len())
            .finish()
    }
}
