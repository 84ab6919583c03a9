//! Relay state
//!
//! Application state shared by every connection.

use crate::connection::{Session, SessionRegistry};
use crate::protocol::CloseCode;
use relay_backend::RoomBackend;
use relay_common::AppConfig;
use std::sync::Arc;

/// Relay application state
///
/// Holds all shared dependencies for the mediator.
#[derive(Clone)]
pub struct RelayState {
    /// Identified sessions by user ID
    registry: Arc<SessionRegistry>,
    /// Room service client
    backend: Arc<dyn RoomBackend>,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl RelayState {
    /// Create a new relay state
    pub fn new(config: AppConfig, backend: Arc<dyn RoomBackend>) -> Self {
        Self {
            registry: SessionRegistry::new_shared(),
            backend,
            config: Arc::new(config),
        }
    }

    /// Get the session registry
    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Get the room service client
    pub fn backend(&self) -> &dyn RoomBackend {
        self.backend.as_ref()
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Configured room identity, if any
    pub fn room_id(&self) -> Option<&str> {
        self.config.room.id.as_deref()
    }

    /// Close a session and drop its registry entry.
    ///
    /// Safe to call from any task, any number of times; only the first call
    /// has an effect. Returns whether this call closed the session.
    pub fn close_session(&self, session: &Session, code: CloseCode) -> bool {
        if !session.close(code) {
            return false;
        }

        self.registry.unregister(session);

        tracing::debug!(
            session_id = %session.id(),
            user_id = ?session.user_id(),
            close_code = %code,
            "Session closed"
        );

        true
    }
}

impl std::fmt::Debug for RelayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayState")
            .field("registry", &self.registry)
            .field("room_id", &self.room_id())
            .finish()
    }
}
