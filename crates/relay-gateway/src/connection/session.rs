//! Per-connection session
//!
//! A session is created anonymous when a WebSocket is accepted, becomes
//! identified when the client's hello binds a user ID, and is closed exactly
//! once. Closing fires a completion signal observed by every task serving the
//! connection.

use crate::protocol::CloseCode;
use std::sync::{Arc, OnceLock};
use std::time::Instant;
use tokio::sync::{mpsc, watch};

/// Lifecycle state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Connection accepted, no identity yet
    Connected,
    /// User ID bound by a hello
    Identified,
    /// Terminal state
    Closed,
}

/// Outbound queue errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OutboundError {
    /// The client is not draining its queue
    #[error("Outbound queue is full")]
    Full,

    /// The session has already been closed
    #[error("Session is closed")]
    Closed,
}

/// Relay-side state of one live client connection
pub struct Session {
    /// Unique session ID
    id: String,

    /// User ID, bound at most once
    user_id: OnceLock<String>,

    /// Encoded frames waiting for the connection writer
    sender: mpsc::Sender<String>,

    /// Reason the session ended; set exactly once
    close_code: OnceLock<CloseCode>,

    /// Completion signal
    closed: watch::Sender<bool>,

    /// Session creation time
    created_at: Instant,
}

impl Session {
    /// Create a new anonymous session writing into `sender`
    pub fn new(sender: mpsc::Sender<String>) -> Arc<Self> {
        Arc::new(Self {
            id: Self::generate_id(),
            user_id: OnceLock::new(),
            sender,
            close_code: OnceLock::new(),
            closed: watch::Sender::new(false),
            created_at: Instant::now(),
        })
    }

    /// Generate a new session ID
    #[must_use]
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    /// Get the session ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the bound user ID
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.get().map(String::as_str)
    }

    /// Bind the user ID.
    ///
    /// Binding the same ID again is accepted. Binding a different ID fails
    /// and returns the ID already bound.
    pub fn bind_user(&self, user_id: &str) -> Result<(), &str> {
        let bound = self.user_id.get_or_init(|| user_id.to_string());
        if bound == user_id {
            Ok(())
        } else {
            Err(bound)
        }
    }

    /// Get the current state
    pub fn state(&self) -> SessionState {
        if self.is_closed() {
            SessionState::Closed
        } else if self.user_id.get().is_some() {
            SessionState::Identified
        } else {
            SessionState::Connected
        }
    }

    /// Queue an encoded frame for the client.
    ///
    /// Never waits: a full queue means the client is not keeping up.
    pub fn send(&self, frame: String) -> Result<(), OutboundError> {
        if self.is_closed() {
            return Err(OutboundError::Closed);
        }

        self.sender.try_send(frame).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => OutboundError::Full,
            mpsc::error::TrySendError::Closed(_) => OutboundError::Closed,
        })
    }

    /// Mark the session closed.
    ///
    /// Returns `true` only for the call that actually closed it.
    pub fn close(&self, code: CloseCode) -> bool {
        if self.close_code.set(code).is_err() {
            return false;
        }

        self.closed.send_replace(true);
        true
    }

    /// Check if the session is closed
    pub fn is_closed(&self) -> bool {
        self.close_code.get().is_some()
    }

    /// Reason the session was closed
    pub fn close_code(&self) -> Option<CloseCode> {
        self.close_code.get().copied()
    }

    /// Wait until the session is closed
    pub async fn closed(&self) {
        let mut rx = self.closed.subscribe();
        // The sender lives as long as `self`, so this only returns once closed
        let _ = rx.wait_for(|closed| *closed).await;
    }

    /// Get session age
    pub fn age(&self) -> std::time::Duration {
        self.created_at.elapsed()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("user_id", &self.user_id.get())
            .field("state", &self.state())
            .finish()
    }
}
