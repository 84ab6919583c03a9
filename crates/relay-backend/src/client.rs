//! Room service port
//!
//! The relay only depends on this trait; the HTTP implementation lives in
//! [`crate::http`] and tests substitute in-process fakes.

use async_trait::async_trait;
use relay_core::Message;

use crate::error::BackendResult;
use crate::request::BackendRequest;

/// Stateless game logic reachable through synchronous calls
#[async_trait]
pub trait RoomBackend: Send + Sync {
    /// Perform one round trip and return the messages to route, in order
    async fn call(&self, request: &BackendRequest) -> BackendResult<Vec<Message>>;
}
