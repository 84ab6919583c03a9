//! Goodbye handler

use super::RelayResult;
use crate::connection::Session;
use crate::protocol::CloseCode;
use crate::routing::ReplyRouter;
use crate::server::RelayState;
use relay_backend::BackendRequest;
use relay_core::Goodbye;
use std::sync::Arc;

/// Handles goodbye messages
pub struct GoodbyeHandler;

impl GoodbyeHandler {
    /// Forward the goodbye and route the reply.
    ///
    /// The session ends either way: a successful call asks for a normal
    /// close, a failed one ends it through the error path.
    pub async fn handle(
        state: &RelayState,
        session: &Arc<Session>,
        goodbye: Goodbye,
    ) -> RelayResult<Option<CloseCode>> {
        tracing::info!(
            session_id = %session.id(),
            user_id = %goodbye.user.user_id,
            "Client said goodbye"
        );

        let replies = state
            .backend()
            .call(&BackendRequest::Goodbye(goodbye))
            .await?;
        ReplyRouter::route(state, replies);

        Ok(Some(CloseCode::Normal))
    }
}
