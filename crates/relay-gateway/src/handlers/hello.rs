//! Hello handler

use super::{RelayError, RelayResult};
use crate::connection::Session;
use crate::protocol::CloseCode;
use crate::routing::ReplyRouter;
use crate::server::RelayState;
use relay_backend::BackendRequest;
use relay_core::Hello;
use std::sync::Arc;

/// Handles hello messages
pub struct HelloHandler;

impl HelloHandler {
    /// Bind the user to the session, register it, and forward the hello
    pub async fn handle(
        state: &RelayState,
        session: &Arc<Session>,
        hello: Hello,
    ) -> RelayResult<Option<CloseCode>> {
        let user_id = hello.user.user_id.clone();
        if user_id.is_empty() {
            return Err(RelayError::InvalidPayload(
                "hello: missing userId".to_string(),
            ));
        }

        session
            .bind_user(&user_id)
            .map_err(|bound| RelayError::AlreadyIdentified {
                bound: bound.to_string(),
                requested: user_id.clone(),
            })?;

        state.registry().register(&user_id, session.clone());

        tracing::info!(
            session_id = %session.id(),
            user_id = %user_id,
            username = %hello.user.username,
            "Session identified"
        );

        let replies = state.backend().call(&BackendRequest::Hello(hello)).await?;
        ReplyRouter::route(state, replies);

        Ok(None)
    }
}
