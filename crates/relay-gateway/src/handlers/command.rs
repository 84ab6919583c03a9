//! Room command handler

use super::RelayResult;
use crate::connection::Session;
use crate::protocol::CloseCode;
use crate::routing::ReplyRouter;
use crate::server::RelayState;
use relay_backend::BackendRequest;
use relay_core::RoomCommand;
use std::sync::Arc;

/// Handles chat lines and slash commands
pub struct CommandHandler;

impl CommandHandler {
    pub async fn handle(
        state: &RelayState,
        session: &Arc<Session>,
        command: RoomCommand,
    ) -> RelayResult<Option<CloseCode>> {
        tracing::trace!(
            session_id = %session.id(),
            user_id = %command.user.user_id,
            "Forwarding room command"
        );

        let replies = state
            .backend()
            .call(&BackendRequest::Command(command))
            .await?;
        ReplyRouter::route(state, replies);

        Ok(None)
    }
}
