//! Frame handlers
//!
//! Decodes incoming client frames, validates their routing, and hands them to
//! the handler for their direction.

mod command;
mod error;
mod goodbye;
mod hello;

pub use command::CommandHandler;
pub use error::{RelayError, RelayResult};
pub use goodbye::GoodbyeHandler;
pub use hello::HelloHandler;

use crate::connection::Session;
use crate::protocol::{ClientRequest, CloseCode};
use crate::server::RelayState;
use relay_core::{codec, Message};
use std::sync::Arc;

/// Dispatch incoming client frames to the appropriate handlers
pub struct MessageDispatcher;

impl MessageDispatcher {
    /// Handle one incoming frame.
    ///
    /// `Ok(Some(code))` asks for the session to be closed with `code`;
    /// any error closes it with the error's close code.
    pub async fn dispatch(
        state: &RelayState,
        session: &Arc<Session>,
        frame: &str,
    ) -> RelayResult<Option<CloseCode>> {
        let message = codec::decode(frame)?;

        tracing::debug!(
            session_id = %session.id(),
            direction = %message.direction,
            recipient = %message.recipient,
            payload = %message.payload,
            "Websocket message received"
        );

        Self::check_recipient(state.room_id(), &message)?;

        match ClientRequest::from_message(&message)? {
            ClientRequest::Hello(hello) => HelloHandler::handle(state, session, hello).await,
            ClientRequest::Goodbye(goodbye) => {
                GoodbyeHandler::handle(state, session, goodbye).await
            }
            ClientRequest::Command(command) => {
                CommandHandler::handle(state, session, command).await
            }
        }
    }

    /// Reject frames addressed to a room other than the configured one
    fn check_recipient(room_id: Option<&str>, message: &Message) -> RelayResult<()> {
        match room_id {
            Some(expected) if message.has_recipient() && message.recipient != expected => {
                Err(RelayError::RoutingMismatch {
                    recipient: message.recipient.clone(),
                    expected: expected.to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}
