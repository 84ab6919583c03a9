//! Reply router
//!
//! Fans the messages returned by the room service out to the sessions they
//! are addressed to.

use crate::connection::Session;
use crate::protocol::CloseCode;
use crate::server::RelayState;
use relay_core::{codec, Message};
use std::sync::Arc;

/// Outcome of routing one reply batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteSummary {
    /// Frames queued to a session
    pub delivered: usize,
    /// Messages whose recipient is not connected to this mediator
    pub dropped: usize,
    /// Sessions closed because their frame could not be queued
    pub failed: usize,
}

/// Routes room service replies onto live sessions
pub struct ReplyRouter;

impl ReplyRouter {
    /// Route a reply batch in order.
    ///
    /// `*` goes to every registered session, any other recipient to the
    /// session registered under it. Unknown recipients are dropped.
    pub fn route(state: &RelayState, replies: Vec<Message>) -> RouteSummary {
        match replies.len() {
            0 => tracing::debug!("Response contains no messages"),
            n => tracing::debug!(count = n, "Dispatching response messages"),
        }

        let mut summary = RouteSummary::default();

        for message in replies {
            let frame = codec::encode(&message);

            tracing::debug!(
                direction = %message.direction,
                recipient = %message.recipient,
                payload = %message.payload,
                "Sending message"
            );

            if message.is_broadcast() {
                for session in state.registry().all() {
                    Self::deliver(state, &session, &frame, &mut summary);
                }
            } else if let Some(session) = state.registry().get(&message.recipient) {
                Self::deliver(state, &session, &frame, &mut summary);
            } else {
                tracing::trace!(
                    recipient = %message.recipient,
                    "Recipient not connected, dropping message"
                );
                summary.dropped += 1;
            }
        }

        summary
    }

    fn deliver(state: &RelayState, session: &Arc<Session>, frame: &str, summary: &mut RouteSummary) {
        match session.send(frame.to_string()) {
            Ok(()) => summary.delivered += 1,
            Err(e) => {
                tracing::warn!(
                    session_id = %session.id(),
                    user_id = ?session.user_id(),
                    error = %e,
                    "Failed to deliver message"
                );
                state.close_session(session, CloseCode::TransportError);
                summary.failed += 1;
            }
        }
    }
}
