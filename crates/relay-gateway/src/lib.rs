//! # relay-gateway
//!
//! WebSocket mediator between Game On clients and a room service.
//!
//! Each client connection gets a session. Frames from the client are decoded,
//! checked against the configured room, and forwarded to the room service;
//! the messages it replies with are routed to one identified session or, for
//! the `*` recipient, to all of them.

pub mod connection;
pub mod handlers;
pub mod protocol;
pub mod routing;
pub mod server;

#[cfg(test)]
mod testing;

pub use connection::{Session, SessionRegistry};
pub use handlers::{MessageDispatcher, RelayError, RelayResult};
pub use protocol::CloseCode;
pub use routing::{ReplyRouter, RouteSummary};
pub use server::{create_app, create_relay_state, run, RelayState};
