//! # relay-backend
//!
//! Client side of the room service boundary. The mediator forwards each
//! hello, goodbye and room command as one synchronous call and receives the
//! list of messages to route back to clients.

pub mod client;
pub mod error;
pub mod http;
pub mod request;

// Re-export commonly used types at crate root
pub use client::RoomBackend;
pub use error::{BackendError, BackendResult};
pub use http::HttpRoomClient;
pub use request::{BackendRequest, RequestKind};
