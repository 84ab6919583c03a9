//! # relay-core
//!
//! Domain layer for the room mediator: the generic Game On message, the
//! typed payloads exchanged with clients and the room service, and the
//! comma-separated frame codec used on the client connection.
//! This crate has zero dependencies on infrastructure (web framework, HTTP client, etc.).

pub mod codec;
pub mod headers;
pub mod message;
pub mod payloads;

// Re-export commonly used types at crate root
pub use codec::{decode, encode, FrameError, FRAME_SEPARATOR, PAYLOAD_OPEN};
pub use headers::{USERNAME_HEADER, USER_ID_HEADER};
pub use message::{Message, MessageCollection, BROADCAST_RECIPIENT};
pub use payloads::{
    Ack, Chat, Event, Goodbye, Hello, Location, PlayerLocation, RoomCommand, UserInfo,
    SUPPORTED_VERSIONS,
};
