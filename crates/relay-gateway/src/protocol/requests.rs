//! Client requests
//!
//! The closed set of frames a client may send. Direction strings are only
//! interpreted here; everything past this point matches on [`ClientRequest`].

use crate::handlers::{RelayError, RelayResult};
use relay_core::{Goodbye, Hello, Message, RoomCommand};
use serde::de::DeserializeOwned;

/// Directions accepted from clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientDirection {
    /// Client enters the room
    Hello,
    /// Client leaves the room
    Goodbye,
    /// Chat line or slash command for the room
    Command,
}

impl ClientDirection {
    /// Parse a frame direction.
    ///
    /// The legacy Game On names (`roomHello`, `roomGoodbye`, `room`) are
    /// accepted next to the short ones.
    #[must_use]
    pub fn parse(direction: &str) -> Option<Self> {
        match direction {
            "hello" | "roomHello" => Some(Self::Hello),
            "goodbye" | "roomGoodbye" => Some(Self::Goodbye),
            "room" | "roomCommand" => Some(Self::Command),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hello => "hello",
            Self::Goodbye => "goodbye",
            Self::Command => "command",
        }
    }
}

impl std::fmt::Display for ClientDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded client frame with its typed payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientRequest {
    Hello(Hello),
    Goodbye(Goodbye),
    Command(RoomCommand),
}

impl ClientRequest {
    /// Interpret a decoded frame
    pub fn from_message(message: &Message) -> RelayResult<Self> {
        let direction = ClientDirection::parse(&message.direction)
            .ok_or_else(|| RelayError::UnrecognizedDirection(message.direction.clone()))?;

        Ok(match direction {
            ClientDirection::Hello => Self::Hello(parse_payload(direction, message)?),
            ClientDirection::Goodbye => Self::Goodbye(parse_payload(direction, message)?),
            ClientDirection::Command => Self::Command(parse_payload(direction, message)?),
        })
    }
}

fn parse_payload<T: DeserializeOwned>(
    direction: ClientDirection,
    message: &Message,
) -> RelayResult<T> {
    message
        .payload_as()
        .map_err(|e| RelayError::InvalidPayload(format!("{direction}: {e}")))
}
