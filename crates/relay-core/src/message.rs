//! Generic Game On message
//!
//! A message holds a direction (`player`, `ack`, `roomHello`, ...), a recipient
//! (a user ID, the broadcast marker or nothing) and a direction-specific payload.
//! The payload is kept as raw JSON text: only clients and the room service
//! interpret its shape.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::payloads::Ack;

/// Recipient marker addressing every identified session
pub const BROADCAST_RECIPIENT: &str = "*";

/// Direction of the acknowledgment sent on every new connection
pub const ACK_DIRECTION: &str = "ack";

/// Generic Game On message
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Message {
    /// Message kind
    pub direction: String,

    /// User ID, `*`, or empty when the message is not addressed
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub recipient: String,

    /// Raw JSON payload
    #[serde(default, skip_serializing_if = "String::is_empty", with = "raw_payload")]
    pub payload: String,
}

impl Message {
    /// Create a new message
    pub fn new(
        direction: impl Into<String>,
        recipient: impl Into<String>,
        payload: impl Into<String>,
    ) -> Self {
        Self {
            direction: direction.into(),
            recipient: recipient.into(),
            payload: payload.into(),
        }
    }

    /// Create a message with a JSON-serialized payload
    pub fn with_payload<T: Serialize>(
        direction: impl Into<String>,
        recipient: impl Into<String>,
        payload: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self::new(direction, recipient, serde_json::to_string(payload)?))
    }

    /// Create the acknowledgment advertising the given protocol versions
    pub fn ack(versions: &[u32]) -> Self {
        let ack = Ack {
            version: versions.to_vec(),
        };
        // An `Ack` is a plain list of integers and always serializes
        let payload = serde_json::to_string(&ack).unwrap_or_default();
        Self::new(ACK_DIRECTION, "", payload)
    }

    /// Check if the message is addressed to every session
    #[inline]
    pub fn is_broadcast(&self) -> bool {
        self.recipient == BROADCAST_RECIPIENT
    }

    /// Check if the message carries a recipient
    #[inline]
    pub fn has_recipient(&self) -> bool {
        !self.recipient.is_empty()
    }

    /// Parse the payload into a typed structure
    pub fn payload_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.payload)
    }
}

/// Collection of messages returned by the room service
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MessageCollection {
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl MessageCollection {
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }
}

/// Embeds the payload string as raw JSON instead of a quoted string.
mod raw_payload {
    use serde::de::Deserializer;
    use serde::ser::{Error as _, Serializer};
    use serde::{Deserialize, Serialize};
    use serde_json::value::RawValue;

    pub fn serialize<S: Serializer>(payload: &str, serializer: S) -> Result<S::Ok, S::Error> {
        let raw = RawValue::from_string(payload.to_owned()).map_err(S::Error::custom)?;
        raw.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        Ok(raw.get().to_owned())
    }
}
