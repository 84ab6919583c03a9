//! Frame codec
//!
//! Every client-side transport message carries exactly one frame:
//!
//! ```text
//! <direction>,{...payload...}
//! <direction>,<recipient>,{...payload...}
//! ```
//!
//! Frames are length-implicit: the payload runs to the end of the transport
//! message. Whether a recipient is present is decided by looking at the first
//! character after the direction. If it opens a payload (`{`) there is no
//! recipient. Recipient identifiers must therefore never start with `{`;
//! such a recipient would be read back as part of the payload.
//!
//! The same rule constrains payloads: a message without a recipient must
//! carry a payload that starts with `{`. Anything else (a JSON array, a bare
//! string) is split at its first comma and read back as recipient and payload.

use thiserror::Error;

use crate::message::Message;

/// Separator between the frame fields
pub const FRAME_SEPARATOR: char = ',';

/// First character of every JSON object payload
pub const PAYLOAD_OPEN: char = '{';

/// Frame decoding errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("Malformed frame: {0}")]
    Malformed(String),
}

/// Encode a message into a single frame.
///
/// The recipient is only written when it is non-empty.
pub fn encode(message: &Message) -> String {
    let mut frame = String::with_capacity(
        message.direction.len() + message.recipient.len() + message.payload.len() + 2,
    );

    frame.push_str(&message.direction);
    frame.push(FRAME_SEPARATOR);

    if message.has_recipient() {
        frame.push_str(&message.recipient);
        frame.push(FRAME_SEPARATOR);
    }

    frame.push_str(&message.payload);
    frame
}

/// Decode a single frame into a message.
pub fn decode(frame: &str) -> Result<Message, FrameError> {
    let mut parts = frame.splitn(3, FRAME_SEPARATOR);

    let direction = parts.next().unwrap_or_default();
    let Some(second) = parts.next() else {
        return Err(FrameError::Malformed(truncate(frame)));
    };

    if second.starts_with(PAYLOAD_OPEN) {
        // <direction>,{...}
        let payload = &frame[direction.len() + 1..];
        return Ok(Message::new(direction, "", payload));
    }

    // <direction>,<recipient>,{...}
    let payload = parts.next().unwrap_or_default();
    Ok(Message::new(direction, second, payload))
}

/// Keep error messages bounded for oversized frames
fn truncate(frame: &str) -> String {
    const MAX_ERROR_LEN: usize = 64;

    match frame.char_indices().nth(MAX_ERROR_LEN) {
        Some((end, _)) => format!("{}...", &frame[..end]),
        None => frame.to_string(),
    }
}
