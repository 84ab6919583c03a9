//! Relay error types
//!
//! Every variant is terminal for the connection it occurred on.

use crate::protocol::CloseCode;
use relay_backend::BackendError;
use relay_core::FrameError;
use thiserror::Error;

/// Relay error type
#[derive(Debug, Error)]
pub enum RelayError {
    /// Frame could not be decoded
    #[error(transparent)]
    MalformedFrame(#[from] FrameError),

    /// Payload does not match its direction
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Direction is not accepted from clients
    #[error("Unrecognized message direction: {0}")]
    UnrecognizedDirection(String),

    /// Frame addressed to another room
    #[error("Recipient ({recipient}) doesn't match expected room id ({expected})")]
    RoutingMismatch { recipient: String, expected: String },

    /// Hello with a different user ID on an identified session
    #[error("Session already identified as {bound}, refusing {requested}")]
    AlreadyIdentified { bound: String, requested: String },

    /// Room service call failed
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Reading from or writing to the client connection failed
    #[error("Transport error: {0}")]
    Transport(String),
}

impl RelayError {
    /// Close code sent to the client when this error ends the session
    pub fn to_close_code(&self) -> CloseCode {
        match self {
            Self::MalformedFrame(_) | Self::InvalidPayload(_) => CloseCode::DecodeError,
            Self::UnrecognizedDirection(_) => CloseCode::UnknownDirection,
            Self::RoutingMismatch { .. } => CloseCode::RoutingMismatch,
            Self::AlreadyIdentified { .. } => CloseCode::AlreadyIdentified,
            Self::Backend(_) => CloseCode::BackendError,
            Self::Transport(_) => CloseCode::TransportError,
        }
    }
}

/// Relay result type
pub type RelayResult<T> = Result<T, RelayError>;
