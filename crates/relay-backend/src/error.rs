//! Room service client errors

use crate::request::RequestKind;
use thiserror::Error;

/// Failure of a single room service call
///
/// Every variant is final for the call: the mediator does not retry and does
/// not apply any part of a failed reply.
#[derive(Debug, Error)]
pub enum BackendError {
    /// No reply within the configured timeout
    #[error("Room service {kind} call timed out")]
    Timeout { kind: RequestKind },

    /// Connection or transport failure
    #[error("Room service {kind} call failed: {message}")]
    Unavailable { kind: RequestKind, message: String },

    /// Non-success HTTP status
    #[error("Room service {kind} call returned status {status}")]
    Status { kind: RequestKind, status: u16 },

    /// Reply body is not a message collection
    #[error("Room service {kind} reply is malformed: {message}")]
    MalformedReply { kind: RequestKind, message: String },

    /// Request body could not be serialized
    #[error("Failed to encode room service {kind} request: {source}")]
    Encode {
        kind: RequestKind,
        #[source]
        source: serde_json::Error,
    },
}

impl BackendError {
    /// Kind of the call that failed
    #[must_use]
    pub fn kind(&self) -> RequestKind {
        match self {
            Self::Timeout { kind }
            | Self::Unavailable { kind, .. }
            | Self::Status { kind, .. }
            | Self::MalformedReply { kind, .. }
            | Self::Encode { kind, .. } => *kind,
        }
    }

    /// Check if the room service could not be reached at all
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Unavailable { .. })
    }

    pub(crate) fn from_reqwest(kind: RequestKind, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout { kind }
        } else if err.is_decode() {
            Self::MalformedReply {
                kind,
                message: err.to_string(),
            }
        } else if let Some(status) = err.status() {
            Self::Status {
                kind,
                status: status.as_u16(),
            }
        } else {
            Self::Unavailable {
                kind,
                message: err.to_string(),
            }
        }
    }
}

/// Room service result type
pub type BackendResult<T> = Result<T, BackendError>;
