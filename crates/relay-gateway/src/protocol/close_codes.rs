//! WebSocket close codes
//!
//! Sent in the close frame that ends every session, so clients can tell a
//! normal goodbye from the failure that terminated the connection.

/// Mediator WebSocket close codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum CloseCode {
    /// Goodbye completed or the client closed the connection
    Normal = 1000,
    /// Unknown error occurred
    UnknownError = 4000,
    /// Frame direction is not one the mediator accepts
    UnknownDirection = 4001,
    /// Frame or payload could not be decoded
    DecodeError = 4002,
    /// Frame addressed to another room
    RoutingMismatch = 4003,
    /// Hello with a different identity on an identified session
    AlreadyIdentified = 4005,
    /// Room service call failed
    BackendError = 4006,
    /// Reading from or writing to the connection failed
    TransportError = 4007,
}

impl CloseCode {
    /// Get the raw u16 value
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Get the description for this close code
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Normal => "Session closed",
            Self::UnknownError => "Unknown error occurred",
            Self::UnknownDirection => "Unrecognized message direction",
            Self::DecodeError => "Invalid message encoding",
            Self::RoutingMismatch => "Message addressed to another room",
            Self::AlreadyIdentified => "Session already identified",
            Self::BackendError => "Room service unavailable",
            Self::TransportError => "Connection error",
        }
    }

    /// Get the name of this close code
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::UnknownError => "UnknownError",
            Self::UnknownDirection => "UnknownDirection",
            Self::DecodeError => "DecodeError",
            Self::RoutingMismatch => "RoutingMismatch",
            Self::AlreadyIdentified => "AlreadyIdentified",
            Self::BackendError => "BackendError",
            Self::TransportError => "TransportError",
        }
    }
}

impl std::fmt::Display for CloseCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.name(), self.as_u16(), self.description())
    }
}

impl From<CloseCode> for u16 {
    fn from(code: CloseCode) -> Self {
        code.as_u16()
    }
}
