//! Room service requests

use relay_core::{Goodbye, Hello, RoomCommand, UserInfo};
use serde::Serialize;
use std::fmt;

/// Kind of call made to the room service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Hello,
    Goodbye,
    Command,
}

impl RequestKind {
    /// Path of the endpoint, relative to the room service base URL
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Hello => "/hello",
            Self::Goodbye => "/goodbye",
            Self::Command => "/room",
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

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single call to the room service
///
/// Carries the kind-specific body. The caller's identity travels in
/// request metadata, taken from the embedded [`UserInfo`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendRequest {
    Hello(Hello),
    Goodbye(Goodbye),
    Command(RoomCommand),
}

impl BackendRequest {
    #[must_use]
    pub fn kind(&self) -> RequestKind {
        match self {
            Self::Hello(_) => RequestKind::Hello,
            Self::Goodbye(_) => RequestKind::Goodbye,
            Self::Command(_) => RequestKind::Command,
        }
    }

    /// Identity of the user on whose behalf the call is made
    #[must_use]
    pub fn user(&self) -> &UserInfo {
        match self {
            Self::Hello(hello) => &hello.user,
            Self::Goodbye(goodbye) => &goodbye.user,
            Self::Command(command) => &command.user,
        }
    }

    /// Serialize the request body
    pub fn to_body(&self) -> Result<Vec<u8>, serde_json::Error> {
        match self {
            Self::Hello(hello) => to_vec(hello),
            Self::Goodbye(goodbye) => to_vec(goodbye),
            Self::Command(command) => to_vec(command),
        }
    }
}

fn to_vec<T: Serialize>(body: &T) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(body)
}
