//! Game On message payloads
//!
//! Typed views over the raw payloads exchanged between clients, the mediator
//! and the room service. Field names follow the Game On JSON conventions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Protocol versions advertised in the acknowledgment
pub const SUPPORTED_VERSIONS: &[u32] = &[1];

/// ID and display name of a Game On client.
///
/// Embedded in the payloads of hello, goodbye and room commands.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub username: String,
    #[serde(rename = "userId", default, skip_serializing_if = "String::is_empty")]
    pub user_id: String,
}

impl UserInfo {
    pub fn new(user_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            user_id: user_id.into(),
        }
    }
}

/// Room chat/slash command [client -> mediator -> room]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoomCommand {
    #[serde(flatten)]
    pub user: UserInfo,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,
}

/// Hello [client -> mediator -> room]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Hello {
    #[serde(flatten)]
    pub user: UserInfo,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub version: u32,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub recovery: bool,
}

/// Goodbye [client -> mediator -> room]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Goodbye {
    #[serde(flatten)]
    pub user: UserInfo,
}

/// Acknowledgment [mediator -> client]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub version: Vec<u32>,
}

/// Room description [room -> mediator -> client]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub full_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub exits: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub commands: BTreeMap<String, String>,
    #[serde(rename = "roomInventory", default, skip_serializing_if = "Vec::is_empty")]
    pub inventory: Vec<String>,
}

/// Player movement [room -> mediator -> client]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerLocation {
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub exit_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub exit: String,
}

/// Chat line [room -> mediator -> client]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Chat {
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub username: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub bookmark: String,
}

/// Event [room -> mediator -> client]
///
/// `content` maps a recipient (user ID or `*`) to the text shown to it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub content: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub bookmark: String,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(value: &u32) -> bool {
    *value == 0
}
