//! Test fixtures and data generators
//!
//! Client frames and room service replies used across the integration tests.

use relay_core::{encode, Chat, Event, Location, Message, MessageCollection};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Unique user ID
pub fn unique_user() -> String {
    format!("user{}", unique_suffix())
}

/// The acknowledgment every client receives first
pub const ACK_FRAME: &str = r#"ack,{"version":[1]}"#;

pub fn hello_frame(user_id: &str, username: &str) -> String {
    format!(r#"hello,{{"userId":"{user_id}","username":"{username}","version":1}}"#)
}

pub fn goodbye_frame(user_id: &str, username: &str) -> String {
    format!(r#"goodbye,{{"userId":"{user_id}","username":"{username}"}}"#)
}

pub fn command_frame(room_id: Option<&str>, user_id: &str, content: &str) -> String {
    let payload = serde_json::json!({
        "userId": user_id,
        "username": "Tester",
        "content": content,
    });
    match room_id {
        Some(room_id) => format!("room,{room_id},{payload}"),
        None => format!("room,{payload}"),
    }
}

/// Room description addressed to one user
pub fn location_reply(user_id: &str) -> Message {
    let location = Location {
        kind: "location".to_string(),
        name: "TheFirstRoom".to_string(),
        full_name: "The First Room".to_string(),
        description: "A dusty room full of old code.".to_string(),
        exits: BTreeMap::from([("N".to_string(), "A door to the north".to_string())]),
        ..Default::default()
    };
    Message::with_payload("player", user_id, &location).unwrap_or_default()
}

/// Event shown to every session
pub fn event_broadcast(text: &str) -> Message {
    let event = Event {
        kind: "event".to_string(),
        content: BTreeMap::from([("*".to_string(), text.to_string())]),
        ..Default::default()
    };
    Message::with_payload("player", "*", &event).unwrap_or_default()
}

/// Chat line addressed to one user
pub fn chat_reply(user_id: &str, content: &str) -> Message {
    let chat = Chat {
        kind: "chat".to_string(),
        username: "Tester".to_string(),
        content: content.to_string(),
        ..Default::default()
    };
    Message::with_payload("player", user_id, &chat).unwrap_or_default()
}

/// JSON body of a room service reply
pub fn collection_body(messages: Vec<Message>) -> String {
    serde_json::to_string(&MessageCollection::new(messages)).unwrap_or_default()
}

/// The frame a client receives for `message`
pub fn frame_of(message: &Message) -> String {
    encode(message)
}
