//! Headers passed with calls between the mediator and the room service.

/// Carries the Game On user ID.
pub const USER_ID_HEADER: &str = "X-Game-On-UserID";

/// Carries the Game On user name.
pub const USERNAME_HEADER: &str = "X-Game-On-Username";
