//! Reply routing
//!
//! Delivers room service replies to one user or to every identified session.

mod router;

pub use router::{ReplyRouter, RouteSummary};
