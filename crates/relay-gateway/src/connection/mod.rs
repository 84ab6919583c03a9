//! Connection management
//!
//! Per-connection sessions and the registry that addresses them by user ID.

mod registry;
mod session;

pub use registry::SessionRegistry;
pub use session::{OutboundError, Session, SessionState};
