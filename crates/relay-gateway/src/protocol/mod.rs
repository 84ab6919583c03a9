//! Mediator protocol definitions
//!
//! Client-facing directions, typed requests, and close codes. The frame
//! format itself lives in `relay_core::codec`.

mod close_codes;
mod requests;

pub use close_codes::CloseCode;
pub use requests::{ClientDirection, ClientRequest};
