//! Identifier types shared across the ordering bot crates.

mod types;

pub use types::{ConnectionId, SessionId};
