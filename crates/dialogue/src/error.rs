//! Hub error types.

use common::ConnectionId;
use thiserror::Error;

/// Errors raised by the conversation hub. These indicate transport misuse,
/// never bad user input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HubError {
    /// A message arrived for a connection that was never opened or is closed.
    #[error("Unknown connection: {0}")]
    UnknownConnection(ConnectionId),

    /// `connect` was called twice for the same connection.
    #[error("Connection already open: {0}")]
    DuplicateConnection(ConnectionId),
}
