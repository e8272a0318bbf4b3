//! JSON frames exchanged over the chat WebSocket.

use common::SessionId;
use serde::{Deserialize, Serialize};

/// Frames sent by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ServerFrame {
    /// Tells the client which session to resume with on reconnect.
    Session { session_id: SessionId },
    BotMessage { message: String },
}

impl ServerFrame {
    pub fn bot(message: impl Into<String>) -> Self {
        ServerFrame::BotMessage {
            message: message.into(),
        }
    }

    pub fn to_json(&self) -> String {
        // Both variants contain only strings, so serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Frames sent by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ClientFrame {
    UserMessage { message: String },
}

impl ClientFrame {
    /// Extracts the user's text from a frame. Anything that is not a
    /// `user-message` JSON object is taken verbatim.
    pub fn message_text(raw: &str) -> String {
        match serde_json::from_str::<ClientFrame>(raw) {
            Ok(ClientFrame::UserMessage { message }) => message,
            Err(_) => raw.to_string(),
        }
    }
}
