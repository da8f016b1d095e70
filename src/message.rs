//! Message protocol definitions
//!
//! JSON envelopes discriminated by a `type` field. Outbound messages use
//! Serde's tagged enum; inbound messages are decoded in two steps so the
//! command trigger in `text` can take precedence over `type`.

use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::command;
use crate::error::AppError;

/// Raw inbound envelope, before dispatch
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: Option<String>,
    name: Option<String>,
    text: Option<String>,
}

/// Client → Server message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMessage {
    /// `text` started with a command trigger
    Command { command: &'static str },
    /// Join the room under a display name
    Join { name: String },
    /// Chat text for the whole room
    Chat { text: String },
}

impl ClientMessage {
    /// Decode one inbound frame
    ///
    /// Returns `AppError::Json` if the frame is not a JSON envelope and
    /// `AppError::BadMessage` if it does not name a known message.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        // Only objects are envelopes; a derived struct would also take arrays
        let value: Value = serde_json::from_str(raw)?;
        if !value.is_object() {
            return Err(serde_json::Error::custom("expected a JSON object").into());
        }
        let envelope: Envelope = serde_json::from_value(value)?;

        if let Some(command) = envelope.text.as_deref().and_then(command::trigger) {
            return Ok(ClientMessage::Command { command });
        }

        match (envelope.kind.as_deref(), envelope.name, envelope.text) {
            (Some("join"), Some(name), _) => Ok(ClientMessage::Join { name }),
            (Some("chat"), _, Some(text)) => Ok(ClientMessage::Chat { text }),
            (Some("join"), None, _) => Err(AppError::BadMessage("join without name".to_string())),
            (Some("chat"), _, None) => Err(AppError::BadMessage("chat without text".to_string())),
            (Some(other), _, _) => Err(AppError::BadMessage(other.to_string())),
            (None, _, _) => Err(AppError::BadMessage("missing type".to_string())),
        }
    }
}

/// Server → Client message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// System announcement or command reply
    Note { text: String },
    /// Attributed chat line; `name` is null if the sender never joined
    Chat { name: Option<String>, text: String },
}

impl ServerMessage {
    pub fn note(text: impl Into<String>) -> Self {
        ServerMessage::Note { text: text.into() }
    }

    /// Serialize to the wire format
    pub fn to_json(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string(self)?)
    }
}
