//! Wire frames exchanged with the assistant backend.
//!
//! The server is lenient about which fields it sends; every inbound field
//! is optional and defaults are applied on conversion. Outbound frames are
//! a fixed three-field envelope.

use serde::{Deserialize, Serialize};

use crate::message::{ChatMessage, MessageKind, QuickAction};

/// Server-assigned message id — numeric timestamp or opaque string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FrameId {
    Number(i64),
    Text(String),
}

/// One inbound JSON text frame from the assistant backend
#[derive(Debug, Clone, Deserialize)]
pub struct ServerFrame {
    pub message_id: Option<FrameId>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Preferred text body
    pub content: Option<String>,
    /// Fallback text body used when `content` is absent
    pub message: Option<String>,
    /// RFC 3339 creation instant
    pub timestamp: Option<String>,
    pub session_id: Option<String>,
    pub quick_actions: Option<Vec<QuickAction>>,
}

impl ServerFrame {
    /// Convert to a transcript entry, defaulting missing fields against
    /// the receipt instant.
    pub fn into_message(self, received_at_ms: i64) -> ChatMessage {
        let id = match self.message_id {
            Some(FrameId::Number(n)) => n.to_string(),
            Some(FrameId::Text(s)) => s,
            None => received_at_ms.to_string(),
        };
        let kind = self
            .kind
            .as_deref()
            .map(MessageKind::from_wire)
            .unwrap_or(MessageKind::Assistant);
        let content = self.content.or(self.message).unwrap_or_default();
        let timestamp_ms = self
            .timestamp
            .as_deref()
            .and_then(|t| chrono::DateTime::parse_from_rfc3339(t).ok())
            .map(|dt| dt.timestamp_millis())
            .unwrap_or(received_at_ms);

        ChatMessage {
            id,
            kind,
            content,
            timestamp_ms,
            session_id: self.session_id,
            quick_actions: self.quick_actions.unwrap_or_default(),
        }
    }
}

/// One outbound JSON text frame: `{"message", "type", "timestamp"}`
#[derive(Debug, Clone, Serialize)]
pub struct ClientFrame {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    /// RFC 3339 send instant
    pub timestamp: String,
}

impl ClientFrame {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            message: text.into(),
            kind: MessageKind::User,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
