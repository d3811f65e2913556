use serde::{Deserialize, Serialize};

/// Who produced a chat entry, and how the UI should style it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    User,
    Assistant,
    System,
    Error,
}

impl MessageKind {
    /// Parse the `type` field of an inbound frame. Anything the client
    /// does not recognise is treated as an assistant message.
    pub fn from_wire(s: &str) -> Self {
        match s {
            "user" => MessageKind::User,
            "assistant" => MessageKind::Assistant,
            "system" => MessageKind::System,
            "error" => MessageKind::Error,
            _ => MessageKind::Assistant,
        }
    }
}

/// A suggested follow-up the assistant offers alongside a reply.
/// Rendered as a clickable affordance; clicking submits the title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickAction {
    pub id: String,
    pub title: String,
    pub description: String,
}

/// A single chat turn in the transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Receipt timestamp or server-assigned id, stringified.
    /// Only used for ordering/keying, not globally unique.
    pub id: String,
    pub kind: MessageKind,
    pub content: String,
    /// Creation instant, epoch millis
    pub timestamp_ms: i64,
    /// Correlation id supplied by the server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub quick_actions: Vec<QuickAction>,
}

/// Current instant as epoch millis
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

impl ChatMessage {
    fn local(kind: MessageKind, text: impl Into<String>) -> Self {
        let now = now_ms();
        Self {
            id: now.to_string(),
            kind,
            content: text.into(),
            timestamp_ms: now,
            session_id: None,
            quick_actions: Vec::new(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::local(MessageKind::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::local(MessageKind::Assistant, text)
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::local(MessageKind::System, text)
    }

    pub fn error_text(text: impl Into<String>) -> Self {
        Self::local(MessageKind::Error, text)
    }
}
