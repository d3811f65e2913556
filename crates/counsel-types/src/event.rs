use serde::{Deserialize, Serialize};

use crate::message::ChatMessage;

/// Events emitted by the chat client.
/// UI drains these each frame for reactive updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ChatEvent {
    /// A connection attempt started
    Connecting,

    /// The socket opened
    Connected,

    /// The socket closed (any code, including normal closure)
    Disconnected { code: u16, reason: String },

    /// An automatic reconnect was scheduled
    RetryScheduled { attempt: u32, max: u32, delay_ms: u32 },

    /// An entry was appended to the transcript
    MessageAppended(ChatMessage),

    /// The surfaced error text changed; `None` clears it
    ErrorChanged(Option<String>),

    /// The transcript was cleared
    LogCleared,
}
