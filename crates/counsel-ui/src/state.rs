//! UI-level state that drives rendering.
//! This is a read-only projection of the chat client's state,
//! updated each frame by draining the EventBus. The transcript itself
//! is rendered from the client's snapshot, never duplicated here.

use counsel_types::event::ChatEvent;

/// State visible to UI panels
pub struct UiState {
    /// Input field content
    pub input_text: String,
    /// Status line text
    pub status_text: String,
    /// Set when a new transcript entry arrived this frame
    pub scroll_to_bottom: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            input_text: String::new(),
            status_text: "Offline".to_string(),
            scroll_to_bottom: false,
        }
    }

    /// Process events from the EventBus and update UI state
    pub fn process_events(&mut self, events: Vec<ChatEvent>) {
        for event in events {
            match event {
                ChatEvent::Connecting => {
                    self.status_text = "Connecting...".to_string();
                }
                ChatEvent::Connected => {
                    self.status_text = "Connected".to_string();
                }
                ChatEvent::Disconnected { .. } => {
                    self.status_text = "Disconnected".to_string();
                }
                ChatEvent::RetryScheduled { attempt, max, .. } => {
                    self.status_text = format!("Reconnecting ({attempt}/{max})...");
                }
                ChatEvent::MessageAppended(_) => {
                    self.scroll_to_bottom = true;
                }
                ChatEvent::ErrorChanged(_) | ChatEvent::LogCleared => {}
            }
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
