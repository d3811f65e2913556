use serde::{Deserialize, Serialize};

/// Local-development fallback for the assistant socket host
pub const DEFAULT_WS_BASE: &str = "ws://localhost:8000";
/// Local-development fallback for the marketplace REST API
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Chat client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Socket base, e.g. `wss://api.example.com`
    pub ws_base: String,
    /// REST base used only for the identity probe
    pub api_base: String,
    /// Explicit user id override; wins over the authenticated account
    pub user_id: Option<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            ws_base: DEFAULT_WS_BASE.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            user_id: None,
        }
    }
}

impl ChatConfig {
    /// Socket endpoint for the given effective user id
    pub fn endpoint(&self, user_id: &str) -> String {
        format!("{}/ws/chat/{}", self.ws_base.trim_end_matches('/'), user_id)
    }
}
