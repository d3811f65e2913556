//! Reconnection policy: exponential backoff with a ceiling and a hard cap.

/// Base delay for the first automatic retry
pub const RETRY_BASE_DELAY_MS: u32 = 1000;
/// Ceiling on any single backoff delay
pub const RETRY_MAX_DELAY_MS: u32 = 10_000;
/// Automatic retries stop after this many attempts
pub const RETRY_CAP: u32 = 5;
/// The very first connect after mount is debounced by this much
pub const INITIAL_CONNECT_DELAY_MS: u32 = 5000;
/// A user-initiated reconnect bypasses backoff and fires after this delay
pub const MANUAL_RECONNECT_DELAY_MS: u32 = 100;

/// Delay before automatic retry number `attempt` (0-based):
/// `min(1000 * 2^attempt, 10000)`.
pub fn backoff_delay_ms(attempt: u32) -> u32 {
    if attempt >= 31 {
        return RETRY_MAX_DELAY_MS;
    }
    RETRY_BASE_DELAY_MS
        .saturating_mul(1 << attempt)
        .min(RETRY_MAX_DELAY_MS)
}
