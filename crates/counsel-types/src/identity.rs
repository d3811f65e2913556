//! Effective-identity resolution for the chat connection.
//!
//! The socket endpoint embeds a user id. An explicitly supplied id wins,
//! then the authenticated account id, and as a last resort a synthesized
//! guest id. Callers cache the resolved id for the life of one client so
//! it stays identical across reconnects — regenerating it would fragment
//! server-side session continuity.

use crate::message::now_ms;

const GUEST_SUFFIX_LEN: usize = 8;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Pick the effective user id: explicit > authenticated > fresh guest id.
/// Empty strings are treated as absent.
pub fn resolve_user_id(explicit: Option<&str>, authenticated: Option<&str>) -> String {
    explicit
        .filter(|s| !s.is_empty())
        .or(authenticated.filter(|s| !s.is_empty()))
        .map(str::to_string)
        .unwrap_or_else(generate_guest_id)
}

/// Synthesize a guest id of the shape `guest_<epochMillis>_<randomBase36>`.
/// Not cryptographically strong; good enough to keep anonymous visitors apart.
pub fn generate_guest_id() -> String {
    let mut bits = uuid::Uuid::new_v4().as_u128();
    let mut suffix = String::with_capacity(GUEST_SUFFIX_LEN);
    for _ in 0..GUEST_SUFFIX_LEN {
        suffix.push(BASE36[(bits % 36) as usize] as char);
        bits /= 36;
    }
    format!("guest_{}_{}", now_ms(), suffix)
}
