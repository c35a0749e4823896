//! ID generation utilities for voicedesk
//!
//! Provides identifiers for sessions, tool calls and orders.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

/// Get current timestamp in milliseconds since Unix epoch
pub fn now_ms() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}

/// Short hex digest of arbitrary bytes (first 4 bytes of SHA-256)
fn short_digest(data: &[u8]) -> String {
    let result = Sha256::digest(data);
    hex::encode(&result[..4])
}

/// Generate a session ID
///
/// Format: `sess-{timestamp_ms}-{hex}`
pub fn generate_session_id(agent: &str) -> String {
    let timestamp = now_ms();
    let seed = format!("{}:{}:{}", agent, timestamp, std::process::id());
    format!("sess-{}-{}", timestamp, short_digest(seed.as_bytes()))
}

/// Generate a tool call ID for calls that arrive without one
///
/// Format: `call_{index}`
pub fn generate_call_id(index: usize) -> String {
    format!("call_{}", index)
}

/// Generate an order ID from the placement time and the order body
///
/// Format: `ord-{YYYYmmddHHMMSS}-{hex}`
pub fn generate_order_id(placed_at: &DateTime<Utc>, body: &str) -> String {
    let seed = format!("{}:{}", placed_at.timestamp_nanos_opt().unwrap_or_default(), body);
    format!("ord-{}-{}", placed_at.format("%Y%m%d%H%M%S"), short_digest(seed.as_bytes()))
}

/// Order file name for a placed order
///
/// Format: `order_{YYYYmmdd_HHMMSS}_{hex}.json`
pub fn order_file_name(placed_at: &DateTime<Utc>, order_id: &str) -> String {
    let suffix = order_id.rsplit('-').next().unwrap_or(order_id);
    format!("order_{}_{}.json", placed_at.format("%Y%m%d_%H%M%S"), suffix)
}
